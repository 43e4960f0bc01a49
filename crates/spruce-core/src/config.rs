use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

/// Directory and file names every walk skips entirely. Covers the usual
/// dependency, build and cache directories.
pub const DEFAULT_IGNORE: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "__pycache__",
    ".venv",
    "venv",
    ".cache",
    "coverage",
    ".turbo",
];

/// Dot-prefixed entries are skipped, except this one: instruction files
/// such as `copilot-instructions.md` live under it.
pub const ALLOWED_DOT_ENTRY: &str = ".github";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ignore: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
        }
    }
}

pub fn default_ignore() -> Vec<String> {
    DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
}

/// Load an optional `Spruce.toml` from the working directory, falling back
/// to built-in defaults for any key it does not set.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Spruce").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ignore_covers_dependency_dirs() {
        let ignore = default_ignore();
        assert!(ignore.contains(&"node_modules".to_string()));
        assert!(ignore.contains(&".git".to_string()));
        assert!(ignore.contains(&"coverage".to_string()));
    }

    #[test]
    fn test_default_config_uses_default_ignore() {
        let config = AppConfig::default();
        assert_eq!(config.ignore, default_ignore());
    }
}
