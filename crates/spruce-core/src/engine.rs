use crate::config;
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::scanner::{self, ScanOptions, ScanResult};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info};

/// Orchestrates one health scan: walk, fingerprint, then either
/// short-circuit (incremental scan of an unchanged tree) or run every
/// health detector over the same immutable snapshot and merge the results.
pub struct ScanEngine {
    options: ScanOptions,
}

impl ScanEngine {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn scan(&self, reporter: &dyn ProgressReporter) -> Result<ScanResult, Error> {
        let start = Instant::now();
        let ignore = self
            .options
            .ignore
            .clone()
            .unwrap_or_else(config::default_ignore);

        info!("Scanning {}", self.options.root.display());
        reporter.on_walk_start();
        let walk_start = Instant::now();
        let files = scanner::walk::walk_directory(&self.options.root, &ignore);
        reporter.on_walk_complete(files.len(), walk_start.elapsed().as_secs_f64());

        let fingerprint = scanner::fingerprint::compute_fingerprint(&files);
        let file_count = files.iter().filter(|file| !file.is_directory).count();

        if !self.options.full_scan {
            if let Some(previous) = &self.options.previous_fingerprint {
                if *previous == fingerprint {
                    debug!("Fingerprint unchanged, skipping all detectors");
                    return Ok(ScanResult {
                        issues: vec![],
                        scanned_at: Utc::now().to_rfc3339(),
                        scan_duration_ms: start.elapsed().as_millis() as u64,
                        file_count,
                        fingerprint,
                    });
                }
            }
        }

        reporter.on_detect_start();
        let detect_start = Instant::now();
        let mut issues = Vec::new();
        issues.extend(scanner::duplicates::check_duplicates(&files));
        issues.extend(scanner::references::check_references(
            &files,
            &self.options.root,
        ));
        issues.extend(scanner::freshness::check_freshness(&files));
        issues.extend(scanner::structure::check_structure(&files));
        issues.extend(scanner::naming::check_naming(&files));

        // Stable sort: detector emission order is preserved within a tier
        issues.sort_by_key(|issue| issue.severity.rank());
        reporter.on_detect_complete(issues.len(), detect_start.elapsed().as_secs_f64());

        debug!(
            "Scan complete — {} files, {} issues in {:.2}s",
            file_count,
            issues.len(),
            start.elapsed().as_secs_f64(),
        );

        Ok(ScanResult {
            issues,
            scanned_at: Utc::now().to_rfc3339(),
            scan_duration_ms: start.elapsed().as_millis() as u64,
            file_count,
            fingerprint,
        })
    }
}
