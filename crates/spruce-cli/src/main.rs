mod commands;
mod logging;
mod progress;
mod report;

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use spruce_core::{scan_patterns, AppConfig, ScanEngine, ScanOptions, StateStore};
use tracing::error;

fn main() -> Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match spruce_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();
    let root = resolve_root(args.dir.clone())?;

    match args.command {
        Some(Commands::Checkup) => run_checkup(&root, args.json, &config)?,
        Some(Commands::Startup) => run_startup(&root, args.json, &config)?,
        Some(Commands::Status) => show_status(&root),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn resolve_root(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.canonicalize()?),
        None => Ok(env::current_dir()?),
    }
}

fn run_checkup(root: &PathBuf, json: bool, config: &AppConfig) -> Result<()> {
    let mut store = StateStore::open(root);

    println!("Running full project health scan...\n");

    let engine = ScanEngine::new(ScanOptions {
        root: root.clone(),
        full_scan: true,
        previous_fingerprint: None,
        ignore: Some(config.ignore.clone()),
    });
    let reporter = CliReporter::new();
    let scan_result = engine.scan(&reporter)?;
    let pattern_result = scan_patterns(root, &reporter);

    store.record_scan(&scan_result)?;
    for pattern in &pattern_result.patterns {
        store.add_skill_suggestion(
            &pattern.id,
            &pattern.suggested_skill.name,
            &pattern.suggested_skill.description,
            pattern.kind.as_str(),
        )?;
    }

    let full_report = report::generate_report(&scan_result, &pattern_result, &store);

    if json {
        println!("{}", serde_json::to_string_pretty(&full_report.raw)?);
    } else {
        println!("{}", full_report.summary);
        println!();
        println!("{}", full_report.health_report);
        println!();
        println!("{}", full_report.pattern_report);
    }

    Ok(())
}

fn run_startup(root: &PathBuf, json: bool, config: &AppConfig) -> Result<()> {
    let mut store = StateStore::open(root);
    let previous_fingerprint = store.fingerprint().map(str::to_string);

    println!("Running startup scan...\n");

    let engine = ScanEngine::new(ScanOptions {
        root: root.clone(),
        full_scan: false,
        previous_fingerprint: previous_fingerprint.clone(),
        ignore: Some(config.ignore.clone()),
    });
    let reporter = CliReporter::new();
    let scan_result = engine.scan(&reporter)?;

    if scan_result.issues.is_empty() && previous_fingerprint.is_some() {
        println!("No changes detected since last scan. Project looks good!");
        return Ok(());
    }

    let pattern_result = scan_patterns(root, &reporter);
    store.record_scan(&scan_result)?;

    let full_report = report::generate_report(&scan_result, &pattern_result, &store);

    if json {
        println!("{}", serde_json::to_string_pretty(&full_report.raw)?);
    } else {
        println!("{}", full_report.summary);
        if !scan_result.issues.is_empty() {
            println!();
            println!("{}", full_report.health_report);
        }

        let deferred = store.deferred_items();
        if !deferred.is_empty() {
            println!(
                "\nReminder: You have {} deferred item(s). Run `spruce checkup` to review.",
                deferred.len()
            );
        }
    }

    Ok(())
}

fn show_status(root: &PathBuf) {
    let store = StateStore::open(root);
    let state = store.state();

    println!("=== Project Status ===\n");
    println!("Project: {}", root.display());
    println!(
        "Last full scan: {}",
        state.last_full_scan.as_deref().unwrap_or("Never")
    );
    println!("Scan history: {} scan(s)", state.scan_history.len());
    println!("Deferred items: {}", state.deferred.len());
    println!("Skill suggestions: {}", state.skill_suggestions.len());

    if !state.deferred.is_empty() {
        println!("\nDeferred items:");
        for item in &state.deferred {
            println!("  - {} (deferred {})", item.issue_id, item.deferred_at);
        }
    }

    if !state.skill_suggestions.is_empty() {
        println!("\nSkill suggestions:");
        for skill in &state.skill_suggestions {
            let status = format!("[{:?}]", skill.status).to_lowercase();
            println!(
                "  - {} {}: {}",
                status.cyan(),
                skill.name,
                skill.description
            );
        }
    }
}
