use colored::*;
use serde::Serialize;
use spruce_core::{
    HealthIssue, PatternMatch, PatternScanResult, ScanResult, Severity, StateStore,
};
use std::collections::HashSet;

/// Everything the caller needs to print: formatted sections plus the raw
/// data for `--json` output.
pub struct FullReport {
    pub summary: String,
    pub health_report: String,
    pub pattern_report: String,
    pub raw: RawReport,
}

#[derive(Serialize)]
pub struct RawReport {
    pub scan: ScanResult,
    pub patterns: PatternScanResult,
}

pub fn generate_report(
    scan: &ScanResult,
    patterns: &PatternScanResult,
    store: &StateStore,
) -> FullReport {
    let issues = select_issues(scan, store);
    let total_duration = scan.scan_duration_ms + patterns.scan_duration_ms;

    let mut filtered_scan = scan.clone();
    filtered_scan.issues = issues.clone();

    FullReport {
        summary: format_summary(
            issues.len(),
            patterns.patterns.len(),
            total_duration,
            scan.file_count,
        ),
        health_report: format_health_report(&issues),
        pattern_report: format_pattern_report(&patterns.patterns),
        raw: RawReport {
            scan: filtered_scan,
            patterns: patterns.clone(),
        },
    }
}

/// New issues (never decided) plus deferred ones that are due for
/// re-review, deduplicated by id.
fn select_issues(scan: &ScanResult, store: &StateStore) -> Vec<HealthIssue> {
    let deferred_ids: HashSet<&str> = store
        .deferred_items()
        .iter()
        .map(|item| item.issue_id.as_str())
        .collect();

    let mut seen = HashSet::new();
    scan.issues
        .iter()
        .filter(|issue| {
            !store.is_already_decided(&issue.id) || deferred_ids.contains(issue.id.as_str())
        })
        .filter(|issue| seen.insert(issue.id.clone()))
        .cloned()
        .collect()
}

fn severity_icon(severity: Severity) -> ColoredString {
    match severity {
        Severity::Critical => "[CRITICAL]".red().bold(),
        Severity::Warning => "[WARNING]".yellow(),
        Severity::Info => "[INFO]".cyan(),
    }
}

fn format_issue(issue: &HealthIssue, index: usize) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "  {}. {} {}",
        index,
        severity_icon(issue.severity),
        issue.title
    ));
    lines.push(format!("     {}", issue.description));
    if !issue.file_paths.is_empty() {
        let shown: Vec<&str> = issue.file_paths.iter().take(5).map(String::as_str).collect();
        let more = if issue.file_paths.len() > 5 {
            format!(" (+{} more)", issue.file_paths.len() - 5)
        } else {
            String::new()
        };
        lines.push(format!("     Files: {}{}", shown.join(", "), more));
    }
    lines.push(format!("     Suggested: {}", issue.suggested_action));
    lines.join("\n")
}

pub fn format_health_report(issues: &[HealthIssue]) -> String {
    if issues.is_empty() {
        return "Project health check: All clear! No issues found.".to_string();
    }

    let mut lines = Vec::new();
    lines.push("=== Project Health Report ===\n".to_string());

    for severity in [Severity::Critical, Severity::Warning, Severity::Info] {
        let group: Vec<&HealthIssue> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }

        let mut label: Vec<char> = severity.as_str().chars().collect();
        label[0] = label[0].to_ascii_uppercase();
        let label: String = label.into_iter().collect();
        lines.push(format!("--- {} ({}) ---", label, group.len()));

        for (index, issue) in group.iter().enumerate() {
            lines.push(format_issue(issue, index + 1));
        }
        lines.push(String::new());
    }

    lines.push(format!("Total: {} issue(s) found", issues.len()));
    lines.push(
        "\nFor each issue, choose: [accept] fix it | [skip] ignore | [defer] handle later"
            .to_string(),
    );

    lines.join("\n")
}

fn format_pattern(pattern: &PatternMatch, index: usize) -> String {
    let mut lines = Vec::new();
    let confidence = (pattern.confidence * 100.0).round() as u32;
    lines.push(format!(
        "  {}. [{}% confidence] {}",
        index, confidence, pattern.name
    ));
    lines.push(format!("     {}", pattern.description));
    if !pattern.evidence.is_empty() {
        lines.push("     Evidence:".to_string());
        for evidence in pattern.evidence.iter().take(3) {
            let location = evidence
                .line_number
                .map(|line| format!(":{}", line))
                .unwrap_or_default();
            let excerpt: String = evidence.excerpt.chars().take(100).collect();
            lines.push(format!(
                "       - {}{}: \"{}\"",
                evidence.file_path, location, excerpt
            ));
        }
    }
    lines.push(format!("     Suggested skill: /{}", pattern.suggested_skill.name));
    lines.join("\n")
}

pub fn format_pattern_report(patterns: &[PatternMatch]) -> String {
    if patterns.is_empty() {
        return "Pattern scan: No reusable patterns detected.".to_string();
    }

    let mut lines = Vec::new();
    lines.push("=== Skill Suggestions ===\n".to_string());
    lines.push(format!(
        "Found {} pattern(s) that could become reusable skills:\n",
        patterns.len()
    ));

    for (index, pattern) in patterns.iter().enumerate() {
        lines.push(format_pattern(pattern, index + 1));
        lines.push(String::new());
    }

    lines.push("Would you like to create any of these skills?".to_string());
    lines.join("\n")
}

pub fn format_summary(
    issue_count: usize,
    pattern_count: usize,
    duration_ms: u64,
    file_count: usize,
) -> String {
    format!(
        "Scanned {} files in {}ms\nFound {} health issue(s) and {} skill suggestion(s)",
        file_count, duration_ms, issue_count, pattern_count
    )
}
