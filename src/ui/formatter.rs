//! Pure formatting functions for UI output.
//!
//! `format_*` functions return plain text and are what the tests exercise.
//! `display_*` functions add colour and print.

use console::style;

use crate::cli::{ReleaseKind, WorkflowOutcome, WorkflowResult};
use crate::domain::{Commit, Series};

const SHORT_SHA_LEN: usize = 7;

/// Commits listed in a report before the rest is summarised
const MAX_LISTED_COMMITS: usize = 20;

fn short_sha(sha: &str) -> &str {
    sha.get(..SHORT_SHA_LEN).unwrap_or(sha)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One line describing a commit in the series.
///
/// Conventional commits show as `type(scope)!: description`; anything else is
/// shown verbatim with a `?` marker. Commits that are part of the next preview
/// are marked with `+`.
pub fn format_commit_line(commit: &Commit, in_next_preview: bool) -> String {
    let marker = if in_next_preview { '+' } else { ' ' };

    let summary = match &commit.parsed {
        Some(parsed) => {
            let mut summary = parsed.r#type.clone();
            if let Some(scope) = &parsed.scope {
                summary.push_str(&format!("({})", scope));
            }
            if parsed.is_breaking_change() {
                summary.push('!');
            }
            summary.push_str(": ");
            summary.push_str(&parsed.description);
            summary
        }
        None => format!("? {}", commit.header()),
    };

    let mut line = format!("{} {} {}", marker, short_sha(&commit.sha), summary);

    let mut release_tags = Vec::new();
    if let Some(stable) = &commit.tags.stable {
        release_tags.push(stable.to_string());
    }
    if let Some(preview) = &commit.tags.preview {
        release_tags.push(preview.to_string());
    }
    if !release_tags.is_empty() {
        line.push_str(&format!(" [{}]", release_tags.join(", ")));
    }
    if !commit.tags.other.is_empty() {
        line.push_str(&format!(" (tags: {})", commit.tags.other.join(", ")));
    }

    line
}

/// Multi-line description of a series: its boundaries, flags and commits.
pub fn format_series_report(series: &Series) -> String {
    let mut lines = Vec::new();

    match series.previous_stable() {
        Some(stable) => lines.push(format!(
            "Previous stable: {} ({})",
            stable.version,
            short_sha(&stable.commit.sha)
        )),
        None => lines.push("Previous stable: none".to_string()),
    }
    match series.previous_preview() {
        Some(preview) => lines.push(format!(
            "Previous preview: {} ({})",
            preview.version,
            short_sha(&preview.commit.sha)
        )),
        None => lines.push("Previous preview: none".to_string()),
    }

    let stable_commits = series.commits_in_next_stable();
    let preview_len = series.commits_in_next_preview().len();
    lines.push(format!(
        "Commits since previous stable: {} ({} since previous preview)",
        stable_commits.len(),
        preview_len
    ));

    if series.is_initial_development() {
        lines.push("Initial development: breaking changes bump the minor version".to_string());
    }
    if series.has_breaking_change() {
        lines.push("Contains breaking changes".to_string());
    }

    for (i, commit) in stable_commits.iter().take(MAX_LISTED_COMMITS).enumerate() {
        lines.push(format!("  {}", format_commit_line(commit, i < preview_len)));
    }
    if stable_commits.len() > MAX_LISTED_COMMITS {
        lines.push(format!(
            "  ... and {} more commits",
            stable_commits.len() - MAX_LISTED_COMMITS
        ));
    }

    lines.join("\n")
}

/// One line stating what the workflow decided.
pub fn format_outcome(result: &WorkflowResult) -> String {
    let track = match result.kind {
        ReleaseKind::Stable => "stable",
        ReleaseKind::Preview => "preview",
        ReleaseKind::PullRequest { .. } => "pull request",
    };

    match &result.outcome {
        WorkflowOutcome::Release(release) => {
            let mut line = format!(
                "Next {} release: {} ({} bump)",
                track, release.version, release.bump_type
            );
            if let Some(tag) = &result.tag {
                line.push_str(&format!(", tag {}", tag));
            }
            line
        }
        WorkflowOutcome::PullRequest(version) => {
            format!("Next {} release: {}", track, version)
        }
        WorkflowOutcome::NoRelease(reason) => {
            format!("No {} release: {}", track, reason)
        }
    }
}

/// Print the series report under a bold heading.
pub fn display_series_report(series: &Series) {
    println!("\n{}", style("Release series").bold().underlined());
    println!("{}\n", format_series_report(series));
}

/// Print the workflow outcome, green for a release and yellow otherwise.
pub fn display_outcome(result: &WorkflowResult) {
    match result.outcome {
        WorkflowOutcome::NoRelease(_) => display_status(&format_outcome(result)),
        WorkflowOutcome::Release(_) | WorkflowOutcome::PullRequest(_) => {
            display_success(&format_outcome(result))
        }
    }
}
