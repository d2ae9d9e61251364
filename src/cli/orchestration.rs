//! Release workflow orchestration
//!
//! Reads the history, builds the series and asks the release analyzer for the
//! requested kind of release. Kept free of clap so it can be driven
//! programmatically and from tests.

use crate::analyzer::ReleaseAnalyzer;
use crate::config::Config;
use crate::domain::{NextRelease, NoReleaseReason, PullRequestVer, Release, Series};
use crate::error::Result;
use crate::git::Repository;

/// Which release track to compute a version for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    Stable,
    Preview,
    PullRequest { pr_num: u64 },
}

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Revision to compute the release for; falls back to the configured one
    pub revision: Option<String>,

    /// Forced build number for preview releases
    pub build_num: Option<u64>,

    /// Versions already published to the registry, for pull-request numbering
    pub published_versions: Vec<String>,
}

/// What the workflow decided
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Release(Release),
    PullRequest(PullRequestVer),
    NoRelease(NoReleaseReason),
}

/// Result of a release workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub kind: ReleaseKind,

    /// The series the decision was based on, for reporting
    pub series: Series,

    pub outcome: WorkflowOutcome,

    /// Git tag name the release would be published under (stable and preview only)
    pub tag: Option<String>,
}

/// Main release workflow
///
/// 1. Resolve the revision and stream its history
/// 2. Build the series up to the previous stable release
/// 3. Compute the next release of the requested kind
pub fn run_release_workflow<R: Repository>(
    repo: &R,
    kind: ReleaseKind,
    args: &ReleaseWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let revision = args
        .revision
        .as_deref()
        .unwrap_or(config.repository.revision.as_str());
    let head = repo.resolve(revision)?;
    tracing::info!(?kind, revision, %head, "computing next release");

    let series = Series::from_log(repo.log(revision)?)?;
    let analyzer = ReleaseAnalyzer::new(config.release.clone());

    let outcome: WorkflowOutcome = match kind {
        ReleaseKind::Stable => analyzer.next_stable(&series)?.into(),
        ReleaseKind::Preview => analyzer.next_preview(&series, args.build_num)?.into(),
        ReleaseKind::PullRequest { pr_num } => {
            WorkflowOutcome::PullRequest(analyzer.pull_request(
                pr_num,
                &series.current().sha,
                &args.published_versions,
            )?)
        }
    };

    let tag = match &outcome {
        WorkflowOutcome::Release(release) => Some(config.release.tag_name(&release.version)),
        WorkflowOutcome::PullRequest(_) | WorkflowOutcome::NoRelease(_) => None,
    };

    match &outcome {
        WorkflowOutcome::Release(release) => {
            tracing::info!(
                bump_type = %release.bump_type,
                version = %release.version,
                "release due"
            )
        }
        WorkflowOutcome::PullRequest(version) => {
            tracing::info!(%version, "pull request version")
        }
        WorkflowOutcome::NoRelease(reason) => tracing::info!(%reason, "no release"),
    }

    Ok(WorkflowResult {
        kind,
        series,
        outcome,
        tag,
    })
}

impl From<NextRelease> for WorkflowOutcome {
    fn from(next: NextRelease) -> Self {
        match next {
            NextRelease::Release(release) => WorkflowOutcome::Release(release),
            NextRelease::NoRelease(reason) => WorkflowOutcome::NoRelease(reason),
        }
    }
}
