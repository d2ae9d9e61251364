//! Domain logic - pure release rules independent of git operations

pub mod commit;
pub mod prerelease;
pub mod release;
pub mod series;
pub mod tag;
pub mod version;

pub use commit::{Footer, FooterSeparator, ParsedCommitMessage, TypeKind};
pub use prerelease::{PreRelease, PREVIEW_IDENTIFIER, PULL_REQUEST_IDENTIFIER};
pub use release::{NextRelease, NoReleaseReason, Release};
pub use series::{
    split_at_previous_stable, Commit, LogEntry, PreviewCommit, Series, StableCommit,
};
pub use tag::CommitTags;
pub use version::{next_build_num, BumpType, PreviewVer, PullRequestVer, StableVer, Ver};
