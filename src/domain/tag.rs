use super::version::{PreviewVer, StableVer, Ver};

/// Release tags found on a single commit
///
/// A commit is expected to carry at most one stable and one preview tag.
/// When that does not hold, the first one of each kind wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitTags {
    pub stable: Option<StableVer>,
    pub preview: Option<PreviewVer>,
    /// Tags that are not release versions, kept for display only
    pub other: Vec<String>,
}

impl CommitTags {
    /// Classify raw tag names as stable, preview or unrelated
    pub fn classify<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classified = CommitTags::default();

        for tag in tags {
            let tag = tag.as_ref();
            match Ver::parse(tag) {
                Some(Ver::Stable(v)) => {
                    if classified.stable.is_none() {
                        classified.stable = Some(v);
                    } else {
                        tracing::debug!(tag, "ignoring duplicate stable tag on commit");
                    }
                }
                Some(Ver::Preview(v)) => {
                    if classified.preview.is_none() {
                        classified.preview = Some(v);
                    } else {
                        tracing::debug!(tag, "ignoring duplicate preview tag on commit");
                    }
                }
                Some(Ver::PullRequest(_)) | None => classified.other.push(tag.to_string()),
            }
        }

        classified
    }
}
