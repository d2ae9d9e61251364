//! Release series: the window of commits between the last stable release and HEAD
//!
//! The whole window lives in one newest-first buffer. The previous stable
//! commit (when there is one) sits right after the commits of the next stable
//! release, and the previous preview is an index into that same buffer, so
//! every derived commit group is a slice rather than a copy.

use crate::error::{GitReleaseError, Result};

use super::commit::ParsedCommitMessage;
use super::tag::CommitTags;
use super::version::{PreviewVer, StableVer};

/// One commit as handed over by the log source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub sha: String,
    /// Raw message: header, body and footers with their original newlines
    pub message: String,
    pub tags: Vec<String>,
}

impl LogEntry {
    pub fn new(sha: impl Into<String>, message: impl Into<String>, tags: Vec<String>) -> Self {
        LogEntry {
            sha: sha.into(),
            message: message.into(),
            tags,
        }
    }

    /// Whether any of this entry's tags is a stable release version
    pub fn has_stable_tag(&self) -> bool {
        CommitTags::classify(&self.tags).stable.is_some()
    }
}

/// A commit with its message parsed and its tags classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub raw_message: String,
    pub parsed: Option<ParsedCommitMessage>,
    pub tags: CommitTags,
}

impl Commit {
    /// First line of the raw message
    pub fn header(&self) -> &str {
        self.raw_message.lines().next().unwrap_or_default()
    }
}

impl From<LogEntry> for Commit {
    fn from(entry: LogEntry) -> Self {
        let parsed = ParsedCommitMessage::parse(&entry.message);
        let tags = CommitTags::classify(&entry.tags);
        Commit {
            sha: entry.sha,
            raw_message: entry.message,
            parsed,
            tags,
        }
    }
}

/// Commit carrying the stable release tag that bounds the series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StableCommit<'a> {
    pub commit: &'a Commit,
    pub version: &'a StableVer,
}

/// Most recent commit inside the series carrying a preview release tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewCommit<'a> {
    pub commit: &'a Commit,
    pub version: &'a PreviewVer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    /// Newest first: commits in the next stable release, then the previous stable commit if any
    log: Vec<Commit>,
    /// Number of commits in the next stable release; also the previous stable commit's index
    stable_len: usize,
    /// Index of the previous preview commit, always below `stable_len`
    preview_index: Option<usize>,
    has_breaking_change: bool,
    is_initial_development: bool,
}

impl Series {
    /// Build a series from the previous stable entry and everything newer.
    ///
    /// `commits_since_previous_stable` is newest-first and must not contain
    /// `previous_stable`. Fails when there is nothing at all to build from, or
    /// when `previous_stable` has no stable release tag.
    pub fn build(
        previous_stable: Option<LogEntry>,
        commits_since_previous_stable: Vec<LogEntry>,
    ) -> Result<Series> {
        if previous_stable.is_none() && commits_since_previous_stable.is_empty() {
            return Err(GitReleaseError::invariant(
                "cannot build a release series from an empty log",
            ));
        }

        let stable_len = commits_since_previous_stable.len();
        let mut log: Vec<Commit> = Vec::with_capacity(stable_len + 1);
        log.extend(commits_since_previous_stable.into_iter().map(Commit::from));

        let mut previous_stable_version = None;
        if let Some(entry) = previous_stable {
            let commit = Commit::from(entry);
            let Some(version) = commit.tags.stable else {
                return Err(GitReleaseError::invariant(format!(
                    "previous stable commit {} carries no stable release tag",
                    commit.sha
                )));
            };
            previous_stable_version = Some(version);
            log.push(commit);
        }

        let preview_index = log[..stable_len]
            .iter()
            .position(|commit| commit.tags.preview.is_some());

        let has_breaking_change = log[..stable_len].iter().any(|commit| {
            commit
                .parsed
                .as_ref()
                .is_some_and(ParsedCommitMessage::is_breaking_change)
        });

        let is_initial_development =
            previous_stable_version.map_or(true, |v| v.is_initial_development());

        let series = Series {
            log,
            stable_len,
            preview_index,
            has_breaking_change,
            is_initial_development,
        };

        tracing::debug!(
            previous_stable = ?previous_stable_version.map(|v| v.to_string()),
            previous_preview = ?series.previous_preview().map(|p| p.version.to_string()),
            commits_in_next_stable = series.commits_in_next_stable().len(),
            commits_in_next_preview = series.commits_in_next_preview().len(),
            "built release series"
        );

        Ok(series)
    }

    /// Split a newest-first log at the previous stable release and build the series.
    ///
    /// The log is consumed only up to the first stable-tagged entry.
    pub fn from_log<I>(entries: I) -> Result<Series>
    where
        I: IntoIterator<Item = Result<LogEntry>>,
    {
        let (previous_stable, commits) = split_at_previous_stable(entries)?;
        Series::build(previous_stable, commits)
    }

    pub fn previous_stable(&self) -> Option<StableCommit<'_>> {
        let commit = self.log.get(self.stable_len)?;
        let version = commit.tags.stable.as_ref()?;
        Some(StableCommit { commit, version })
    }

    /// Base version for the next stable release
    pub fn previous_stable_version(&self) -> StableVer {
        self.previous_stable()
            .map_or(StableVer::ZERO, |stable| *stable.version)
    }

    pub fn commits_in_next_stable(&self) -> &[Commit] {
        &self.log[..self.stable_len]
    }

    pub fn previous_preview(&self) -> Option<PreviewCommit<'_>> {
        let commit = self.log.get(self.preview_index?)?;
        let version = commit.tags.preview.as_ref()?;
        Some(PreviewCommit { commit, version })
    }

    /// Commits strictly newer than the previous preview.
    ///
    /// Always a prefix of [`Self::commits_in_next_stable`].
    pub fn commits_in_next_preview(&self) -> &[Commit] {
        &self.log[..self.preview_index.unwrap_or(self.stable_len)]
    }

    /// HEAD of the series: the newest commit, or the previous stable commit when nothing is newer
    pub fn current(&self) -> &Commit {
        // Construction guarantees at least one commit in the buffer.
        &self.log[0]
    }

    pub fn has_breaking_change(&self) -> bool {
        self.has_breaking_change
    }

    pub fn is_initial_development(&self) -> bool {
        self.is_initial_development
    }
}

/// Read a newest-first log until the first entry with a stable release tag.
///
/// Returns that entry (or `None` when the history has no stable release) and
/// every entry newer than it. Entries past the boundary are never pulled.
pub fn split_at_previous_stable<I>(entries: I) -> Result<(Option<LogEntry>, Vec<LogEntry>)>
where
    I: IntoIterator<Item = Result<LogEntry>>,
{
    let mut newer = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.has_stable_tag() {
            return Ok((Some(entry), newer));
        }
        newer.push(entry);
    }
    Ok((None, newer))
}
