use crate::error::{GitReleaseError, Result};
use crate::git::{LogEntry, LogIter, Repository};

/// Mock repository for testing without actual git operations
///
/// Holds a single linear history, newest first.
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    commits: Vec<LogEntry>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository::default()
    }

    /// Commit on top of the current history
    pub fn commit(&mut self, sha: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.commits.insert(0, LogEntry::new(sha, message, Vec::new()));
        self
    }

    /// Tag the commit with the given sha
    pub fn add_tag(&mut self, sha: &str, tag: impl Into<String>) -> Result<&mut Self> {
        let entry = self
            .commits
            .iter_mut()
            .find(|entry| entry.sha == sha)
            .ok_or_else(|| not_found(&format!("no commit {} to tag", sha)))?;
        entry.tags.push(tag.into());
        Ok(self)
    }

    /// Tag the newest commit
    pub fn tag_head(&mut self, tag: impl Into<String>) -> Result<&mut Self> {
        let sha = self
            .commits
            .first()
            .map(|entry| entry.sha.clone())
            .ok_or_else(|| not_found("cannot tag an empty history"))?;
        self.add_tag(&sha, tag)
    }

    fn position(&self, revision: &str) -> Result<usize> {
        if revision == "HEAD" && !self.commits.is_empty() {
            return Ok(0);
        }
        self.commits
            .iter()
            .position(|entry| entry.sha == revision || entry.tags.iter().any(|t| t == revision))
            .ok_or_else(|| not_found(&format!("revspec '{}' not found", revision)))
    }
}

/// Same error shape the real repository reports
fn not_found(message: &str) -> GitReleaseError {
    git2::Error::new(git2::ErrorCode::NotFound, git2::ErrorClass::Reference, message).into()
}

impl Repository for MockRepository {
    fn resolve(&self, revision: &str) -> Result<String> {
        let position = self.position(revision)?;
        Ok(self.commits[position].sha.clone())
    }

    fn log(&self, revision: &str) -> Result<LogIter<'_>> {
        let position = self.position(revision)?;
        let entries = self.commits[position..]
            .iter()
            .cloned()
            .map(Ok::<_, GitReleaseError>);
        Ok(Box::new(entries))
    }
}
