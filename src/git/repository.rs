use git2::{Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::git::{LogEntry, LogIter};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Tag names grouped by the commit they point at, lightweight and annotated alike
    fn tags_by_commit(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut tags: HashMap<Oid, Vec<String>> = HashMap::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => tags.entry(commit.id()).or_default().push(name.to_string()),
                // Tags on trees or blobs cannot bound a release series
                Err(e) => tracing::debug!(tag = name, error = %e, "skipping non-commit tag"),
            }
        }

        Ok(tags)
    }
}

impl super::Repository for Git2Repository {
    fn resolve(&self, revision: &str) -> Result<String> {
        let commit = self.repo.revparse_single(revision)?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn log(&self, revision: &str) -> Result<LogIter<'_>> {
        let start = self.repo.revparse_single(revision)?.peel_to_commit()?.id();
        let mut tags = self.tags_by_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(start)?;

        tracing::debug!(revision, start = %start, "walking commit log");

        let repo = &self.repo;
        Ok(Box::new(revwalk.map(move |oid_result| -> Result<LogEntry> {
            let oid = oid_result?;
            let commit = repo.find_commit(oid)?;
            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

            Ok(LogEntry {
                sha: oid.to_string(),
                message,
                tags: tags.remove(&oid).unwrap_or_default(),
            })
        })))
    }
}
