//! Git log source abstraction
//!
//! The release core only needs a newest-first stream of commits with their
//! tags. [Repository] supplies that stream; the implementations are:
//!
//! - [repository::Git2Repository]: reads a real repository through the `git2` crate
//! - [mock::MockRepository]: an in-memory log for tests
//!
//! The stream is lazy, so building a series stops reading history at the
//! previous stable release.
//!
//! ```rust
//! # use git_release::git::Repository;
//! # use git_release::domain::Series;
//! # fn example<R: Repository>(repo: &R) -> git_release::Result<()> {
//! let series = Series::from_log(repo.log("HEAD")?)?;
//! println!("{} commits since the last stable release", series.commits_in_next_stable().len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

pub use crate::domain::LogEntry;
use crate::error::Result;

/// Newest-first, lazily produced commit log
pub type LogIter<'a> = Box<dyn Iterator<Item = Result<LogEntry>> + 'a>;

/// Common log source trait
///
/// ## Error Handling
///
/// Implementations map their underlying errors (like `git2::Error`) into
/// [crate::error::GitReleaseError]. Errors while walking the history are
/// yielded as items of the log iterator.
pub trait Repository {
    /// Resolve a revision (e.g. "HEAD", a branch or a sha) to a full commit sha
    fn resolve(&self, revision: &str) -> Result<String>;

    /// Walk history from `revision`, newest first, with the tags pointing at each commit
    ///
    /// # Errors
    /// Fails up front if the revision does not resolve to a commit.
    fn log(&self, revision: &str) -> Result<LogIter<'_>>;
}
