use std::fmt;

use super::version::{BumpType, Ver};

/// A release that should happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub bump_type: BumpType,
    pub version: Ver,
}

/// Why no release is warranted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoReleaseReason {
    /// Nothing has been committed since the previous stable release
    EmptySeries,
    /// Commits exist, but none of them justify a version bump
    NoMeaningfulChange,
}

impl NoReleaseReason {
    /// Stable machine-readable code
    pub fn as_str(&self) -> &'static str {
        match self {
            NoReleaseReason::EmptySeries => "empty_series",
            NoReleaseReason::NoMeaningfulChange => "no_meaningful_change",
        }
    }
}

impl fmt::Display for NoReleaseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of asking for the next stable or preview release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextRelease {
    Release(Release),
    NoRelease(NoReleaseReason),
}

impl NextRelease {
    pub fn release(&self) -> Option<&Release> {
        match self {
            NextRelease::Release(release) => Some(release),
            NextRelease::NoRelease(_) => None,
        }
    }

    pub fn no_release_reason(&self) -> Option<NoReleaseReason> {
        match self {
            NextRelease::Release(_) => None,
            NextRelease::NoRelease(reason) => Some(*reason),
        }
    }
}
