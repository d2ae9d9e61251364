//! Pre-release segment of a version
//!
//! Only the restricted `IDENTIFIER.BUILDNUM` shape is supported, e.g. `next.3`.
//! Anything richer (multiple dot segments, non-numeric build numbers) is not a
//! pre-release this tool produces or consumes.

use std::fmt;

/// Identifier of the shared preview ("next") track
pub const PREVIEW_IDENTIFIER: &str = "next";

/// Identifier reserved for pull-request builds
pub const PULL_REQUEST_IDENTIFIER: &str = "pr";

/// Pre-release segment with its build number
///
/// # Examples
/// - "next.1" -> PreRelease { identifier: "next", build_num: 1 }
/// - "beta.4" -> PreRelease { identifier: "beta", build_num: 4 }
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreRelease {
    /// The pre-release identifier, a run of word characters
    pub identifier: String,
    /// Build number on this identifier's track
    pub build_num: u64,
}

impl PreRelease {
    /// Create a new pre-release segment
    pub fn new(identifier: impl Into<String>, build_num: u64) -> Self {
        PreRelease {
            identifier: identifier.into(),
            build_num,
        }
    }

    /// Same identifier with a different build number
    pub fn with_build_num(&self, build_num: u64) -> Self {
        PreRelease {
            identifier: self.identifier.clone(),
            build_num,
        }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.identifier, self.build_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerelease_display() {
        assert_eq!(PreRelease::new("next", 2).to_string(), "next.2");
        assert_eq!(PreRelease::new("beta", 10).to_string(), "beta.10");
    }

    #[test]
    fn test_prerelease_with_build_num_keeps_identifier() {
        let pr = PreRelease::new("rc", 3).with_build_num(7);
        assert_eq!(pr, PreRelease::new("rc", 7));
    }

    #[test]
    fn test_prerelease_inequality_different_identifier() {
        assert_ne!(PreRelease::new("alpha", 1), PreRelease::new("beta", 1));
    }
}
