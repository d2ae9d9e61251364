use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{GitReleaseError, Result};

use super::prerelease::{PreRelease, PULL_REQUEST_IDENTIFIER};

/// Accepted version grammar: `MAJOR.MINOR.PATCH[-IDENTIFIER.BUILDNUM]`, optional leading `v`.
/// Digits and identifier characters are ASCII only.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?([0-9]+)\.([0-9]+)\.([0-9]+)(?:-((?-u:\w)+)\.([0-9]+))?$")
        .expect("version regex is valid")
});

/// Version bump type decision
///
/// Variants are declared in ascending severity so `Ord` gives `Major > Minor > Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpType::Major => "major",
            BumpType::Minor => "minor",
            BumpType::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// Stable release version, no pre-release segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StableVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl StableVer {
    /// Implicit base when no stable release exists yet
    pub const ZERO: StableVer = StableVer::new(0, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        StableVer {
            major,
            minor,
            patch,
        }
    }

    /// Bump version according to bump type
    ///
    /// Fails when the bumped component is already `u64::MAX`.
    pub fn bump(&self, bump_type: BumpType) -> Result<Self> {
        let bumped = match bump_type {
            BumpType::Major => self.major.checked_add(1).map(|major| StableVer::new(major, 0, 0)),
            BumpType::Minor => self
                .minor
                .checked_add(1)
                .map(|minor| StableVer::new(self.major, minor, 0)),
            BumpType::Patch => self
                .patch
                .checked_add(1)
                .map(|patch| StableVer::new(self.major, self.minor, patch)),
        };

        bumped.ok_or_else(|| {
            GitReleaseError::version(format!("{} bump of {} overflows", bump_type, self))
        })
    }

    /// Attach a pre-release segment, e.g. `1.2.0` -> `1.2.0-next.3`
    pub fn to_preview(&self, identifier: impl Into<String>, build_num: u64) -> PreviewVer {
        PreviewVer::new(*self, PreRelease::new(identifier, build_num))
    }

    /// Whether this version is still in initial development (`0.x.y`)
    pub fn is_initial_development(&self) -> bool {
        self.major < 1
    }
}

impl fmt::Display for StableVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Pre-release version on an `IDENTIFIER.BUILDNUM` track
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewVer {
    pub base: StableVer,
    pub pre_release: PreRelease,
}

impl PreviewVer {
    pub fn new(base: StableVer, pre_release: PreRelease) -> Self {
        PreviewVer { base, pre_release }
    }

    /// Copy with the build number replaced
    pub fn with_build_num(&self, build_num: u64) -> Self {
        PreviewVer {
            base: self.base,
            pre_release: self.pre_release.with_build_num(build_num),
        }
    }

    pub fn build_num(&self) -> u64 {
        self.pre_release.build_num
    }
}

impl fmt::Display for PreviewVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.pre_release)
    }
}

/// Ephemeral pull-request build: `0.0.0-pr.<pr_num>.<build_num>.<short_sha>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRequestVer {
    pub pr_num: u64,
    pub build_num: u64,
    pub short_sha: String,
}

impl PullRequestVer {
    /// Create a pull-request version, truncating `sha` to `short_sha_len` characters
    pub fn new(pr_num: u64, build_num: u64, sha: &str, short_sha_len: usize) -> Self {
        PullRequestVer {
            pr_num,
            build_num,
            short_sha: sha.chars().take(short_sha_len).collect(),
        }
    }

    /// Prefix shared by every published build of one pull request, e.g. `0.0.0-pr.12.`
    pub fn prefix(pr_num: u64) -> String {
        format!("{}-{}.{}.", StableVer::ZERO, PULL_REQUEST_IDENTIFIER, pr_num)
    }
}

impl fmt::Display for PullRequestVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}",
            PullRequestVer::prefix(self.pr_num),
            self.build_num,
            self.short_sha
        )
    }
}

/// Any version this tool reads or produces
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ver {
    Stable(StableVer),
    Preview(PreviewVer),
    PullRequest(PullRequestVer),
}

impl Ver {
    /// Parse a version or tag name.
    ///
    /// Returns `None` for anything outside the restricted grammar, including
    /// multi-segment pre-releases (so pull-request versions never parse back).
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!(Ver::parse("v1.2.3"), Some(Ver::Stable(StableVer::new(1, 2, 3))));
    /// assert!(Ver::parse("1.2").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Ver> {
        let captures = VERSION_RE.captures(text)?;
        let base = StableVer::new(
            captures[1].parse().ok()?,
            captures[2].parse().ok()?,
            captures[3].parse().ok()?,
        );

        match (captures.get(4), captures.get(5)) {
            (Some(identifier), Some(build_num)) => Some(Ver::Preview(PreviewVer::new(
                base,
                PreRelease::new(identifier.as_str(), build_num.as_str().parse().ok()?),
            ))),
            _ => Some(Ver::Stable(base)),
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, Ver::Stable(_))
    }

    pub fn is_preview(&self) -> bool {
        !self.is_stable()
    }
}

impl fmt::Display for Ver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ver::Stable(v) => write!(f, "{}", v),
            Ver::Preview(v) => write!(f, "{}", v),
            Ver::PullRequest(v) => write!(f, "{}", v),
        }
    }
}

impl From<StableVer> for Ver {
    fn from(v: StableVer) -> Self {
        Ver::Stable(v)
    }
}

impl From<PreviewVer> for Ver {
    fn from(v: PreviewVer) -> Self {
        Ver::Preview(v)
    }
}

impl From<PullRequestVer> for Ver {
    fn from(v: PullRequestVer) -> Self {
        Ver::PullRequest(v)
    }
}

/// Next build number given versions already published under `prefix`.
///
/// For each version starting with `prefix`, the segment right after it (up to
/// the next `.` or end of string) must be all digits to count. Returns the
/// highest such number plus one, or 1 when nothing matches. Fails when the
/// highest build number is already `u64::MAX`.
///
/// # Example
/// ```ignore
/// let published = ["0.0.0-pr.7.1.abc1234", "0.0.0-pr.7.2.def5678", "0.0.0-pr.8.9.0000000"];
/// assert_eq!(next_build_num("0.0.0-pr.7.", published).unwrap(), 3);
/// ```
pub fn next_build_num<I, S>(prefix: &str, existing_versions: I) -> Result<u64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let highest = existing_versions
        .into_iter()
        .filter_map(|version| {
            let rest = version.as_ref().strip_prefix(prefix)?;
            let segment = rest.split('.').next()?;
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            segment.parse::<u64>().ok()
        })
        .max();

    match highest {
        None => Ok(1),
        Some(highest) => highest.checked_add(1).ok_or_else(|| {
            GitReleaseError::version(format!("build number after {}{} overflows", prefix, highest))
        }),
    }
}
