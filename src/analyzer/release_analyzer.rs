use crate::config::ReleaseConfig;
use crate::domain::{
    next_build_num, NextRelease, NoReleaseReason, PullRequestVer, Release, Series, Ver,
};
use crate::error::{GitReleaseError, Result};

use super::bump_analyzer::calc_bump_type;

/// Computes next stable, preview and pull-request versions for a series
#[derive(Debug, Clone)]
pub struct ReleaseAnalyzer {
    config: ReleaseConfig,
}

impl ReleaseAnalyzer {
    /// Create a new release analyzer
    pub fn new(config: ReleaseConfig) -> Self {
        ReleaseAnalyzer { config }
    }

    /// Next stable release for the series
    pub fn next_stable(&self, series: &Series) -> Result<NextRelease> {
        let commits = series.commits_in_next_stable();
        if commits.is_empty() {
            return Ok(NextRelease::NoRelease(NoReleaseReason::EmptySeries));
        }

        let Some(bump_type) = calc_bump_type(
            series.is_initial_development(),
            commits.iter().map(|c| &c.raw_message),
        ) else {
            return Ok(NextRelease::NoRelease(NoReleaseReason::NoMeaningfulChange));
        };

        let version = series.previous_stable_version().bump(bump_type)?;
        tracing::debug!(%bump_type, %version, "next stable release");
        Ok(NextRelease::Release(Release {
            bump_type,
            version: Ver::Stable(version),
        }))
    }

    /// Next preview release for the series.
    ///
    /// Only commits newer than the previous preview decide whether a preview is
    /// due; the whole series decides its version. `build_num_override` replaces
    /// the computed build number.
    pub fn next_preview(
        &self,
        series: &Series,
        build_num_override: Option<u64>,
    ) -> Result<NextRelease> {
        if series.commits_in_next_stable().is_empty() {
            return Ok(NextRelease::NoRelease(NoReleaseReason::EmptySeries));
        }

        let is_initial_development = series.is_initial_development();
        let since_preview = calc_bump_type(
            is_initial_development,
            series
                .commits_in_next_preview()
                .iter()
                .map(|c| &c.raw_message),
        );
        if since_preview.is_none() {
            return Ok(NextRelease::NoRelease(NoReleaseReason::NoMeaningfulChange));
        }

        let overall = calc_bump_type(
            is_initial_development,
            series
                .commits_in_next_stable()
                .iter()
                .map(|c| &c.raw_message),
        )
        .ok_or_else(|| {
            GitReleaseError::invariant(
                "commits since the previous preview warrant a bump but the whole series does not",
            )
        })?;

        let next_stable = series.previous_stable_version().bump(overall)?;
        let build_num = match series.previous_preview() {
            Some(preview) => preview.version.build_num().checked_add(1).ok_or_else(|| {
                GitReleaseError::version(format!(
                    "build number after preview {} overflows",
                    preview.version
                ))
            })?,
            None => 1,
        };
        let identifier = self.config.preview_identifier.as_str();
        let mut version = next_stable.to_preview(identifier, build_num);
        if let Some(forced) = build_num_override {
            version = version.with_build_num(forced);
        }

        tracing::debug!(bump_type = %overall, %version, "next preview release");
        Ok(NextRelease::Release(Release {
            bump_type: overall,
            version: Ver::Preview(version),
        }))
    }

    /// Pull-request version for `sha`, numbered after the builds already published for `pr_num`
    pub fn pull_request<I, S>(
        &self,
        pr_num: u64,
        sha: &str,
        published_versions: I,
    ) -> Result<PullRequestVer>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefix = PullRequestVer::prefix(pr_num);
        let build_num = next_build_num(&prefix, published_versions)?;
        let version = PullRequestVer::new(pr_num, build_num, sha, self.config.short_sha_length);
        tracing::debug!(pr_num, build_num, %version, "pull request version");
        Ok(version)
    }
}

impl Default for ReleaseAnalyzer {
    fn default() -> Self {
        ReleaseAnalyzer::new(ReleaseConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BumpType, LogEntry};

    fn entry(sha: &str, message: &str, tags: &[&str]) -> LogEntry {
        LogEntry::new(sha, message, tags.iter().map(|t| t.to_string()).collect())
    }

    fn version_of(next: &NextRelease) -> String {
        next.release().unwrap().version.to_string()
    }

    #[test]
    fn test_empty_series() {
        let analyzer = ReleaseAnalyzer::default();
        let series =
            Series::build(Some(entry("s", "feat: x", &["v1.0.0"])), Vec::new()).unwrap();

        assert_eq!(
            analyzer.next_stable(&series).unwrap(),
            NextRelease::NoRelease(NoReleaseReason::EmptySeries)
        );
        assert_eq!(
            analyzer.next_preview(&series, None).unwrap(),
            NextRelease::NoRelease(NoReleaseReason::EmptySeries)
        );
    }

    #[test]
    fn test_no_meaningful_change() {
        let analyzer = ReleaseAnalyzer::default();
        let series = Series::build(
            Some(entry("s", "feat: x", &["v1.0.0"])),
            vec![entry("c2", "chore: deps", &[]), entry("c1", "WIP", &[])],
        )
        .unwrap();

        assert_eq!(
            analyzer.next_stable(&series).unwrap().no_release_reason(),
            Some(NoReleaseReason::NoMeaningfulChange)
        );
        assert_eq!(
            analyzer.next_preview(&series, None).unwrap().no_release_reason(),
            Some(NoReleaseReason::NoMeaningfulChange)
        );
    }

    #[test]
    fn test_stable_major_after_one_dot_oh() {
        let analyzer = ReleaseAnalyzer::default();
        let series = Series::build(
            Some(entry("s", "feat: x", &["v1.2.3"])),
            vec![entry("c1", "feat: y\n\nBREAKING CHANGE: z", &[])],
        )
        .unwrap();

        let next = analyzer.next_stable(&series).unwrap();
        assert_eq!(next.release().unwrap().bump_type, BumpType::Major);
        assert_eq!(version_of(&next), "2.0.0");
    }

    #[test]
    fn test_stable_breaking_during_initial_development() {
        let analyzer = ReleaseAnalyzer::default();
        let series = Series::build(
            Some(entry("s", "feat: x", &["v0.4.1"])),
            vec![entry("c1", "feat!: rework", &[])],
        )
        .unwrap();
        assert_eq!(version_of(&analyzer.next_stable(&series).unwrap()), "0.5.0");
    }

    #[test]
    fn test_preview_nothing_new_since_last_preview() {
        let analyzer = ReleaseAnalyzer::default();
        let series = Series::build(
            Some(entry("s", "feat: x", &["v1.0.0"])),
            vec![
                entry("c2", "chore: after preview", &[]),
                entry("c1", "feat: previewed", &["1.1.0-next.1"]),
            ],
        )
        .unwrap();

        assert_eq!(version_of(&analyzer.next_stable(&series).unwrap()), "1.1.0");
        assert_eq!(
            analyzer.next_preview(&series, None).unwrap().no_release_reason(),
            Some(NoReleaseReason::NoMeaningfulChange)
        );
    }

    #[test]
    fn test_preview_uses_whole_series_for_version() {
        let analyzer = ReleaseAnalyzer::default();
        let series = Series::build(
            Some(entry("s", "feat: x", &["v1.0.0"])),
            vec![
                entry("c2", "fix: after preview", &[]),
                entry("c1", "feat: previewed", &["1.1.0-next.3"]),
            ],
        )
        .unwrap();

        let next = analyzer.next_preview(&series, None).unwrap();
        let release = next.release().unwrap();
        assert_eq!(release.bump_type, BumpType::Minor);
        assert_eq!(release.version.to_string(), "1.1.0-next.4");
    }

    #[test]
    fn test_preview_build_num_override() {
        let analyzer = ReleaseAnalyzer::default();
        let series = Series::build(None, vec![entry("c1", "fix: 1", &[])]).unwrap();

        let next = analyzer.next_preview(&series, Some(17)).unwrap();
        assert_eq!(version_of(&next), "0.0.1-next.17");
    }

    #[test]
    fn test_preview_custom_identifier() {
        let analyzer = ReleaseAnalyzer::new(ReleaseConfig {
            preview_identifier: "beta".to_string(),
            ..ReleaseConfig::default()
        });
        let series = Series::build(None, vec![entry("c1", "feat: 1", &[])]).unwrap();

        assert_eq!(
            version_of(&analyzer.next_preview(&series, None).unwrap()),
            "0.1.0-beta.1"
        );
    }

    #[test]
    fn test_stable_version_overflow() {
        let analyzer = ReleaseAnalyzer::default();
        let series = Series::build(
            Some(entry("s", "feat: x", &["18446744073709551615.0.0"])),
            vec![entry("c1", "fix: y\n\nBREAKING CHANGE: z", &[])],
        )
        .unwrap();

        let err = analyzer.next_stable(&series).unwrap_err();
        assert!(matches!(err, GitReleaseError::Version(_)));
    }

    #[test]
    fn test_preview_build_num_overflow() {
        let analyzer = ReleaseAnalyzer::default();
        let series = Series::build(
            None,
            vec![
                entry("c2", "fix: after preview", &[]),
                entry("c1", "fix: previewed", &["0.0.1-next.18446744073709551615"]),
            ],
        )
        .unwrap();

        let err = analyzer.next_preview(&series, None).unwrap_err();
        assert!(matches!(err, GitReleaseError::Version(_)));
    }

    #[test]
    fn test_pull_request_version() {
        let analyzer = ReleaseAnalyzer::default();
        let published = ["0.0.0-pr.5.1.aaaaaaa", "0.0.0-pr.5.2.bbbbbbb", "1.0.0"];

        let version = analyzer.pull_request(5, "0123456789abcdef", published).unwrap();
        assert_eq!(version.to_string(), "0.0.0-pr.5.3.0123456");

        let none: [&str; 0] = [];
        let first = analyzer.pull_request(6, "fedcba9876543210", none).unwrap();
        assert_eq!(first.to_string(), "0.0.0-pr.6.1.fedcba9");
    }
}
