use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Ver, PULL_REQUEST_IDENTIFIER};
use crate::error::{GitReleaseError, Result};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gitrelease.toml";

/// Represents the complete configuration for git-release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

fn default_preview_identifier() -> String {
    crate::domain::PREVIEW_IDENTIFIER.to_string()
}

fn default_short_sha_length() -> usize {
    7
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_revision() -> String {
    "HEAD".to_string()
}

/// How release versions are rendered.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Identifier of the preview track, as in `1.2.0-next.3`
    #[serde(default = "default_preview_identifier")]
    pub preview_identifier: String,

    /// Number of sha characters in pull-request versions
    #[serde(default = "default_short_sha_length")]
    pub short_sha_length: usize,

    /// Prepended to a version to form its git tag name
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            preview_identifier: default_preview_identifier(),
            short_sha_length: default_short_sha_length(),
            tag_prefix: default_tag_prefix(),
        }
    }
}

impl ReleaseConfig {
    /// Git tag name for a release version, e.g. `v1.2.3`
    pub fn tag_name(&self, version: &Ver) -> String {
        format!("{}{}", self.tag_prefix, version)
    }
}

/// Where the commit history is read from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    /// Revision the series ends at
    #[serde(default = "default_revision")]
    pub revision: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            revision: default_revision(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce versions this tool cannot read back
    pub fn validate(&self) -> Result<()> {
        let identifier = &self.release.preview_identifier;
        if identifier.is_empty()
            || !identifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(GitReleaseError::config(format!(
                "preview_identifier '{}' must be a non-empty run of ASCII letters, digits or '_'",
                identifier
            )));
        }
        if identifier == PULL_REQUEST_IDENTIFIER {
            return Err(GitReleaseError::config(format!(
                "preview_identifier '{}' is reserved for pull-request builds",
                identifier
            )));
        }

        if !(1..=40).contains(&self.release.short_sha_length) {
            return Err(GitReleaseError::config(format!(
                "short_sha_length must be between 1 and 40, got {}",
                self.release.short_sha_length
            )));
        }

        if !self.release.tag_prefix.is_empty() && self.release.tag_prefix != "v" {
            tracing::warn!(
                tag_prefix = %self.release.tag_prefix,
                "tags with this prefix will not be recognised as releases on the next run"
            );
        }

        if self.repository.revision.trim().is_empty() {
            return Err(GitReleaseError::config("revision must not be empty"));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let Some(path) = locate_config(config_path) else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path)?;
    Config::from_toml(&config_str)
}

fn locate_config(config_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join(format!(".{}", CONFIG_FILE_NAME));
    user.exists().then_some(user)
}
