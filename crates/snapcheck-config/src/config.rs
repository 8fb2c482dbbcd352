// crates/snapcheck-config/src/config.rs
// ============================================================================
// Module: Snapcheck Configuration
// Description: Configuration loading and validation for Snapcheck.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: snapcheck-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Unknown fields, out-of-range limits, and malformed update-switch values
//! fail closed. The `SNAPCHECK_UPDATE` environment variable overrides the
//! configured update mode the same way golden fixtures are regenerated in CI.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use snapcheck_core::MAX_CONTENT_DEPTH;
use snapcheck_core::MatchLimits;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "snapcheck.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SNAPCHECK_CONFIG";
/// Environment variable used to override the update mode.
pub const UPDATE_ENV_VAR: &str = "SNAPCHECK_UPDATE";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum fixture size in bytes.
pub(crate) const DEFAULT_FIXTURE_MAX_BYTES: usize = 1024 * 1024;
/// Maximum configurable fixture size in bytes.
pub(crate) const MAX_FIXTURE_MAX_BYTES: usize = 16 * 1024 * 1024;
/// Default maximum reported mismatches per verification.
pub(crate) const DEFAULT_MAX_MISMATCHES: usize = 256;
/// Maximum configurable reported mismatches per verification.
pub(crate) const MAX_MAX_MISMATCHES: usize = 10_000;
/// Default fixture path relative to the workspace root.
const DEFAULT_FIXTURE_PATH: &str = "system-tests/tests/fixtures/search_domain.snapshot.json";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Fixture Config
// ============================================================================

/// Fixture location and parsing limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Path of the committed fixture file.
    #[serde(default = "default_fixture_path")]
    pub path: PathBuf,
    /// Maximum fixture size in bytes.
    #[serde(default = "default_fixture_max_bytes")]
    pub max_bytes: usize,
    /// Maximum recorded-content nesting depth.
    #[serde(default = "default_max_content_depth")]
    pub max_content_depth: usize,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            path: default_fixture_path(),
            max_bytes: default_fixture_max_bytes(),
            max_content_depth: default_max_content_depth(),
        }
    }
}

impl FixtureConfig {
    /// Validates fixture path and limit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a limit is out of range or the path is
    /// empty, oversized, or escapes upward.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fixture_path(&self.path)?;
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid("fixture.max_bytes must be >= 1".to_string()));
        }
        if self.max_bytes > MAX_FIXTURE_MAX_BYTES {
            return Err(ConfigError::Invalid(format!(
                "fixture.max_bytes must be <= {MAX_FIXTURE_MAX_BYTES}"
            )));
        }
        if self.max_content_depth == 0 {
            return Err(ConfigError::Invalid(
                "fixture.max_content_depth must be >= 1".to_string(),
            ));
        }
        if self.max_content_depth > MAX_CONTENT_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "fixture.max_content_depth must be <= {MAX_CONTENT_DEPTH}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Verify Config
// ============================================================================

/// Verification reporting limits and the update switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyConfig {
    /// Maximum reported mismatches per verification.
    #[serde(default = "default_max_mismatches")]
    pub max_mismatches: usize,
    /// Whether recording overwrites existing records by default.
    #[serde(default)]
    pub update: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            max_mismatches: default_max_mismatches(),
            update: false,
        }
    }
}

impl VerifyConfig {
    /// Validates verification limit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a limit is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_mismatches == 0 {
            return Err(ConfigError::Invalid("verify.max_mismatches must be >= 1".to_string()));
        }
        if self.max_mismatches > MAX_MAX_MISMATCHES {
            return Err(ConfigError::Invalid(format!(
                "verify.max_mismatches must be <= {MAX_MAX_MISMATCHES}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Top-Level Config
// ============================================================================

/// Canonical Snapcheck configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapcheckConfig {
    /// Fixture location and parsing limits.
    #[serde(default)]
    pub fixture: FixtureConfig,
    /// Verification reporting limits and the update switch.
    #[serde(default)]
    pub verify: VerifyConfig,
}

impl SnapcheckConfig {
    /// Loads configuration from `path`, the `SNAPCHECK_CONFIG` environment
    /// variable, or the default filename, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, exceeds the
    /// size limit, fails to parse, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fixture.validate()?;
        self.verify.validate()?;
        Ok(())
    }

    /// Returns the matching limits implied by this configuration.
    #[must_use]
    pub const fn match_limits(&self) -> MatchLimits {
        MatchLimits {
            max_mismatches: self.verify.max_mismatches,
            max_depth: self.fixture.max_content_depth,
        }
    }

    /// Resolves the effective update mode, honoring `SNAPCHECK_UPDATE`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the environment value is neither `0`
    /// nor `1`.
    pub fn resolve_update_mode(&self) -> Result<bool, ConfigError> {
        let env_value = env::var(UPDATE_ENV_VAR).ok();
        match update_mode_from(env_value.as_deref())? {
            Some(update) => Ok(update),
            None => Ok(self.verify.update),
        }
    }
}

/// Parses an update-switch value: `1` enables, `0` disables, absent defers.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for any other value.
pub fn update_mode_from(value: Option<&str>) -> Result<Option<bool>, ConfigError> {
    match value {
        None => Ok(None),
        Some("1") => Ok(Some(true)),
        Some("0") => Ok(Some(false)),
        Some(other) => Err(ConfigError::Invalid(format!(
            "{UPDATE_ENV_VAR} must be 0 or 1, found {other:?}"
        ))),
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default fixture path.
fn default_fixture_path() -> PathBuf {
    PathBuf::from(DEFAULT_FIXTURE_PATH)
}

/// Default fixture size limit.
const fn default_fixture_max_bytes() -> usize {
    DEFAULT_FIXTURE_MAX_BYTES
}

/// Default content depth limit.
const fn default_max_content_depth() -> usize {
    MAX_CONTENT_DEPTH
}

/// Default mismatch report cap.
const fn default_max_mismatches() -> usize {
    DEFAULT_MAX_MISMATCHES
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against size limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates the fixture path: non-empty, bounded, and never escaping upward.
fn validate_fixture_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("fixture.path must not be empty".to_string()));
    }
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("fixture.path exceeds max length".to_string()));
    }
    for component in path.components() {
        if matches!(component, Component::ParentDir) {
            return Err(ConfigError::Invalid(
                "fixture.path must not contain parent traversal".to_string(),
            ));
        }
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("fixture.path component too long".to_string()));
        }
    }
    Ok(())
}
