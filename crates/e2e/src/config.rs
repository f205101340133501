//! Environment-backed configuration
//!
//! All knobs come from `HN_E2E_*` environment variables. Values are
//! parsed strictly: invalid UTF-8 or an empty string fails closed
//! instead of being silently ignored.

use std::time::Duration;

use crate::error::{E2eError, E2eResult};
use crate::wait::WaitConfig;

/// Default site under test.
pub const DEFAULT_BASE_URL: &str = "https://news.ycombinator.com";

/// Environment variables consumed by the checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvVar {
    /// Account identifier for the auth round trip.
    Username,
    /// Account secret for the auth round trip.
    Password,
    /// Optional base URL override.
    BaseUrl,
    /// Launch a visible browser (`1`/`true`).
    Headful,
    /// Per-wait timeout override in seconds (positive integer).
    TimeoutSeconds,
}

impl EnvVar {
    /// Canonical environment variable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "HN_E2E_USERNAME",
            Self::Password => "HN_E2E_PASSWORD",
            Self::BaseUrl => "HN_E2E_BASE_URL",
            Self::Headful => "HN_E2E_HEADFUL",
            Self::TimeoutSeconds => "HN_E2E_TIMEOUT_SEC",
        }
    }
}

/// Login credentials for the auth round trip.
///
/// Never logged and never persisted; they are only typed into the
/// site's login form.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read the credential pair from the environment.
    ///
    /// Returns `Ok(None)` when neither variable is set (the auth test
    /// skips). Setting only one of the two is a configuration error.
    pub fn from_env() -> E2eResult<Option<Self>> {
        let username = read_env_nonempty(EnvVar::Username.as_str())?;
        let password = read_env_nonempty(EnvVar::Password.as_str())?;
        match (username, password) {
            (Some(username), Some(password)) => Ok(Some(Self { username, password })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(E2eError::Config(format!(
                "{} is set but {} is not",
                EnvVar::Username.as_str(),
                EnvVar::Password.as_str()
            ))),
            (None, Some(_)) => Err(E2eError::Config(format!(
                "{} is set but {} is not",
                EnvVar::Password.as_str(),
                EnvVar::Username.as_str()
            ))),
        }
    }
}

/// Run-time configuration for both checks.
#[derive(Debug, Clone)]
pub struct E2eConfig {
    /// Base URL of the site under test, no trailing slash.
    pub base_url: String,
    /// Launch a visible browser instead of headless.
    pub headful: bool,
    /// Polling wait parameters.
    pub wait: WaitConfig,
}

impl Default for E2eConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headful: false,
            wait: WaitConfig::default(),
        }
    }
}

impl E2eConfig {
    /// Load configuration from the environment, applying defaults for
    /// anything unset.
    pub fn from_env() -> E2eResult<Self> {
        let base_url = read_env_nonempty(EnvVar::BaseUrl.as_str())?
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let headful = parse_bool(
            EnvVar::Headful.as_str(),
            read_env_nonempty(EnvVar::Headful.as_str())?,
        )?;

        let wait = match read_env_nonempty(EnvVar::TimeoutSeconds.as_str())? {
            Some(raw) => {
                let secs = parse_positive_secs(EnvVar::TimeoutSeconds.as_str(), &raw)?;
                WaitConfig::with_timeout(Duration::from_secs(secs))
            }
            None => WaitConfig::default(),
        };

        Ok(Self {
            base_url,
            headful,
            wait,
        })
    }
}

/// Read an environment variable, rejecting invalid UTF-8 and values
/// that are empty or whitespace.
fn read_env_nonempty(name: &str) -> E2eResult<Option<String>> {
    let Some(raw) = std::env::var_os(name) else {
        return Ok(None);
    };
    let value = raw
        .into_string()
        .map_err(|_| E2eError::Config(format!("{name} must be valid UTF-8")))?;
    if value.trim().is_empty() {
        return Err(E2eError::Config(format!("{name} is set but empty")));
    }
    Ok(Some(value))
}

fn parse_bool(name: &str, value: Option<String>) -> E2eResult<bool> {
    match value.as_deref() {
        None => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some("0") | Some("false") => Ok(false),
        Some(other) => Err(E2eError::Config(format!(
            "{name} must be one of 1/0/true/false, got {other:?}"
        ))),
    }
}

fn parse_positive_secs(name: &str, value: &str) -> E2eResult<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(E2eError::Config(format!(
            "{name} must be a positive integer number of seconds, got {value:?}"
        ))),
    }
}
