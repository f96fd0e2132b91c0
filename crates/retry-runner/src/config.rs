//! Configuration for the stock retry policy

#[cfg(feature = "env")]
use crate::error::ConfigError;
use crate::retry::{DefaultPolicy, RetryDecision};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding [`BackoffConfig::max_retries`].
pub const ENV_MAX_RETRIES: &str = "RETRY_MAX_RETRIES";

/// Environment variable overriding [`BackoffConfig::default_delay`], in milliseconds.
pub const ENV_DEFAULT_DELAY_MS: &str = "RETRY_DEFAULT_DELAY_MS";

/// Environment variable overriding [`BackoffConfig::max_delay`], in milliseconds.
pub const ENV_MAX_DELAY_MS: &str = "RETRY_MAX_DELAY_MS";

/// Settings for [`DefaultPolicy`] and for capped retry decisions.
///
/// The runner itself has no attempt limit; these values only shape the stock
/// policy. Durations are (de)serialized as whole milliseconds.
///
/// # Examples
///
/// ```rust
/// use retry_runner::BackoffConfig;
/// use std::time::Duration;
///
/// let config = BackoffConfig::default()
///     .with_max_retries(3)
///     .with_default_delay(Duration::from_millis(200));
///
/// let policy = config.policy();
/// assert_eq!(policy.max_retries(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Failures the default policy retries before giving up
    pub max_retries: u32,

    /// Base delay the default policy asks for
    #[serde(rename = "default_delay_ms", with = "millis")]
    pub default_delay: Duration,

    /// Ceiling for any base delay built through this config
    #[serde(rename = "max_delay_ms", with = "millis")]
    pub max_delay: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            default_delay: Duration::from_millis(50),
            max_delay: RetryDecision::MAX_DELAY,
        }
    }
}

impl BackoffConfig {
    /// Set the number of retries the default policy allows.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay the default policy asks for.
    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Set the ceiling for base delays.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Build the stock policy from these settings.
    pub fn policy(&self) -> DefaultPolicy {
        DefaultPolicy::new(self)
    }

    /// A retry decision for `delay`, capped at [`BackoffConfig::max_delay`].
    pub fn retry_after(&self, delay: Duration) -> RetryDecision {
        RetryDecision::after(delay.min(self.max_delay))
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    /// This will look for:
    /// - `RETRY_MAX_RETRIES` for the retry limit of the default policy
    /// - `RETRY_DEFAULT_DELAY_MS` for its base delay
    /// - `RETRY_MAX_DELAY_MS` for the delay ceiling
    ///
    /// Unset variables keep their defaults; malformed ones are an error.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Some(max_retries) = parse_var::<u32>(ENV_MAX_RETRIES)? {
            config.max_retries = max_retries;
        }

        if let Some(ms) = parse_var::<u64>(ENV_DEFAULT_DELAY_MS)? {
            config.default_delay = Duration::from_millis(ms);
        }

        if let Some(ms) = parse_var::<u64>(ENV_MAX_DELAY_MS)? {
            config.max_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

#[cfg(feature = "env")]
fn parse_var<T>(var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let Ok(value) = std::env::var(var) else {
        return Ok(None);
    };

    let parsed = value.trim().parse();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(source) => Err(ConfigError::InvalidValue { var, value, source }),
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
