/// Configuration for status post lifetimes
///
/// Values are read from `STATUS_POST_*` environment variables. The expiring-badge
/// and label thresholds are fixed by the policy and are not configurable.
use crate::error::{ExpirationError, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "STATUS_POST_";

/// Hard ceiling on any configured lifetime (366 days)
pub const LIFETIME_CEILING_SECS: i64 = 366 * 24 * 60 * 60;

/// Status post lifetime settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpirationConfig {
    /// Lifetime applied to a status update when the author does not pick one
    #[serde(default = "default_lifetime_secs")]
    pub default_lifetime_secs: i64,
    /// Upper bound on any ephemeral post lifetime
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: i64,
}

fn default_lifetime_secs() -> i64 {
    24 * 60 * 60
}

fn default_max_lifetime_secs() -> i64 {
    7 * 24 * 60 * 60
}

impl Default for ExpirationConfig {
    fn default() -> Self {
        Self {
            default_lifetime_secs: default_lifetime_secs(),
            max_lifetime_secs: default_max_lifetime_secs(),
        }
    }
}

impl ExpirationConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config: Self = envy::prefixed(ENV_PREFIX).from_env()?;
        config.validate()?;

        tracing::info!(
            default_lifetime_secs = config.default_lifetime_secs,
            max_lifetime_secs = config.max_lifetime_secs,
            "Loaded status post expiration config"
        );
        Ok(config)
    }

    /// Load configuration from an explicit set of `STATUS_POST_*` variables
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_lifetime_secs <= 0 {
            return Err(ExpirationError::Config(
                "default_lifetime_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_lifetime_secs <= 0 {
            return Err(ExpirationError::Config(
                "max_lifetime_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_lifetime_secs > LIFETIME_CEILING_SECS {
            return Err(ExpirationError::Config(format!(
                "max_lifetime_secs ({}) cannot exceed {}",
                self.max_lifetime_secs, LIFETIME_CEILING_SECS
            )));
        }
        if self.default_lifetime_secs > self.max_lifetime_secs {
            return Err(ExpirationError::Config(format!(
                "default_lifetime_secs ({}) cannot exceed max_lifetime_secs ({})",
                self.default_lifetime_secs, self.max_lifetime_secs
            )));
        }
        Ok(())
    }

    /// Only meaningful on a config that passed [`ExpirationConfig::validate`]
    pub fn default_lifetime(&self) -> Duration {
        Duration::seconds(self.default_lifetime_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::seconds(self.max_lifetime_secs)
    }
}
