//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Sentinel database path selecting the in-memory store.
pub const MEMORY_DB_PATH: &str = ":memory:";

const TICK_MILLIS_KEY: &str = "PARTNER_ONBOARDING_TICK_MILLIS";

/// Portal configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Where the local store lives. `:memory:` keeps everything in RAM.
    pub db_path: PathBuf,
    /// Whether the onboarding step survives a restart.
    pub persist_step: bool,
    /// Length of the OTP resend countdown, in ticks.
    pub otp_countdown_secs: u32,
    /// Time between countdown ticks.
    pub tick_interval: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/partner-onboarding.db"),
            persist_step: true,
            otp_countdown_secs: 59,
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl PortalConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Unparsable values are logged and ignored rather than treated as fatal.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let db_path = std::env::var("PARTNER_ONBOARDING_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let persist_step = env_or("PARTNER_ONBOARDING_PERSIST_STEP", defaults.persist_step, parse_bool);

        let otp_countdown_secs = env_or(
            "PARTNER_ONBOARDING_OTP_SECONDS",
            defaults.otp_countdown_secs,
            |key, raw| parse_number(key, raw),
        );

        let tick_interval = env_or(TICK_MILLIS_KEY, defaults.tick_interval, |key, raw| {
            let millis = parse_number::<u64>(key, raw)?;
            if millis == 0 {
                return Err(zero_tick());
            }
            Ok(Duration::from_millis(millis))
        });

        Self {
            db_path,
            persist_step,
            otp_countdown_secs,
            tick_interval,
        }
    }

    /// Reject values the portal cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(zero_tick());
        }
        Ok(())
    }

    /// Whether the configured store is the in-memory one.
    pub fn is_memory_store(&self) -> bool {
        self.db_path.as_os_str() == MEMORY_DB_PATH
    }
}

fn zero_tick() -> ConfigError {
    ConfigError::InvalidValue {
        key: TICK_MILLIS_KEY.to_string(),
        message: "tick interval must be greater than zero".to_string(),
    }
}

fn env_or<T>(key: &str, default: T, parse: impl Fn(&str, &str) -> Result<T, ConfigError>) -> T {
    match std::env::var(key) {
        Ok(raw) => match parse(key, raw.trim()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{e}; using default");
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {raw:?}"),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PortalConfig::default();
        assert!(config.persist_step);
        assert_eq!(config.otp_countdown_secs, 59);
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert!(!config.is_memory_store());
    }

    #[test]
    fn memory_store_sentinel() {
        let config = PortalConfig {
            db_path: PathBuf::from(MEMORY_DB_PATH),
            ..Default::default()
        };
        assert!(config.is_memory_store());
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("k", "TRUE").unwrap());
        assert!(parse_bool("k", "on").unwrap());
        assert!(!parse_bool("k", "0").unwrap());
        assert!(!parse_bool("k", "No").unwrap());
        assert!(parse_bool("k", "maybe").is_err());
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        assert!(PortalConfig::default().validate().is_ok());
        let config = PortalConfig {
            tick_interval: Duration::ZERO,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(TICK_MILLIS_KEY));
    }

    #[test]
    fn parse_number_reports_key() {
        let err = parse_number::<u32>("PARTNER_ONBOARDING_OTP_SECONDS", "soon").unwrap_err();
        assert!(err.to_string().contains("PARTNER_ONBOARDING_OTP_SECONDS"));
        assert_eq!(parse_number::<u32>("k", "30").unwrap(), 30);
    }
}
