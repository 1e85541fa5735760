//! Command-line configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use fencing_engine::{BracketType, EngineConfig, RuleBook, StaticRuleBook, Weapon};
use std::path::PathBuf;
use std::str::FromStr;

/// Log output backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// tracing-subscriber fmt layer
    Structured,
    /// env_logger single-line output
    Plain,
}

/// Values given on the command line; each one wins over its variable
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub event_file: Option<PathBuf>,
    pub rule: Option<String>,
    pub weapon: Option<Weapon>,
    pub pool_size: Option<usize>,
    pub promotion_count: Option<usize>,
}

/// Complete configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// JSON file holding the event between runs
    pub event_file: PathBuf,
    pub weapon: Weapon,
    /// Name of the rule preset the engine settings started from
    pub rule: String,
    pub engine: EngineConfig,
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// Engine settings start from the rule preset (`FE_RULE`, or the default
    /// rule for `FE_WEAPON`) and are then overridden by `FE_POOL_SIZE`,
    /// `FE_MIN_POOL_SIZE`, `FE_PROMOTION_COUNT` and `FE_BRACKET_TYPE`.
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values from CLI args
    /// * `rules` - Rule book used to resolve preset names and weapon defaults
    ///
    /// # Errors
    ///
    /// Returns error if the event file is not given or a variable does not parse
    pub fn from_env(overrides: CliOverrides, rules: &dyn RuleBook) -> Result<Self, ConfigError> {
        let event_file = overrides
            .event_file
            .or_else(|| std::env::var("FE_EVENT_FILE").ok().map(PathBuf::from))
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "FE_EVENT_FILE".to_string(),
                hint: "Pass --event <path> or set FE_EVENT_FILE".to_string(),
            })?;

        let weapon = match overrides.weapon {
            Some(weapon) => weapon,
            None => parse_env::<Weapon>("FE_WEAPON")?.unwrap_or(Weapon::Epee),
        };

        let rule_name = overrides
            .rule
            .or_else(|| std::env::var("FE_RULE").ok());
        let preset = match &rule_name {
            Some(name) => rules.rule(name).ok_or_else(|| ConfigError::Invalid {
                var: "FE_RULE".to_string(),
                reason: format!("Unknown rule preset '{name}'"),
            })?,
            None => rules
                .default_rule(weapon)
                .ok_or_else(|| ConfigError::Invalid {
                    var: "FE_WEAPON".to_string(),
                    reason: format!("No default rule for {weapon}"),
                })?,
        };

        let mut engine = EngineConfig::from_preset(&preset);
        let pool_size = match overrides.pool_size {
            Some(pool_size) => Some(pool_size),
            None => parse_env::<usize>("FE_POOL_SIZE")?,
        };
        if let Some(pool_size) = pool_size {
            engine.pool_size = pool_size;
        }
        if let Some(min_pool_size) = parse_env::<usize>("FE_MIN_POOL_SIZE")? {
            engine.min_pool_size = min_pool_size;
        }
        let promotion_count = match overrides.promotion_count {
            Some(promotion_count) => Some(promotion_count),
            None => parse_env::<usize>("FE_PROMOTION_COUNT")?,
        };
        if let Some(promotion_count) = promotion_count {
            engine.promotion_count = promotion_count;
        }
        if let Some(bracket_type) = parse_env::<BracketType>("FE_BRACKET_TYPE")? {
            engine.bracket_type = bracket_type;
        }

        let log_format = match std::env::var("FE_LOG_FORMAT").ok().as_deref() {
            Some("plain") => LogFormat::Plain,
            _ => LogFormat::Structured,
        };

        Ok(CliConfig {
            event_file,
            weapon,
            rule: preset.name,
            engine,
            log_format,
        })
    }

    /// Load with the built-in rule book
    pub fn load(overrides: CliOverrides) -> Result<Self, ConfigError> {
        Self::from_env(overrides, &StaticRuleBook::standard())
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.min_pool_size > self.engine.pool_size {
            return Err(ConfigError::Invalid {
                var: "FE_MIN_POOL_SIZE".to_string(),
                reason: format!(
                    "Must not exceed pool size ({})",
                    self.engine.pool_size
                ),
            });
        }

        if self.engine.promotion_count == 0 {
            return Err(ConfigError::Invalid {
                var: "FE_PROMOTION_COUNT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        self.engine.validate().map_err(|e| ConfigError::Invalid {
            var: "engine".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Read and parse an optional environment variable
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "FE_EVENT_FILE",
        "FE_WEAPON",
        "FE_RULE",
        "FE_POOL_SIZE",
        "FE_MIN_POOL_SIZE",
        "FE_PROMOTION_COUNT",
        "FE_BRACKET_TYPE",
        "FE_LOG_FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment are serialized
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set(var: &str, value: &str) {
        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::set_var(var, value) };
    }

    fn with_event() -> CliOverrides {
        CliOverrides {
            event_file: Some(PathBuf::from("event.json")),
            ..CliOverrides::default()
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "FE_EVENT_FILE".to_string(),
            hint: "Pass --event".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("FE_EVENT_FILE"));
        assert!(msg.contains("Pass --event"));
    }

    #[test]
    #[serial]
    fn test_missing_event_file() {
        clear_env();
        let err = CliConfig::load(CliOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { .. }));
    }

    #[test]
    #[serial]
    fn test_defaults_from_weapon_rule() {
        clear_env();
        let config = CliConfig::load(with_event()).unwrap();
        assert_eq!(config.weapon, Weapon::Epee);
        assert_eq!(config.rule, "fie_standard");
        assert_eq!(config.engine.pool_size, 7);
        assert_eq!(config.engine.promotion_count, 4);
        assert_eq!(config.log_format, LogFormat::Structured);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        set("FE_EVENT_FILE", "/tmp/open.json");
        set("FE_RULE", "youth");
        set("FE_POOL_SIZE", "5");
        set("FE_PROMOTION_COUNT", "2");
        set("FE_LOG_FORMAT", "plain");

        let config = CliConfig::load(CliOverrides::default()).unwrap();
        assert_eq!(config.event_file, PathBuf::from("/tmp/open.json"));
        assert_eq!(config.rule, "youth");
        assert_eq!(config.engine.pool_size, 5);
        assert_eq!(config.engine.promotion_count, 2);
        assert_eq!(config.engine.elimination_target_score, 10);
        assert_eq!(config.log_format, LogFormat::Plain);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_cli_wins_over_env() {
        clear_env();
        set("FE_POOL_SIZE", "5");
        let overrides = CliOverrides {
            pool_size: Some(6),
            ..with_event()
        };
        let config = CliConfig::load(overrides).unwrap();
        assert_eq!(config.engine.pool_size, 6);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values() {
        clear_env();
        set("FE_POOL_SIZE", "seven");
        let err = CliConfig::load(with_event()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "FE_POOL_SIZE"));

        clear_env();
        set("FE_RULE", "swiss");
        assert!(matches!(
            CliConfig::load(with_event()),
            Err(ConfigError::Invalid { .. })
        ));

        clear_env();
        set("FE_WEAPON", "lance");
        assert!(matches!(
            CliConfig::load(with_event()),
            Err(ConfigError::Invalid { .. })
        ));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_double_elimination() {
        clear_env();
        set("FE_BRACKET_TYPE", "double");
        let config = CliConfig::load(with_event()).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));

        set("FE_BRACKET_TYPE", "single");
        set("FE_MIN_POOL_SIZE", "9");
        let config = CliConfig::load(with_event()).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("FE_MIN_POOL_SIZE"));
        clear_env();
    }
}
