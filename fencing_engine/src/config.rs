//! Engine configuration.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::bracket::BracketType;
use crate::errors::{EngineError, EngineResult};
use crate::matches::Schedule;
use crate::rules::RulePreset;

/// Upper bound for the bout interval and pool offset (one day)
pub const MAX_SCHEDULE_MINUTES: i64 = 24 * 60;

/// Settings for one competition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Preferred pool size (default: 7)
    pub pool_size: usize,

    /// Smallest pool the seeding may produce (default: 3)
    pub min_pool_size: usize,

    /// Qualifiers taken from each pool (default: 4)
    pub promotion_count: usize,

    /// Touches to win a pool bout (default: 5)
    pub pool_target_score: u32,

    /// Touches to win an elimination bout (default: 15)
    pub elimination_target_score: u32,

    pub bracket_type: BracketType,

    /// Minutes between bouts of one pool (default: 10)
    pub match_interval_minutes: i64,

    /// Minutes between the start of consecutive pools (default: 120)
    pub pool_start_offset_minutes: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_size: 7,
            min_pool_size: 3,
            promotion_count: 4,
            pool_target_score: 5,
            elimination_target_score: 15,
            bracket_type: BracketType::SingleElimination,
            match_interval_minutes: 10,
            pool_start_offset_minutes: 120,
        }
    }
}

impl EngineConfig {
    /// Validated configuration with the given pool settings and defaults elsewhere
    pub fn new(
        pool_size: usize,
        min_pool_size: usize,
        promotion_count: usize,
    ) -> EngineResult<Self> {
        let config = Self {
            pool_size,
            min_pool_size,
            promotion_count,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration matching a rule preset
    ///
    /// The promotion count is what the preset's ratio gives for a full pool.
    pub fn from_preset(preset: &RulePreset) -> Self {
        let defaults = Self::default();
        Self {
            pool_size: preset.pool_size,
            promotion_count: preset.promotion_count(preset.pool_size),
            pool_target_score: preset.pool_target_score,
            elimination_target_score: preset
                .elimination_target_score
                .unwrap_or(defaults.elimination_target_score),
            bracket_type: preset.bracket_type,
            ..defaults
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// * `Validation` - pool size, promotion count or a target score is zero,
    ///   the minimum pool size exceeds the pool size, or a schedule spacing is
    ///   negative or longer than a day
    /// * `Configuration` - the bracket type cannot be generated
    pub fn validate(&self) -> EngineResult<()> {
        if self.pool_size < 1 {
            return Err(EngineError::validation("pool size must be at least 1"));
        }
        if self.min_pool_size > self.pool_size {
            return Err(EngineError::validation(format!(
                "minimum pool size {} exceeds pool size {}",
                self.min_pool_size, self.pool_size
            )));
        }
        if self.promotion_count < 1 {
            return Err(EngineError::validation("promotion count must be positive"));
        }
        if self.pool_target_score == 0 || self.elimination_target_score == 0 {
            return Err(EngineError::validation("target scores must be positive"));
        }
        for (name, minutes) in [
            ("match interval", self.match_interval_minutes),
            ("pool start offset", self.pool_start_offset_minutes),
        ] {
            if !(0..=MAX_SCHEDULE_MINUTES).contains(&minutes) {
                return Err(EngineError::validation(format!(
                    "{name} must be between 0 and {MAX_SCHEDULE_MINUTES} minutes, got {minutes}"
                )));
            }
        }
        if !self.bracket_type.is_supported() {
            return Err(EngineError::configuration(format!(
                "bracket type {} is not supported",
                self.bracket_type
            )));
        }
        Ok(())
    }

    /// Pool schedule starting at `start` with the configured spacing
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a spacing does not fit a `Duration`
    pub fn schedule(&self, start: DateTime<Utc>) -> EngineResult<Schedule> {
        let minutes = |value: i64| {
            Duration::try_minutes(value).ok_or_else(|| {
                EngineError::validation(format!("{value} minutes is out of range"))
            })
        };
        Ok(Schedule::new(start)
            .with_interval(minutes(self.match_interval_minutes)?)
            .with_pool_offset(minutes(self.pool_start_offset_minutes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pool_size, 7);
        assert_eq!(config.promotion_count, 4);
    }

    #[test]
    fn test_new_rejects_zero_promotion() {
        assert!(matches!(
            EngineConfig::new(7, 3, 0),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            EngineConfig::new(0, 0, 2),
            Err(EngineError::Validation(_))
        ));
        assert!(EngineConfig::new(6, 3, 3).is_ok());
    }

    #[test]
    fn test_unsupported_bracket_type() {
        let config = EngineConfig {
            bracket_type: BracketType::DoubleElimination,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_preset() {
        let config = EngineConfig::from_preset(&RulePreset::youth());
        assert_eq!(config.pool_size, 6);
        assert_eq!(config.promotion_count, 3);
        assert_eq!(config.elimination_target_score, 10);
        assert!(config.validate().is_ok());

        let rr = EngineConfig::from_preset(&RulePreset::round_robin_only());
        assert!(rr.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"pool_size": 5}"#).unwrap();
        assert_eq!(config.pool_size, 5);
        assert_eq!(config.min_pool_size, 3);
        assert_eq!(config.bracket_type, BracketType::SingleElimination);
    }

    #[test]
    fn test_schedule_spacing_bounds() {
        let config = EngineConfig {
            match_interval_minutes: i64::MAX,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Validation(_))));

        let config = EngineConfig {
            pool_start_offset_minutes: MAX_SCHEDULE_MINUTES + 1,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Validation(_))));

        let config = EngineConfig {
            match_interval_minutes: -1,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            pool_start_offset_minutes: MAX_SCHEDULE_MINUTES,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_schedule_rejects_unrepresentable_minutes() {
        let start = Utc::now();
        let config = EngineConfig {
            match_interval_minutes: i64::MAX,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.schedule(start),
            Err(EngineError::Validation(_))
        ));

        let schedule = EngineConfig::default().schedule(start).unwrap();
        assert_eq!(schedule.interval, Duration::minutes(10));
        assert_eq!(schedule.pool_offset, Duration::minutes(120));
    }
}
