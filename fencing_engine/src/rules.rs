//! Competition rule presets and per-weapon defaults.
//!
//! Presets bundle the settings a director picks together: pool size, target
//! scores, bout length and how many fencers go through to the direct
//! elimination. Which preset applies to a weapon by default is looked up
//! through a `RuleBook` handed in by the caller.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::bracket::BracketType;
use crate::errors::{EngineError, EngineResult};

/// Fencing weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weapon {
    Foil,
    Epee,
    Sabre,
}

impl Weapon {
    pub const ALL: [Weapon; 3] = [Weapon::Foil, Weapon::Epee, Weapon::Sabre];
}

impl std::fmt::Display for Weapon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weapon::Foil => write!(f, "foil"),
            Weapon::Epee => write!(f, "epee"),
            Weapon::Sabre => write!(f, "sabre"),
        }
    }
}

impl FromStr for Weapon {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "foil" => Ok(Weapon::Foil),
            "epee" | "épée" => Ok(Weapon::Epee),
            "sabre" | "saber" => Ok(Weapon::Sabre),
            other => Err(EngineError::configuration(format!(
                "unknown weapon '{other}'"
            ))),
        }
    }
}

/// Named rule set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulePreset {
    /// Lookup key (e.g., "fie_standard")
    pub name: String,

    /// Human-readable description
    pub description: String,

    pub bracket_type: BracketType,

    /// Preferred pool size
    pub pool_size: usize,

    /// Bout length in seconds
    pub match_duration_secs: u32,

    /// Touches to win a pool bout
    pub pool_target_score: u32,

    /// Touches to win an elimination bout, `None` when there is no elimination
    pub elimination_target_score: Option<u32>,

    /// Size of the elimination table
    pub total_qualified: usize,

    /// Share of each pool that qualifies (0.0 to 1.0)
    pub qualification_ratio: f64,
}

impl RulePreset {
    /// FIE individual competition: pools of 7 to 5 touches, DE to 15
    pub fn fie_standard() -> Self {
        Self {
            name: "fie_standard".to_string(),
            description: "FIE standard individual competition".to_string(),
            bracket_type: BracketType::SingleElimination,
            pool_size: 7,
            match_duration_secs: 180,
            pool_target_score: 5,
            elimination_target_score: Some(15),
            total_qualified: 24,
            qualification_ratio: 0.5,
        }
    }

    pub fn rapid() -> Self {
        Self {
            name: "rapid".to_string(),
            description: "Rapid format with longer pool bouts".to_string(),
            bracket_type: BracketType::SingleElimination,
            pool_size: 6,
            match_duration_secs: 300,
            pool_target_score: 10,
            elimination_target_score: Some(15),
            total_qualified: 16,
            qualification_ratio: 0.6,
        }
    }

    pub fn youth() -> Self {
        Self {
            name: "youth".to_string(),
            description: "Youth competition with shorter bouts".to_string(),
            bracket_type: BracketType::SingleElimination,
            pool_size: 6,
            match_duration_secs: 120,
            pool_target_score: 5,
            elimination_target_score: Some(10),
            total_qualified: 16,
            qualification_ratio: 0.5,
        }
    }

    pub fn double_elimination() -> Self {
        Self {
            name: "double_elimination".to_string(),
            description: "Pools followed by a double-elimination table".to_string(),
            bracket_type: BracketType::DoubleElimination,
            pool_size: 7,
            match_duration_secs: 180,
            pool_target_score: 5,
            elimination_target_score: Some(15),
            total_qualified: 24,
            qualification_ratio: 0.5,
        }
    }

    /// Everyone fences everyone; no elimination table
    pub fn round_robin_only() -> Self {
        Self {
            name: "round_robin_only".to_string(),
            description: "Single round robin, ranked on pool results".to_string(),
            bracket_type: BracketType::RoundRobinOnly,
            pool_size: 8,
            match_duration_secs: 300,
            pool_target_score: 10,
            elimination_target_score: None,
            total_qualified: 8,
            qualification_ratio: 1.0,
        }
    }

    /// All predefined presets
    pub fn all() -> Vec<RulePreset> {
        vec![
            Self::fie_standard(),
            Self::rapid(),
            Self::youth(),
            Self::double_elimination(),
            Self::round_robin_only(),
        ]
    }

    /// Qualifiers taken from a pool of `pool_len` fencers
    ///
    /// `ceil(pool_len * qualification_ratio)`, never less than 1.
    pub fn promotion_count(&self, pool_len: usize) -> usize {
        let count = (pool_len as f64 * self.qualification_ratio).ceil() as usize;
        count.clamp(1, pool_len.max(1))
    }

    /// Validate preset values
    pub fn validate(&self) -> EngineResult<()> {
        if self.pool_size < 1 {
            return Err(EngineError::validation("pool size must be at least 1"));
        }
        if self.pool_target_score == 0 || self.elimination_target_score == Some(0) {
            return Err(EngineError::validation("target scores must be positive"));
        }
        if self.match_duration_secs == 0 {
            return Err(EngineError::validation("bout length must be positive"));
        }
        if !(self.qualification_ratio > 0.0 && self.qualification_ratio <= 1.0) {
            return Err(EngineError::validation(
                "qualification ratio must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Source of rule presets and per-weapon defaults
pub trait RuleBook: Send + Sync {
    /// Preset by name
    fn rule(&self, name: &str) -> Option<RulePreset>;

    /// Default preset for a weapon
    fn default_rule(&self, weapon: Weapon) -> Option<RulePreset>;
}

/// Fixed rule book built once and passed to whoever needs it
#[derive(Debug, Clone, Default)]
pub struct StaticRuleBook {
    presets: HashMap<String, RulePreset>,
    defaults: HashMap<Weapon, String>,
}

impl StaticRuleBook {
    /// Rule book over `presets`, with no weapon defaults yet
    ///
    /// # Errors
    ///
    /// Returns `Validation` for the first preset that fails `RulePreset::validate`
    pub fn new(presets: Vec<RulePreset>) -> EngineResult<Self> {
        for preset in &presets {
            preset.validate().map_err(|e| {
                EngineError::validation(format!("rule preset '{}': {e}", preset.name))
            })?;
        }
        Ok(Self {
            presets: presets.into_iter().map(|p| (p.name.clone(), p)).collect(),
            defaults: HashMap::new(),
        })
    }

    /// Set the default preset for a weapon
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if no preset has that name
    pub fn with_default(mut self, weapon: Weapon, rule_name: &str) -> EngineResult<Self> {
        if !self.presets.contains_key(rule_name) {
            return Err(EngineError::configuration(format!(
                "no rule preset named '{rule_name}'"
            )));
        }
        self.defaults.insert(weapon, rule_name.to_string());
        Ok(self)
    }

    /// Every predefined preset, with FIE standard as the default for all weapons
    pub fn standard() -> Self {
        Self {
            presets: RulePreset::all()
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
            defaults: Weapon::ALL
                .into_iter()
                .map(|weapon| (weapon, "fie_standard".to_string()))
                .collect(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl RuleBook for StaticRuleBook {
    fn rule(&self, name: &str) -> Option<RulePreset> {
        self.presets.get(name).cloned()
    }

    fn default_rule(&self, weapon: Weapon) -> Option<RulePreset> {
        self.defaults
            .get(&weapon)
            .and_then(|name| self.presets.get(name))
            .cloned()
    }
}
