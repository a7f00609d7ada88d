//! Battle configuration.
//!
//! Everything has a default matching the standard rules, so an empty RON
//! document `()` is a valid configuration.

use crate::errors::{BattleEngineError, BattleResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEAM_SIZE: usize = 6;
pub const DEFAULT_MAX_TURNS: u32 = 200;

/// Where switches and type shifts sit relative to move priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SwitchPriority {
    /// Switch and TypeShift act at priority 0, ordered against moves by speed.
    #[default]
    SharedWithMoves,
    /// Switch and TypeShift act before every move regardless of move priority.
    PreemptMoves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub switch_priority: SwitchPriority,
    /// Spend a use on every move and stop offering depleted moves.
    pub track_usage_budget: bool,
    /// Roll each move's accuracy before it deals damage.
    pub roll_accuracy: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            switch_priority: SwitchPriority::SharedWithMoves,
            track_usage_budget: false,
            roll_accuracy: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Maximum roster size per side; also fixes the observation length.
    pub team_size: usize,
    /// Turn cap applied by the runner. The engine itself never stops a battle.
    pub max_turns: u32,
    /// Seed for the battle's random source; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub rules: RuleSet,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            max_turns: DEFAULT_MAX_TURNS,
            seed: None,
            rules: RuleSet::default(),
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(text: &str) -> BattleResult<Self> {
        ron::from_str(text).map_err(|e| BattleEngineError::Config(e.to_string()))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }
}
