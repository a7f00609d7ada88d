use crate::pokemon_types::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

/// The stats that carry an in-battle stage modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
}

impl StatType {
    pub const ALL: [StatType; 6] = [
        StatType::Attack,
        StatType::Defense,
        StatType::SpecialAttack,
        StatType::SpecialDefense,
        StatType::Speed,
        StatType::Accuracy,
    ];
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Attack => write!(f, "Attack"),
            StatType::Defense => write!(f, "Defense"),
            StatType::SpecialAttack => write!(f, "Special Attack"),
            StatType::SpecialDefense => write!(f, "Special Defense"),
            StatType::Speed => write!(f, "Speed"),
            StatType::Accuracy => write!(f, "Accuracy"),
        }
    }
}

fn default_accuracy() -> u8 {
    100
}

/// A move as it appears in a creature template.
///
/// `effect` is an opaque tag looked up in the engine's effect registry after
/// damage is applied; an unknown or missing tag does nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    pub power: u16,
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
    #[serde(alias = "pp")]
    pub usage_budget: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub category: MoveCategory,
    #[serde(default)]
    pub effect: Option<String>,
}

impl MoveData {
    pub fn new(
        name: &str,
        move_type: PokemonType,
        power: u16,
        category: MoveCategory,
    ) -> Self {
        Self {
            name: name.to_string(),
            move_type,
            power,
            accuracy: 100,
            usage_budget: 16,
            priority: 0,
            category,
            effect: None,
        }
    }

    pub fn with_priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_accuracy(mut self, accuracy: u8) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_usage_budget(mut self, usage_budget: u8) -> Self {
        self.usage_budget = usage_budget;
        self
    }

    pub fn with_effect(mut self, effect: &str) -> Self {
        self.effect = Some(effect.to_string());
        self
    }

    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status && self.power > 0
    }
}
