use crate::errors::StatStageError;
use crate::pokemon::PokemonInst;
use schema::{MoveCategory, StatType};
use serde::{Deserialize, Serialize};

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Stage modifiers for the six staged stats, each held in `[-6, 6]`.
///
/// The fields are private so the bound cannot be broken from outside:
/// externally supplied values go through [`StatStages::set`] which rejects
/// anything out of range, while in-battle changes go through
/// [`StatStages::boost`] which clamps. Deserialized stages are checked the
/// same way as `set`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStatStages")]
pub struct StatStages {
    attack: i8,
    defense: i8,
    special_attack: i8,
    special_defense: i8,
    speed: i8,
    accuracy: i8,
}

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build stages from externally supplied values, in [`StatType::ALL`] order.
    pub fn from_values(values: [i8; 6]) -> Result<Self, StatStageError> {
        let mut stages = Self::new();
        for (stat, value) in StatType::ALL.into_iter().zip(values) {
            stages.set(stat, value)?;
        }
        Ok(stages)
    }

    pub fn get(&self, stat: StatType) -> i8 {
        match stat {
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.special_attack,
            StatType::SpecialDefense => self.special_defense,
            StatType::Speed => self.speed,
            StatType::Accuracy => self.accuracy,
        }
    }

    /// Set a stage to an exact value, rejecting anything outside `[-6, 6]`.
    pub fn set(&mut self, stat: StatType, stage: i8) -> Result<(), StatStageError> {
        if !(MIN_STAGE..=MAX_STAGE).contains(&stage) {
            return Err(StatStageError::OutOfRange { stat, stage });
        }
        *self.slot_mut(stat) = stage;
        Ok(())
    }

    /// Shift a stage by `delta`, clamped to `[-6, 6]`. Returns the change actually applied.
    pub fn boost(&mut self, stat: StatType, delta: i8) -> i8 {
        let slot = self.slot_mut(stat);
        let old = *slot;
        *slot = old.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
        *slot - old
    }

    fn slot_mut(&mut self, stat: StatType) -> &mut i8 {
        match stat {
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::SpecialAttack => &mut self.special_attack,
            StatType::SpecialDefense => &mut self.special_defense,
            StatType::Speed => &mut self.speed,
            StatType::Accuracy => &mut self.accuracy,
        }
    }
}

/// Unchecked wire shape of [`StatStages`].
#[derive(Deserialize)]
struct RawStatStages {
    attack: i8,
    defense: i8,
    special_attack: i8,
    special_defense: i8,
    speed: i8,
    accuracy: i8,
}

impl TryFrom<RawStatStages> for StatStages {
    type Error = StatStageError;

    fn try_from(raw: RawStatStages) -> Result<Self, Self::Error> {
        Self::from_values([
            raw.attack,
            raw.defense,
            raw.special_attack,
            raw.special_defense,
            raw.speed,
            raw.accuracy,
        ])
    }
}

/// Apply a stage to a stat: `floor(base * (2 + stage) / 2)`.
///
/// The linear rule reaches zero at -2 and goes negative below it, so any
/// non-zero base stat is held at a floor of 1.
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    if base_stat == 0 {
        return 0;
    }
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE) as i32;
    let scaled = (base_stat as i32 * (2 + stage)).div_euclid(2);
    scaled.clamp(1, u16::MAX as i32) as u16
}

/// Effective speed including the speed stage
pub fn effective_speed(pokemon: &PokemonInst) -> u16 {
    let base_speed = pokemon.template.base_stats.speed;
    apply_stat_stage_multiplier(base_speed, pokemon.stat_stages.get(StatType::Speed))
}

/// Effective attacking stat for a move category. Status moves use no stat.
pub fn effective_attack(pokemon: &PokemonInst, category: MoveCategory) -> u16 {
    let stats = &pokemon.template.base_stats;
    let (base, stat) = match category {
        MoveCategory::Physical => (stats.attack, StatType::Attack),
        MoveCategory::Special => (stats.special_attack, StatType::SpecialAttack),
        MoveCategory::Status => return 0,
    };
    apply_stat_stage_multiplier(base, pokemon.stat_stages.get(stat))
}

/// Effective defending stat for a move category. Status moves use no stat.
pub fn effective_defense(pokemon: &PokemonInst, category: MoveCategory) -> u16 {
    let stats = &pokemon.template.base_stats;
    let (base, stat) = match category {
        MoveCategory::Physical => (stats.defense, StatType::Defense),
        MoveCategory::Special => (stats.special_defense, StatType::SpecialDefense),
        MoveCategory::Status => return 0,
    };
    apply_stat_stage_multiplier(base, pokemon.stat_stages.get(stat))
}

/// Accuracy after the user's accuracy stage, capped at 100.
/// A base accuracy of 0 marks a move that never misses and is reported as 100.
pub fn effective_accuracy(base_accuracy: u8, pokemon: &PokemonInst) -> u8 {
    if base_accuracy == 0 {
        return 100;
    }
    let stage = pokemon.stat_stages.get(StatType::Accuracy);
    apply_stat_stage_multiplier(base_accuracy as u16, stage).min(100) as u8
}
