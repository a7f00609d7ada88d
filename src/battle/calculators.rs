use crate::battle::rng::BattleRng;
use crate::battle::stats::{effective_attack, effective_defense};
use crate::pokemon::PokemonInst;
use schema::MoveData;

/// Every battle is fought at this level.
pub const BATTLE_LEVEL: f64 = 100.0;
pub const STAB_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub effectiveness: f64,
    pub stab: f64,
}

impl DamageOutcome {
    fn none() -> Self {
        Self {
            damage: 0,
            effectiveness: 1.0,
            stab: 1.0,
        }
    }
}

/// Type chart multiplier of `move_data` against the defender's current types.
pub fn move_effectiveness(defender: &PokemonInst, move_data: &MoveData) -> f64 {
    move_data
        .move_type
        .effectiveness_against(&defender.defensive_types())
}

pub fn stab_multiplier(attacker: &PokemonInst, move_data: &MoveData) -> f64 {
    if attacker.has_stab(move_data.move_type) {
        STAB_MULTIPLIER
    } else {
        1.0
    }
}

/// Effectiveness times same-type bonus, before the random factor.
pub fn pre_random_multiplier(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
) -> f64 {
    move_effectiveness(defender, move_data) * stab_multiplier(attacker, move_data)
}

/// `(2 * level + 10) / 250 * power * atk / def + 2` with staged stats.
pub fn base_damage(attacker: &PokemonInst, defender: &PokemonInst, move_data: &MoveData) -> f64 {
    let attack = effective_attack(attacker, move_data.category) as f64;
    let defense = effective_defense(defender, move_data.category).max(1) as f64;
    (2.0 * BATTLE_LEVEL + 10.0) / 250.0 * move_data.power as f64 * attack / defense + 2.0
}

/// HP damage for one use of `move_data`.
///
/// Non-damaging moves deal 0 and draw nothing from `rng`. Damaging moves draw
/// one spread factor, and always deal at least 1.
pub fn calculate_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    rng: &mut BattleRng,
) -> DamageOutcome {
    if !move_data.is_damaging() {
        return DamageOutcome::none();
    }

    let effectiveness = move_effectiveness(defender, move_data);
    let stab = stab_multiplier(attacker, move_data);
    let roll = rng.damage_roll("damage spread");

    let raw = base_damage(attacker, defender, move_data) * effectiveness * stab * roll;
    let damage = (raw.floor() as u32).clamp(1, u16::MAX as u32) as u16;

    DamageOutcome {
        damage,
        effectiveness,
        stab,
    }
}
