//! A module for defining AI behaviors for battle participants.

use crate::battle::actions::Action;
use crate::battle::calculators::{base_damage, move_effectiveness, pre_random_multiplier};
use crate::battle::rng::{BattleRng, DAMAGE_ROLL_MAX, DAMAGE_ROLL_MIN};
use crate::battle::state::{BattleState, Side};
use crate::pokemon::PokemonInst;
use ordered_float::OrderedFloat;
use schema::{MoveCategory, PokemonType};

/// Anything that can pick an action for one side.
///
/// The engine never looks inside a behavior; it only validates what comes
/// back. Implementations draw any randomness from the battle's `rng` so a
/// seeded battle replays exactly.
pub trait Behavior: Send + Sync {
    /// Pick one of `legal_actions` for `side`. Returns `None` only when
    /// `legal_actions` is empty.
    fn decide_action(
        &self,
        side: Side,
        state: &BattleState,
        legal_actions: &[Action],
        rng: &mut BattleRng,
    ) -> Option<Action>;
}

/// Uniform choice over the legal actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBehavior;

impl Behavior for RandomBehavior {
    fn decide_action(
        &self,
        _side: Side,
        _state: &BattleState,
        legal_actions: &[Action],
        rng: &mut BattleRng,
    ) -> Option<Action> {
        if legal_actions.is_empty() {
            return None;
        }
        let index = rng.choose_index(legal_actions.len(), "random action");
        legal_actions.get(index).copied()
    }
}

/// Greedy on expected damage this turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringAI;

const KNOCKOUT_BONUS: f64 = 1000.0;
const SWITCH_BASELINE: f64 = 1.0;
const TYPE_SHIFT_WEIGHT: f64 = 40.0;

impl ScoringAI {
    pub fn new() -> Self {
        Self
    }

    fn score_action(&self, action: &Action, side: Side, state: &BattleState) -> f64 {
        match action {
            Action::Move(index) => self.score_move(*index, side, state),
            Action::Switch(index) => self.score_switch(*index, side, state),
            Action::TypeShift(pokemon_type) => self.score_type_shift(*pokemon_type, side, state),
        }
    }

    fn score_move(&self, index: usize, side: Side, state: &BattleState) -> f64 {
        let attacker = state.active_pokemon(side);
        let defender = state.active_pokemon(side.opponent());
        let Some(move_data) = attacker.get_move(index) else {
            return f64::MIN;
        };

        if move_data.category == MoveCategory::Status {
            // Only worth it when something is registered to happen.
            return match move_data.effect {
                Some(_) => SWITCH_BASELINE * 0.5,
                None => -1.0,
            };
        }
        if move_effectiveness(defender, move_data) < 0.1 {
            return -1.0;
        }

        let mean_roll = (DAMAGE_ROLL_MIN + DAMAGE_ROLL_MAX) / 2.0;
        let expected = base_damage(attacker, defender, move_data)
            * pre_random_multiplier(attacker, defender, move_data)
            * mean_roll;

        let mut score = expected;
        if expected >= defender.current_hp() as f64 {
            score += KNOCKOUT_BONUS;
        }
        if move_data.accuracy > 0 {
            score *= move_data.accuracy as f64 / 100.0;
        }
        score
    }

    fn score_switch(&self, index: usize, side: Side, state: &BattleState) -> f64 {
        let Some(candidate) = state.side(side).roster.get(index) else {
            return f64::MIN;
        };
        let threat = best_effectiveness(state.active_pokemon(side.opponent()), &candidate.defensive_types());
        // Healthier candidates that resist the opponent score higher, but a
        // switch stays below almost any decent damaging move.
        SWITCH_BASELINE * candidate.hp_ratio() as f64 / threat.max(0.25)
    }

    fn score_type_shift(&self, pokemon_type: PokemonType, side: Side, state: &BattleState) -> f64 {
        let active = state.active_pokemon(side);
        let opponent = state.active_pokemon(side.opponent());
        let now = best_effectiveness(opponent, &active.defensive_types());
        let shifted = best_effectiveness(opponent, &[pokemon_type]);
        if shifted < now {
            TYPE_SHIFT_WEIGHT * (now - shifted)
        } else {
            -1.0
        }
    }
}

/// Strongest type multiplier among `attacker`'s damaging moves against `types`.
fn best_effectiveness(attacker: &PokemonInst, types: &[PokemonType]) -> f64 {
    attacker
        .moves()
        .iter()
        .filter(|m| m.is_damaging())
        .map(|m| m.move_type.effectiveness_against(types))
        .max_by_key(|&e| OrderedFloat(e))
        .unwrap_or(1.0)
}

impl Behavior for ScoringAI {
    fn decide_action(
        &self,
        side: Side,
        state: &BattleState,
        legal_actions: &[Action],
        _rng: &mut BattleRng,
    ) -> Option<Action> {
        legal_actions
            .iter()
            .copied()
            .map(|action| (action, self.score_action(&action, side, state)))
            .max_by_key(|(_, score)| OrderedFloat(*score))
            .map(|(action, _)| action)
    }
}
