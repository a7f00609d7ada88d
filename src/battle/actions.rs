use crate::battle::state::{BattleState, Side};
use crate::config::RuleSet;
use crate::errors::{ActionError, ActionResult};
use schema::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side's choice for a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Index into the active Pokemon's move list.
    Move(usize),
    /// Index into the side's roster.
    Switch(usize),
    /// One of the active Pokemon's own types.
    TypeShift(PokemonType),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(index) => write!(f, "move {}", index),
            Action::Switch(index) => write!(f, "switch to {}", index),
            Action::TypeShift(pokemon_type) => write!(f, "type shift to {}", pokemon_type),
        }
    }
}

/// Legal actions under the standard rules.
pub fn legal_actions(state: &BattleState, side: Side) -> Vec<Action> {
    legal_actions_with_rules(state, side, &RuleSet::default())
}

/// Every action `side` may choose right now, in a stable order: moves,
/// then switches, then type shifts.
///
/// Non-empty whenever the side's active Pokemon is healthy. Under
/// `track_usage_budget`, depleted moves are left out unless every move is
/// depleted, in which case all of them are offered as a last resort.
pub fn legal_actions_with_rules(state: &BattleState, side: Side, rules: &RuleSet) -> Vec<Action> {
    let battle_side = state.side(side);
    let active = battle_side.active_pokemon();
    if active.is_fainted() {
        return Vec::new();
    }

    let mut actions = Vec::new();

    let filter_depleted = rules.track_usage_budget && active.has_usable_move();
    actions.extend(
        (0..active.moves().len())
            .filter(|&i| !filter_depleted || active.remaining_uses(i).unwrap_or(0) > 0)
            .map(Action::Move),
    );

    actions.extend(battle_side.switch_targets().map(Action::Switch));

    if !battle_side.type_shift_used() {
        actions.extend(active.template.types.iter().copied().map(Action::TypeShift));
    }

    actions
}

/// Check an action against the current state without changing anything.
pub fn validate_action(
    state: &BattleState,
    side: Side,
    action: &Action,
    rules: &RuleSet,
) -> ActionResult<()> {
    let battle_side = state.side(side);
    let active = battle_side.active_pokemon();

    match *action {
        Action::Move(index) => {
            if active.get_move(index).is_none() {
                return Err(ActionError::InvalidMoveIndex { side, index });
            }
            if rules.track_usage_budget
                && active.remaining_uses(index) == Some(0)
                && active.has_usable_move()
            {
                return Err(ActionError::MoveDepleted { side, index });
            }
        }
        Action::Switch(index) => {
            let Some(target) = battle_side.roster.get(index) else {
                return Err(ActionError::InvalidPokemonIndex { side, index });
            };
            if index == battle_side.active_index() {
                return Err(ActionError::TargetAlreadyActive { side, index });
            }
            if target.is_fainted() {
                return Err(ActionError::TargetFainted { side, index });
            }
        }
        Action::TypeShift(pokemon_type) => {
            if battle_side.type_shift_used() {
                return Err(ActionError::TypeShiftAlreadyUsed { side });
            }
            if !active.template.has_type(pokemon_type) {
                return Err(ActionError::TypeShiftUnavailable { side, pokemon_type });
            }
        }
    }

    Ok(())
}
