use crate::battle::actions::{legal_actions_with_rules, validate_action, Action};
use crate::battle::calculators::calculate_damage;
use crate::battle::effects::{EffectContext, EffectRegistry};
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleOutcome, BattleState, EventBus, SkipReason, Side};
use crate::battle::stats::{effective_accuracy, effective_speed};
use crate::config::{BattleConfig, RuleSet, SwitchPriority};
use crate::errors::{ActionError, ActionResult, BattleResult, BattleStateError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Everything that happened while resolving one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn_number: u32,
    pub events: Vec<BattleEvent>,
    /// Actions that were refused. Each one left the state untouched.
    pub rejected: Vec<ActionError>,
    pub outcome: BattleOutcome,
}

impl TurnReport {
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }
}

/// Sort key for one side's action. Compared field by field, highest first,
/// with speed inverted under trick room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Initiative {
    tier: u8,
    priority: i8,
    speed: u16,
}

/// Per-turn record of fainted roster members. A side with any entry has
/// lost the Pokemon that chose its action.
#[derive(Debug, Default)]
struct TurnFaints(Vec<(Side, usize)>);

impl TurnFaints {
    fn contains(&self, side: Side) -> bool {
        self.0.iter().any(|(s, _)| *s == side)
    }

    fn is_reported(&self, side: Side, index: usize) -> bool {
        self.0.contains(&(side, index))
    }

    fn insert(&mut self, side: Side, index: usize) {
        self.0.push((side, index));
    }
}

/// Turn resolver. Holds only rules and effect hooks, never battle state, so
/// one engine can drive any number of battles.
#[derive(Debug, Default)]
pub struct BattleEngine {
    rules: RuleSet,
    effects: EffectRegistry,
}

impl BattleEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            effects: EffectRegistry::new(),
        }
    }

    pub fn from_config(config: &BattleConfig) -> Self {
        Self::new(config.rules)
    }

    pub fn with_effects(mut self, effects: EffectRegistry) -> Self {
        self.effects = effects;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut EffectRegistry {
        &mut self.effects
    }

    pub fn legal_actions(&self, state: &BattleState, side: Side) -> Vec<Action> {
        legal_actions_with_rules(state, side, &self.rules)
    }

    pub fn validate_action(
        &self,
        state: &BattleState,
        side: Side,
        action: &Action,
    ) -> ActionResult<()> {
        validate_action(state, side, action, &self.rules)
    }

    /// Order both sides' actions: higher priority first, then higher
    /// effective speed (lower under trick room), then a coin flip.
    ///
    /// A random draw is consumed only when priority and speed both tie.
    pub fn determine_action_order(
        &self,
        state: &BattleState,
        action_a: Action,
        action_b: Action,
        rng: &mut BattleRng,
    ) -> [(Side, Action); 2] {
        let a = self.initiative(state, Side::A, &action_a);
        let b = self.initiative(state, Side::B, &action_b);

        let speed_order = if state.field.trick_room {
            a.speed.cmp(&b.speed).reverse()
        } else {
            a.speed.cmp(&b.speed)
        };
        let order = a
            .tier
            .cmp(&b.tier)
            .then(a.priority.cmp(&b.priority))
            .then(speed_order);

        let a_first = match order {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => rng.coin_flip("speed tie"),
        };

        if a_first {
            [(Side::A, action_a), (Side::B, action_b)]
        } else {
            [(Side::B, action_b), (Side::A, action_a)]
        }
    }

    fn initiative(&self, state: &BattleState, side: Side, action: &Action) -> Initiative {
        let active = state.active_pokemon(side);
        let speed = effective_speed(active);
        match action {
            Action::Move(index) => Initiative {
                tier: 0,
                // An out-of-range move is rejected when it acts; order it as priority 0.
                priority: active.get_move(*index).map_or(0, |m| m.priority),
                speed,
            },
            Action::Switch(_) | Action::TypeShift(_) => Initiative {
                tier: match self.rules.switch_priority {
                    SwitchPriority::SharedWithMoves => 0,
                    SwitchPriority::PreemptMoves => 1,
                },
                priority: 0,
                speed,
            },
        }
    }

    /// Resolve one turn, mutating `state` in place.
    ///
    /// An illegal action is refused on its own: it is recorded in the report
    /// and as an `ActionRejected` event, and the other side's action still
    /// runs. Fails only if the battle was already over.
    pub fn resolve_turn(
        &self,
        state: &mut BattleState,
        action_a: Action,
        action_b: Action,
        rng: &mut BattleRng,
    ) -> BattleResult<TurnReport> {
        ensure_ongoing(state)?;

        state.turn_number += 1;
        let turn_number = state.turn_number;
        let mut bus = EventBus::new();
        bus.push(BattleEvent::TurnStarted { turn_number });

        let order = self.determine_action_order(state, action_a, action_b, rng);
        let mut rejected = Vec::new();
        let mut faints = TurnFaints::default();

        for (side, action) in order {
            if state.is_terminal() {
                debug!(%side, %action, "battle over, remaining action not executed");
                break;
            }
            if faints.contains(side) {
                // A chosen switch to a healthy member still stands; anything
                // else belonged to the Pokemon that fainted.
                match chosen_switch_target(state, side, &action) {
                    Some(index) if index == state.side(side).active_index() => {
                        debug!(%side, index, "forced replacement already made the chosen switch");
                        continue;
                    }
                    Some(_) => {}
                    None => {
                        bus.push(BattleEvent::ActionSkipped {
                            side,
                            reason: SkipReason::PokemonFainted,
                        });
                        continue;
                    }
                }
            }

            debug!(turn_number, %side, %action, "executing action");
            if let Err(error) = self.execute_action(state, side, action, rng, &mut bus, &mut faints)
            {
                warn!(turn_number, %side, %action, %error, "action rejected");
                bus.push(BattleEvent::ActionRejected {
                    side,
                    error: error.clone(),
                });
                rejected.push(error);
            }
        }

        let outcome = state.outcome();
        if outcome.is_terminal() {
            info!(battle_id = %state.battle_id, turn_number, ?outcome, "battle ended");
            bus.push(BattleEvent::BattleEnded { outcome });
        }

        bus.log_debug_with_message(&format!("Turn {} events:", turn_number));

        Ok(TurnReport {
            turn_number,
            events: bus.into_events(),
            rejected,
            outcome,
        })
    }

    /// Resolve one turn only if both actions are legal now.
    ///
    /// On any rejection the whole turn is refused and `state` is left
    /// exactly as it was, turn counter included.
    pub fn resolve_turn_strict(
        &self,
        state: &mut BattleState,
        action_a: Action,
        action_b: Action,
        rng: &mut BattleRng,
    ) -> BattleResult<TurnReport> {
        ensure_ongoing(state)?;
        self.validate_action(state, Side::A, &action_a)?;
        self.validate_action(state, Side::B, &action_b)?;
        self.resolve_turn(state, action_a, action_b, rng)
    }

    fn execute_action(
        &self,
        state: &mut BattleState,
        side: Side,
        action: Action,
        rng: &mut BattleRng,
        bus: &mut EventBus,
        faints: &mut TurnFaints,
    ) -> ActionResult<()> {
        self.validate_action(state, side, &action)?;

        match action {
            Action::Move(index) => self.execute_move(state, side, index, rng, bus, faints)?,
            Action::Switch(index) => execute_switch(state, side, index, bus),
            Action::TypeShift(pokemon_type) => {
                let pokemon = state.active_pokemon_mut(side);
                pokemon.apply_type_shift(pokemon_type);
                let name = pokemon.name().to_string();
                state.side_mut(side).mark_type_shift_used();
                bus.push(BattleEvent::TypeShifted {
                    side,
                    pokemon: name,
                    new_type: pokemon_type,
                });
            }
        }

        Ok(())
    }

    fn execute_move(
        &self,
        state: &mut BattleState,
        side: Side,
        index: usize,
        rng: &mut BattleRng,
        bus: &mut EventBus,
        faints: &mut TurnFaints,
    ) -> ActionResult<()> {
        let defender_side = side.opponent();
        let attacker = state.active_pokemon(side);
        let move_data = attacker
            .get_move(index)
            .cloned()
            .ok_or(ActionError::InvalidMoveIndex { side, index })?;
        let attacker_name = attacker.name().to_string();

        bus.push(BattleEvent::MoveUsed {
            side,
            pokemon: attacker_name.clone(),
            move_name: move_data.name.clone(),
        });

        if self.rules.track_usage_budget {
            state.active_pokemon_mut(side).consume_use(index);
        }

        // Accuracy 0 never misses and draws nothing.
        if self.rules.roll_accuracy && move_data.accuracy > 0 {
            let accuracy = effective_accuracy(move_data.accuracy, state.active_pokemon(side));
            if rng.next_outcome("accuracy check") > accuracy {
                debug!(%side, move_name = %move_data.name, accuracy, "move missed");
                bus.push(BattleEvent::MoveMissed {
                    side,
                    pokemon: attacker_name,
                    move_name: move_data.name,
                });
                return Ok(());
            }
        }

        let mut damage_dealt = 0;
        if move_data.is_damaging() {
            let outcome = calculate_damage(
                state.active_pokemon(side),
                state.active_pokemon(defender_side),
                &move_data,
                rng,
            );
            if outcome.effectiveness != 1.0 {
                bus.push(BattleEvent::AttackTypeEffectiveness {
                    multiplier: outcome.effectiveness,
                });
            }

            let defender = state.active_pokemon_mut(defender_side);
            damage_dealt = defender.take_damage(outcome.damage);
            bus.push(BattleEvent::DamageDealt {
                side: defender_side,
                target: defender.name().to_string(),
                damage: damage_dealt,
                remaining_hp: defender.current_hp(),
            });
        }

        let context = EffectContext {
            attacker_side: side,
            defender_side,
            move_index: index,
            move_data,
            damage_dealt,
        };
        self.effects.dispatch(&context, state, rng, bus);

        // The hook may have hurt either side.
        for side in [defender_side, side] {
            handle_faint(state, side, bus, faints);
        }
        Ok(())
    }
}

fn ensure_ongoing(state: &BattleState) -> BattleResult<()> {
    let outcome = state.outcome();
    if outcome.is_terminal() {
        return Err(BattleStateError::TerminalStateViolation { outcome }.into());
    }
    Ok(())
}

fn execute_switch(state: &mut BattleState, side: Side, index: usize, bus: &mut EventBus) {
    let battle_side = state.side_mut(side);
    let old_pokemon = battle_side.active_pokemon().name().to_string();
    battle_side.set_active_index(index);
    bus.push(BattleEvent::PokemonSwitched {
        side,
        old_pokemon,
        new_pokemon: battle_side.active_pokemon().name().to_string(),
        forced: false,
    });
}

/// The roster slot a `Switch` action targets, if that member can still come in.
fn chosen_switch_target(state: &BattleState, side: Side, action: &Action) -> Option<usize> {
    match action {
        Action::Switch(index) => state
            .side(side)
            .roster
            .get(*index)
            .filter(|p| !p.is_fainted())
            .map(|_| *index),
        _ => None,
    }
}

/// Report a newly fainted active Pokemon and send in the lowest-index
/// healthy replacement, if the side has one left. Runs again for every
/// replacement that faints later in the same turn.
fn handle_faint(state: &mut BattleState, side: Side, bus: &mut EventBus, faints: &mut TurnFaints) {
    let battle_side = state.side_mut(side);
    let active_index = battle_side.active_index();
    if !battle_side.active_pokemon().is_fainted() || faints.is_reported(side, active_index) {
        return;
    }
    faints.insert(side, active_index);

    let fainted = battle_side.active_pokemon().name().to_string();
    bus.push(BattleEvent::PokemonFainted {
        side,
        pokemon: fainted.clone(),
    });

    let Some(replacement) = battle_side.roster.iter().position(|p| !p.is_fainted()) else {
        return;
    };
    battle_side.set_active_index(replacement);
    let new_pokemon = battle_side.active_pokemon().name().to_string();
    debug!(%side, %fainted, %new_pokemon, "forced replacement");
    bus.push(BattleEvent::PokemonSwitched {
        side,
        old_pokemon: fainted,
        new_pokemon,
        forced: true,
    });
}
