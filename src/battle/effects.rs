//! Secondary move effects.
//!
//! A move's optional `effect` tag is looked up in an [`EffectRegistry`] after
//! its damage has been applied. Tags with no registered hook are ignored, and
//! the default registry is empty, so out of the box every move is pure damage.

use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleState, EventBus, Side};
use schema::{MoveData, StatType};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// What the hook knows about the move that triggered it.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectContext {
    pub attacker_side: Side,
    pub defender_side: Side,
    pub move_index: usize,
    pub move_data: MoveData,
    /// HP actually removed from the defender by this use.
    pub damage_dealt: u16,
}

/// A secondary mechanic attached to a move by its effect tag.
///
/// Hooks may change the state freely but must keep its invariants by going
/// through the clamping mutators (`take_damage`, `heal`, `StatStages::boost`).
/// Faints caused by a hook are handled by the engine after the hook returns.
pub trait MoveEffectHook: Send + Sync {
    fn apply(
        &self,
        context: &EffectContext,
        state: &mut BattleState,
        rng: &mut BattleRng,
        bus: &mut EventBus,
    );
}

#[derive(Default)]
pub struct EffectRegistry {
    hooks: HashMap<String, Box<dyn MoveEffectHook>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` under `tag`, replacing any hook already there.
    pub fn register(&mut self, tag: impl Into<String>, hook: impl MoveEffectHook + 'static) {
        self.hooks.insert(tag.into(), Box::new(hook));
    }

    pub fn with_hook(mut self, tag: impl Into<String>, hook: impl MoveEffectHook + 'static) -> Self {
        self.register(tag, hook);
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.hooks.contains_key(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run the hook for the move in `context`, if it has a tag with one.
    pub fn dispatch(
        &self,
        context: &EffectContext,
        state: &mut BattleState,
        rng: &mut BattleRng,
        bus: &mut EventBus,
    ) {
        let Some(tag) = context.move_data.effect.as_deref() else {
            return;
        };
        match self.hooks.get(tag) {
            Some(hook) => hook.apply(context, state, rng, bus),
            None => trace!(tag, move_name = %context.move_data.name, "no hook registered for effect"),
        }
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("EffectRegistry").field("tags", &tags).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    User,
    Target,
}

/// Shift one stat stage of the user or the target, clamped to `[-6, 6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatStageEffect {
    pub target: EffectTarget,
    pub stat: StatType,
    pub delta: i8,
}

impl StatStageEffect {
    pub fn new(target: EffectTarget, stat: StatType, delta: i8) -> Self {
        Self {
            target,
            stat,
            delta,
        }
    }
}

impl MoveEffectHook for StatStageEffect {
    fn apply(
        &self,
        context: &EffectContext,
        state: &mut BattleState,
        _rng: &mut BattleRng,
        bus: &mut EventBus,
    ) {
        let side = match self.target {
            EffectTarget::User => context.attacker_side,
            EffectTarget::Target => context.defender_side,
        };
        let pokemon = state.active_pokemon_mut(side);
        if pokemon.is_fainted() {
            return;
        }

        let old_stage = pokemon.stat_stages.get(self.stat);
        if pokemon.stat_stages.boost(self.stat, self.delta) == 0 {
            return;
        }

        bus.push(BattleEvent::StatStageChanged {
            side,
            pokemon: pokemon.name().to_string(),
            stat: self.stat,
            old_stage,
            new_stage: pokemon.stat_stages.get(self.stat),
        });
    }
}
