//! Tera Battle Engine
//!
//! A deterministic, turn-based two-sided creature battle engine: type
//! effectiveness, stat stages, priority and speed ordering, and a one-shot
//! per-side type shift. The engine owns no I/O and no global state; every
//! battle is a self-contained [`BattleState`] driven by a [`BattleEngine`]
//! and a single seeded [`BattleRng`].

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod pokemon;
pub mod prefab_teams;
pub mod teams;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, MoveCategory, MoveData, PokemonTemplate, PokemonType, StatType,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine and state.
pub use battle::actions::{legal_actions, legal_actions_with_rules, validate_action, Action};
pub use battle::engine::{BattleEngine, TurnReport};
pub use battle::observation::observation_len;
pub use battle::rng::BattleRng;
pub use battle::state::{BattleEvent, BattleOutcome, BattleSide, BattleState, EventBus, Side};
pub use battle::stats::StatStages;

// Decision-makers and the full-battle driver.
pub use battle::ai::{Behavior, RandomBehavior, ScoringAI};
pub use battle::runner::{BattleRunner, BattleSummary};

// Effect hooks.
pub use battle::effects::{EffectContext, EffectRegistry, MoveEffectHook, StatStageEffect};

pub use config::{BattleConfig, RuleSet, SwitchPriority};
pub use pokemon::{PokemonInst, StatusCondition};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, StatStageError, TeamDataError,
    TeamDataResult,
};
