use crate::battle::state::{BattleOutcome, Side};
use schema::{PokemonType, StatType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the battle engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// An action that cannot be carried out in the current state
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// A stat stage supplied from outside the engine
    #[error("Stat stage error: {0}")]
    StatStage(#[from] StatStageError),
    /// The battle itself is in the wrong state for the request
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Team interchange data could not be used
    #[error("Team data error: {0}")]
    TeamData(#[from] TeamDataError),
    /// Battle configuration could not be parsed
    #[error("Config error: {0}")]
    Config(String),
}

/// Reasons a single action is rejected. A rejected action never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionError {
    #[error("{side} has no move in slot {index}")]
    InvalidMoveIndex { side: Side, index: usize },
    #[error("{side} has no roster member in slot {index}")]
    InvalidPokemonIndex { side: Side, index: usize },
    #[error("{side} roster member {index} is already active")]
    TargetAlreadyActive { side: Side, index: usize },
    #[error("{side} roster member {index} has fainted")]
    TargetFainted { side: Side, index: usize },
    #[error("{side} has already used its type shift")]
    TypeShiftAlreadyUsed { side: Side },
    #[error("{side} active Pokemon is not {pokemon_type}-type")]
    TypeShiftUnavailable {
        side: Side,
        pokemon_type: PokemonType,
    },
    #[error("{side} move in slot {index} has no uses left")]
    MoveDepleted { side: Side, index: usize },
}

impl ActionError {
    pub fn side(&self) -> Side {
        match self {
            ActionError::InvalidMoveIndex { side, .. }
            | ActionError::InvalidPokemonIndex { side, .. }
            | ActionError::TargetAlreadyActive { side, .. }
            | ActionError::TargetFainted { side, .. }
            | ActionError::TypeShiftAlreadyUsed { side }
            | ActionError::TypeShiftUnavailable { side, .. }
            | ActionError::MoveDepleted { side, .. } => *side,
        }
    }
}

/// An externally supplied stage outside `[-6, 6]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatStageError {
    #[error("{stat} stage {stage} is outside -6..=6")]
    OutOfRange { stat: StatType, stage: i8 },
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    #[error("battle is already over ({outcome:?}); no further turns can be resolved")]
    TerminalStateViolation { outcome: BattleOutcome },
    #[error("{side} roster is empty")]
    EmptyRoster { side: Side },
    #[error("{side} roster has {len} members but team size is {team_size}")]
    RosterTooLarge {
        side: Side,
        len: usize,
        team_size: usize,
    },
    #[error("rosters differ in length ({a} vs {b})")]
    RosterLengthMismatch { a: usize, b: usize },
    #[error("{side} active index {index} does not reference a healthy roster member")]
    InvalidActiveIndex { side: Side, index: usize },
    #[error("snapshot could not be encoded or decoded: {0}")]
    Snapshot(String),
    #[error("battle state is inconsistent: {0}")]
    InconsistentState(String),
}

/// Errors raised while turning interchange data into templates and rosters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamDataError {
    #[error("malformed team data: {0}")]
    Malformed(String),
    #[error("{name} must have 1 or 2 types, found {count}")]
    InvalidTypeCount { name: String, count: usize },
    #[error("{name} must have between 1 and 4 moves, found {count}")]
    InvalidMoveCount { name: String, count: usize },
    #[error("{name} has a base HP of zero")]
    ZeroHp { name: String },
    #[error("team is empty")]
    EmptyTeam,
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using ActionError
pub type ActionResult<T> = Result<T, ActionError>;

/// Type alias for Results using TeamDataError
pub type TeamDataResult<T> = Result<T, TeamDataError>;
