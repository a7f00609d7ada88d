use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::pokemon::PokemonInst;
use schema::{PokemonType, StatType};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "side A"),
            Side::B => write!(f, "side B"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Ongoing,
    Winner(Side),
    /// Both rosters were fully incapacitated by the same step.
    Draw,
}

impl BattleOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BattleOutcome::Ongoing)
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            BattleOutcome::Winner(side) => Some(side),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Sun,
    Rain,
    Sandstorm,
    Snow,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

/// Global field flags. Nothing in the engine sets these; they are exported
/// in observations, and `trick_room` inverts speed ordering when set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldState {
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub trick_room: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The acting Pokemon fainted earlier in the turn.
    PokemonFainted,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    TurnStarted {
        turn_number: u32,
    },
    MoveUsed {
        side: Side,
        pokemon: String,
        move_name: String,
    },
    MoveMissed {
        side: Side,
        pokemon: String,
        move_name: String,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        side: Side,
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonFainted {
        side: Side,
        pokemon: String,
    },
    PokemonSwitched {
        side: Side,
        old_pokemon: String,
        new_pokemon: String,
        forced: bool,
    },
    TypeShifted {
        side: Side,
        pokemon: String,
        new_type: PokemonType,
    },
    StatStageChanged {
        side: Side,
        pokemon: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    ActionRejected {
        side: Side,
        error: ActionError,
    },
    ActionSkipped {
        side: Side,
        reason: SkipReason,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

/// Event bus for collecting battle events in the order they happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Emit every event at debug level under a header message.
    pub fn log_debug_with_message(&self, message: &str) {
        debug!("{}", message);
        for event in &self.events {
            debug!(?event, "battle event");
        }
    }
}

/// One side's roster, active slot and one-shot type-shift flag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleSide {
    pub roster: Vec<PokemonInst>,
    active_index: usize,
    type_shift_used: bool,
}

impl BattleSide {
    pub fn new(roster: Vec<PokemonInst>) -> Self {
        Self {
            roster,
            active_index: 0,
            type_shift_used: false,
        }
    }

    /// Start with a specific active roster member instead of slot 0.
    pub fn with_active_index(mut self, index: usize) -> Self {
        self.active_index = index;
        self
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_pokemon(&self) -> &PokemonInst {
        &self.roster[self.active_index]
    }

    pub fn active_pokemon_mut(&mut self) -> &mut PokemonInst {
        &mut self.roster[self.active_index]
    }

    pub fn type_shift_used(&self) -> bool {
        self.type_shift_used
    }

    pub fn is_defeated(&self) -> bool {
        self.roster.iter().all(PokemonInst::is_fainted)
    }

    pub fn remaining_hp(&self) -> u32 {
        self.roster.iter().map(|p| p.current_hp() as u32).sum()
    }

    /// Benched roster members that can be switched in.
    pub fn switch_targets(&self) -> impl Iterator<Item = usize> + '_ {
        self.roster
            .iter()
            .enumerate()
            .filter(move |(i, p)| *i != self.active_index && !p.is_fainted())
            .map(|(i, _)| i)
    }

    pub(crate) fn set_active_index(&mut self, index: usize) {
        self.active_index = index;
    }

    pub(crate) fn mark_type_shift_used(&mut self) {
        self.type_shift_used = true;
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleState {
    pub battle_id: String,
    pub team_size: usize,
    pub sides: [BattleSide; 2],
    pub turn_number: u32,
    pub field: FieldState,
}

impl BattleState {
    /// Start a battle. Rosters must be non-empty, equally long, no longer than
    /// `team_size`, and each side's active slot must hold a healthy member.
    pub fn new(
        battle_id: impl Into<String>,
        team_size: usize,
        side_a: BattleSide,
        side_b: BattleSide,
    ) -> BattleResult<Self> {
        let state = Self {
            battle_id: battle_id.into(),
            team_size,
            sides: [side_a, side_b],
            turn_number: 0,
            field: FieldState::default(),
        };
        state.validate_setup()?;
        Ok(state)
    }

    /// Convenience constructor from two rosters with slot 0 active.
    pub fn from_rosters(
        battle_id: impl Into<String>,
        team_size: usize,
        roster_a: Vec<PokemonInst>,
        roster_b: Vec<PokemonInst>,
    ) -> BattleResult<Self> {
        Self::new(
            battle_id,
            team_size,
            BattleSide::new(roster_a),
            BattleSide::new(roster_b),
        )
    }

    pub fn side(&self, side: Side) -> &BattleSide {
        &self.sides[side.index()]
    }

    pub fn side_mut(&mut self, side: Side) -> &mut BattleSide {
        &mut self.sides[side.index()]
    }

    pub fn active_pokemon(&self, side: Side) -> &PokemonInst {
        self.side(side).active_pokemon()
    }

    pub fn active_pokemon_mut(&mut self, side: Side) -> &mut PokemonInst {
        self.side_mut(side).active_pokemon_mut()
    }

    // === Outcome Check ===

    pub fn is_side_defeated(&self, side: Side) -> bool {
        self.side(side).is_defeated()
    }

    pub fn outcome(&self) -> BattleOutcome {
        match (
            self.is_side_defeated(Side::A),
            self.is_side_defeated(Side::B),
        ) {
            (true, true) => BattleOutcome::Draw,
            (true, false) => BattleOutcome::Winner(Side::B),
            (false, true) => BattleOutcome::Winner(Side::A),
            (false, false) => BattleOutcome::Ongoing,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    pub fn winner(&self) -> Option<Side> {
        self.outcome().winner()
    }

    // === Snapshots ===

    pub fn to_snapshot(&self) -> BattleResult<Vec<u8>> {
        postcard::to_allocvec(self)
            .map_err(|e| BattleStateError::Snapshot(e.to_string()).into())
    }

    /// Restore a snapshot, rejecting one whose invariants do not hold.
    pub fn from_snapshot(bytes: &[u8]) -> BattleResult<Self> {
        let state: Self =
            postcard::from_bytes(bytes).map_err(|e| BattleStateError::Snapshot(e.to_string()))?;
        state.validate_snapshot()?;
        Ok(state)
    }

    fn validate_setup(&self) -> Result<(), BattleStateError> {
        self.validate_rosters()?;
        for side in Side::BOTH {
            let battle_side = self.side(side);
            let index = battle_side.active_index;
            if battle_side
                .roster
                .get(index)
                .map_or(true, PokemonInst::is_fainted)
            {
                return Err(BattleStateError::InvalidActiveIndex { side, index });
            }
        }
        Ok(())
    }

    fn validate_snapshot(&self) -> Result<(), BattleStateError> {
        self.validate_rosters()?;
        for side in Side::BOTH {
            let battle_side = self.side(side);
            let index = battle_side.active_index;
            let Some(active) = battle_side.roster.get(index) else {
                return Err(BattleStateError::InvalidActiveIndex { side, index });
            };
            // A fainted active member is only legal once the whole side is down.
            if active.is_fainted() && !battle_side.is_defeated() {
                return Err(BattleStateError::InvalidActiveIndex { side, index });
            }
            if let Some(p) = battle_side
                .roster
                .iter()
                .find(|p| p.current_hp() > p.max_hp())
            {
                return Err(BattleStateError::InconsistentState(format!(
                    "{} has {} HP out of {}",
                    p.name(),
                    p.current_hp(),
                    p.max_hp()
                )));
            }
        }
        Ok(())
    }

    fn validate_rosters(&self) -> Result<(), BattleStateError> {
        for side in Side::BOTH {
            let len = self.side(side).roster.len();
            if len == 0 {
                return Err(BattleStateError::EmptyRoster { side });
            }
            if len > self.team_size {
                return Err(BattleStateError::RosterTooLarge {
                    side,
                    len,
                    team_size: self.team_size,
                });
            }
        }
        let (a, b) = (self.sides[0].roster.len(), self.sides[1].roster.len());
        if a != b {
            return Err(BattleStateError::RosterLengthMismatch { a, b });
        }
        Ok(())
    }
}
