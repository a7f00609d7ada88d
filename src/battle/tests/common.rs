use crate::battle::rng::BattleRng;
use crate::battle::state::BattleState;
use crate::config::DEFAULT_TEAM_SIZE;
use crate::errors::BattleResult;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{BaseStats, MoveCategory, MoveData, PokemonTemplate, PokemonType};

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Sparky", vec![PokemonType::Electric])
///     .with_speed(130)
///     .with_moves(vec![tackle()])
///     .with_hp(20)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    types: Vec<PokemonType>,
    base_stats: BaseStats,
    moves: Option<Vec<MoveData>>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    /// Creates a new builder with 100 in every stat and a single Tackle.
    pub fn new(name: &str, types: Vec<PokemonType>) -> Self {
        Self {
            name: name.to_string(),
            types,
            base_stats: BaseStats::uniform(100),
            moves: None,
            status: None,
            current_hp: None,
        }
    }

    pub fn with_stats(mut self, base_stats: BaseStats) -> Self {
        self.base_stats = base_stats;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.base_stats.speed = speed;
        self
    }

    pub fn with_moves(mut self, moves: Vec<MoveData>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> PokemonInst {
        let template = PokemonTemplate {
            name: self.name,
            types: self.types,
            base_stats: self.base_stats,
            abilities: Vec::new(),
            moves: self.moves.unwrap_or_else(|| vec![tackle()]),
            item: None,
        };
        let mut pokemon = match PokemonInst::new(template) {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to build test Pokemon: {}", err),
        };
        if let Some(status) = self.status {
            pokemon.status.insert(status);
        }
        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }
        pokemon
    }
}

/// Shorthand for a Pokemon with the same value in every stat.
pub fn pokemon(name: &str, types: Vec<PokemonType>, stat: u16) -> PokemonInst {
    TestPokemonBuilder::new(name, types)
        .with_stats(BaseStats::uniform(stat))
        .build()
}

pub fn tackle() -> MoveData {
    MoveData::new("Tackle", PokemonType::Normal, 40, MoveCategory::Physical)
}

pub fn quick_attack() -> MoveData {
    MoveData::new("Quick Attack", PokemonType::Normal, 40, MoveCategory::Physical).with_priority(1)
}

pub fn growl() -> MoveData {
    MoveData::new("Growl", PokemonType::Normal, 0, MoveCategory::Status)
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(side_a: PokemonInst, side_b: PokemonInst) -> BattleState {
    create_team_battle(vec![side_a], vec![side_b])
}

/// Creates a battle between two rosters with slot 0 active on both sides.
pub fn create_team_battle(roster_a: Vec<PokemonInst>, roster_b: Vec<PokemonInst>) -> BattleState {
    assert_ok(BattleState::from_rosters(
        "test_battle",
        DEFAULT_TEAM_SIZE,
        roster_a,
        roster_b,
    ))
}

/// Creates a `BattleRng` with a long list of mid-range outcomes.
/// Useful for tests where the specific outcome is not important, preventing panics from exhaustion.
pub fn predictable_rng() -> BattleRng {
    BattleRng::scripted(vec![50; 100])
}

/// Route engine logs to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
