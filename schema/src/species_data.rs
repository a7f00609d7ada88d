use crate::battle_data::MoveData;
use crate::pokemon_types::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn new(
        hp: u16,
        attack: u16,
        defense: u16,
        special_attack: u16,
        special_defense: u16,
        speed: u16,
    ) -> Self {
        Self {
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        }
    }

    /// Same value for all six stats.
    pub fn uniform(value: u16) -> Self {
        Self::new(value, value, value, value, value, value)
    }
}

/// Immutable species-level definition a roster member is instantiated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonTemplate {
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub abilities: Vec<String>,
    pub moves: Vec<MoveData>,
    #[serde(default)]
    pub item: Option<String>,
}

impl PokemonTemplate {
    pub const MAX_TYPES: usize = 2;
    pub const MAX_MOVES: usize = 4;

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }
}
