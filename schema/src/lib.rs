// Tera Battle Schema - Shared type definitions
// Types, stats, moves and creature templates in the interchange shape that
// team loaders produce and the battle engine consumes.

pub use battle_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod pokemon_types;
pub mod species_data;
