//! Team interchange.
//!
//! Teams arrive as text in either JSON or RON, as a list of creature
//! templates:
//!
//! ```json
//! [{"name": "Blaze", "types": ["Fire"],
//!   "base_stats": {"hp": 80, "attack": 120, "defense": 80,
//!                  "special_attack": 120, "special_defense": 80, "speed": 120},
//!   "abilities": [],
//!   "moves": [{"name": "Ember", "type": "Fire", "power": 40, "accuracy": 100,
//!              "usage_budget": 25, "priority": 0, "category": "Special"}],
//!   "item": null}]
//! ```
//!
//! Reading the text from disk or the network is the caller's business.

use crate::errors::{TeamDataError, TeamDataResult};
use crate::pokemon::PokemonInst;
use schema::PokemonTemplate;
use tracing::debug;

pub fn team_from_json(text: &str) -> TeamDataResult<Vec<PokemonTemplate>> {
    let templates: Vec<PokemonTemplate> =
        serde_json::from_str(text).map_err(|e| TeamDataError::Malformed(e.to_string()))?;
    validate_team(templates)
}

pub fn team_from_ron(text: &str) -> TeamDataResult<Vec<PokemonTemplate>> {
    let templates: Vec<PokemonTemplate> =
        ron::from_str(text).map_err(|e| TeamDataError::Malformed(e.to_string()))?;
    validate_team(templates)
}

pub fn team_to_json(templates: &[PokemonTemplate]) -> TeamDataResult<String> {
    serde_json::to_string_pretty(templates).map_err(|e| TeamDataError::Malformed(e.to_string()))
}

/// Instantiate every template at full HP, in roster order.
pub fn build_roster(templates: &[PokemonTemplate]) -> TeamDataResult<Vec<PokemonInst>> {
    if templates.is_empty() {
        return Err(TeamDataError::EmptyTeam);
    }
    templates
        .iter()
        .cloned()
        .map(PokemonInst::new)
        .collect()
}

fn validate_team(templates: Vec<PokemonTemplate>) -> TeamDataResult<Vec<PokemonTemplate>> {
    if templates.is_empty() {
        return Err(TeamDataError::EmptyTeam);
    }
    // Instantiating checks the template shape.
    for template in &templates {
        PokemonInst::new(template.clone())?;
    }
    debug!(members = templates.len(), "team loaded");
    Ok(templates)
}
