use crate::battle::state::BattleState;
use crate::config::DEFAULT_TEAM_SIZE;
use crate::errors::{BattleResult, TeamDataResult};
use crate::pokemon::PokemonInst;
use crate::teams::build_roster;
use schema::{BaseStats, MoveCategory, MoveData, PokemonTemplate, PokemonType};
use serde::{Deserialize, Serialize};

pub const NORMAL_TEAM_ID: &str = "normal_team";
pub const FIRE_TEAM_ID: &str = "fire_team";

/// A predefined roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefabTeam {
    pub id: String,
    pub name: String,
    pub description: String,
    pub members: Vec<PokemonTemplate>,
}

impl PrefabTeam {
    pub fn roster(&self) -> TeamDataResult<Vec<PokemonInst>> {
        build_roster(&self.members)
    }
}

fn member(
    name: &str,
    pokemon_type: PokemonType,
    base_stats: BaseStats,
    moves: Vec<MoveData>,
) -> PokemonTemplate {
    PokemonTemplate {
        name: name.to_string(),
        types: vec![pokemon_type],
        base_stats,
        abilities: Vec::new(),
        moves,
        item: None,
    }
}

fn normal_moves() -> Vec<MoveData> {
    vec![
        MoveData::new("Tackle", PokemonType::Normal, 40, MoveCategory::Physical).with_usage_budget(35),
        MoveData::new("Body Slam", PokemonType::Normal, 85, MoveCategory::Physical).with_usage_budget(15),
        MoveData::new("Hyper Voice", PokemonType::Normal, 90, MoveCategory::Special).with_usage_budget(10),
        MoveData::new("Quick Attack", PokemonType::Normal, 40, MoveCategory::Physical)
            .with_priority(1)
            .with_usage_budget(30),
    ]
}

fn fire_moves() -> Vec<MoveData> {
    vec![
        MoveData::new("Ember", PokemonType::Fire, 40, MoveCategory::Special).with_usage_budget(25),
        MoveData::new("Flamethrower", PokemonType::Fire, 90, MoveCategory::Special).with_usage_budget(15),
        MoveData::new("Fire Fang", PokemonType::Fire, 65, MoveCategory::Physical)
            .with_accuracy(95)
            .with_usage_budget(15),
        MoveData::new("Fire Blast", PokemonType::Fire, 110, MoveCategory::Special)
            .with_accuracy(85)
            .with_usage_budget(5),
    ]
}

/// Six Normal-types with 100 in every stat and only Normal moves.
pub fn normal_team() -> PrefabTeam {
    let names = ["Patch", "Whisker", "Bristle", "Tumble", "Muffin", "Rascal"];
    PrefabTeam {
        id: NORMAL_TEAM_ID.to_string(),
        name: "Normal Team".to_string(),
        description: "Six balanced Normal-types with Normal moves".to_string(),
        members: names
            .iter()
            .map(|name| member(name, PokemonType::Normal, BaseStats::uniform(100), normal_moves()))
            .collect(),
    }
}

/// Six Fire-types, 80/120/80/120/80/120, with only Fire moves.
pub fn fire_team() -> PrefabTeam {
    let names = ["Cinder", "Ember", "Scorch", "Flare", "Ashen", "Blaze"];
    let stats = BaseStats::new(80, 120, 80, 120, 80, 120);
    PrefabTeam {
        id: FIRE_TEAM_ID.to_string(),
        name: "Fire Team".to_string(),
        description: "Six fast, frail Fire-types with Fire moves".to_string(),
        members: names
            .iter()
            .map(|name| member(name, PokemonType::Fire, stats, fire_moves()))
            .collect(),
    }
}

pub fn get_prefab_teams() -> Vec<PrefabTeam> {
    vec![normal_team(), fire_team()]
}

pub fn get_prefab_team(team_id: &str) -> Option<PrefabTeam> {
    get_prefab_teams().into_iter().find(|team| team.id == team_id)
}

/// The Normal team on side A against the Fire team on side B.
pub fn normal_vs_fire_battle(battle_id: &str) -> BattleResult<BattleState> {
    let side_a = normal_team().roster()?;
    let side_b = fire_team().roster()?;
    BattleState::from_rosters(battle_id, DEFAULT_TEAM_SIZE, side_a, side_b)
}
