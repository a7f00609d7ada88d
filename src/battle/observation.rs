//! Fixed-shape numeric view of a battle for external decision-makers.
//!
//! Layout, for each side in order A then B and each roster slot up to the
//! configured team size:
//! `[hp_ratio, is_active, status_count, atk_stage/6, def_stage/6, spe_stage/6]`
//! (empty slots are all zeros), followed by
//! `[weather, terrain, trick_room, a_type_shift_used, b_type_shift_used, turn/100]`.

use crate::battle::state::{BattleState, Side};
use crate::battle::stats::MAX_STAGE;
use schema::StatType;

pub const SLOT_FEATURES: usize = 6;
pub const GLOBAL_FEATURES: usize = 6;
pub const TURN_NORMALIZER: f32 = 100.0;

pub fn observation_len(team_size: usize) -> usize {
    team_size * SLOT_FEATURES * 2 + GLOBAL_FEATURES
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl BattleState {
    pub fn observation(&self) -> Vec<f32> {
        let mut vector = Vec::with_capacity(observation_len(self.team_size));

        for side in Side::BOTH {
            let battle_side = self.side(side);
            for slot in 0..self.team_size {
                match battle_side.roster.get(slot) {
                    Some(pokemon) => {
                        let stage = |stat| pokemon.stat_stages.get(stat) as f32 / MAX_STAGE as f32;
                        vector.extend([
                            pokemon.hp_ratio(),
                            flag(slot == battle_side.active_index()),
                            pokemon.status.len() as f32,
                            stage(StatType::Attack),
                            stage(StatType::Defense),
                            stage(StatType::Speed),
                        ]);
                    }
                    None => vector.extend([0.0; SLOT_FEATURES]),
                }
            }
        }

        vector.extend([
            flag(self.field.weather.is_some()),
            flag(self.field.terrain.is_some()),
            flag(self.field.trick_room),
            flag(self.side(Side::A).type_shift_used()),
            flag(self.side(Side::B).type_shift_used()),
            self.turn_number as f32 / TURN_NORMALIZER,
        ]);

        vector
    }
}
