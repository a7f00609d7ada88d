use crate::battle::stats::StatStages;
use crate::errors::{TeamDataError, TeamDataResult};
use schema::{MoveData, PokemonTemplate, PokemonType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusCondition {
    Sleep,
    Poison,
    Burn,
    Freeze,
    Paralysis,
    Confusion,
}

/// The mutable in-battle representation of one roster member.
///
/// Created at full HP from its template when a battle starts. HP is only
/// changed through [`PokemonInst::take_damage`] and [`PokemonInst::heal`],
/// both of which keep `0 <= current_hp <= max_hp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub template: PokemonTemplate,
    current_hp: u16,
    pub status: BTreeSet<StatusCondition>,
    pub stat_stages: StatStages,
    type_shift: Option<PokemonType>,
    move_uses: Vec<u8>,
}

impl PokemonInst {
    /// Instantiate a template at full HP. Fails if the template breaks the
    /// shape the engine relies on.
    pub fn new(template: PokemonTemplate) -> TeamDataResult<Self> {
        validate_template(&template)?;
        let move_uses = template.moves.iter().map(|m| m.usage_budget).collect();
        Ok(Self {
            current_hp: template.base_stats.hp,
            template,
            status: BTreeSet::new(),
            stat_stages: StatStages::new(),
            type_shift: None,
            move_uses,
        })
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.template.base_stats.hp
    }

    pub fn hp_ratio(&self) -> f32 {
        match self.max_hp() {
            0 => 0.0,
            max => self.current_hp as f32 / max as f32,
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Deal damage, flooring HP at 0. Returns the HP actually removed.
    pub fn take_damage(&mut self, damage: u16) -> u16 {
        let dealt = damage.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Restore HP, capped at max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let healed = amount.min(self.max_hp() - self.current_hp);
        self.current_hp += healed;
        healed
    }

    /// Set HP directly, clamped into `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
    }

    pub fn moves(&self) -> &[MoveData] {
        &self.template.moves
    }

    pub fn get_move(&self, index: usize) -> Option<&MoveData> {
        self.template.moves.get(index)
    }

    pub fn remaining_uses(&self, index: usize) -> Option<u8> {
        self.move_uses.get(index).copied()
    }

    pub fn has_usable_move(&self) -> bool {
        self.move_uses.iter().any(|&uses| uses > 0)
    }

    /// Spend one use of a move; saturates at zero.
    pub fn consume_use(&mut self, index: usize) {
        if let Some(uses) = self.move_uses.get_mut(index) {
            *uses = uses.saturating_sub(1);
        }
    }

    pub fn is_type_shifted(&self) -> bool {
        self.type_shift.is_some()
    }

    pub fn type_shift(&self) -> Option<PokemonType> {
        self.type_shift
    }

    pub(crate) fn apply_type_shift(&mut self, pokemon_type: PokemonType) {
        self.type_shift = Some(pokemon_type);
    }

    /// Types used when this Pokemon is hit. A type shift replaces the
    /// original types with the single substituted type.
    pub fn defensive_types(&self) -> Vec<PokemonType> {
        match self.type_shift {
            Some(shifted) => vec![shifted],
            None => self.template.types.clone(),
        }
    }

    /// Same-type bonus applies for the original types, and for the shifted
    /// type once a shift has happened.
    pub fn has_stab(&self, move_type: PokemonType) -> bool {
        self.template.has_type(move_type) || self.type_shift == Some(move_type)
    }
}

fn validate_template(template: &PokemonTemplate) -> TeamDataResult<()> {
    let type_count = template.types.len();
    if type_count == 0 || type_count > PokemonTemplate::MAX_TYPES {
        return Err(TeamDataError::InvalidTypeCount {
            name: template.name.clone(),
            count: type_count,
        });
    }
    let move_count = template.moves.len();
    if move_count == 0 || move_count > PokemonTemplate::MAX_MOVES {
        return Err(TeamDataError::InvalidMoveCount {
            name: template.name.clone(),
            count: move_count,
        });
    }
    if template.base_stats.hp == 0 {
        return Err(TeamDataError::ZeroHp {
            name: template.name.clone(),
        });
    }
    Ok(())
}
