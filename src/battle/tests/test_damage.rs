#[cfg(test)]
mod tests {
    use crate::battle::actions::Action;
    use crate::battle::engine::BattleEngine;
    use crate::battle::rng::BattleRng;
    use crate::battle::state::{BattleEvent, Side};
    use crate::battle::tests::common::{create_test_battle, growl, predictable_rng, TestPokemonBuilder};
    use pretty_assertions::assert_eq;
    use schema::{BaseStats, MoveCategory, MoveData, PokemonType};

    fn damage_events(events: &[BattleEvent]) -> Vec<(Side, u16, u16)> {
        events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::DamageDealt {
                    side,
                    damage,
                    remaining_hp,
                    ..
                } => Some((*side, *damage, *remaining_hp)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_overkill_floors_hp_at_zero() {
        let nuke = MoveData::new("Blast", PokemonType::Fire, 250, MoveCategory::Special);
        let attacker = TestPokemonBuilder::new("Cannon", vec![PokemonType::Fire])
            .with_stats(BaseStats::new(100, 100, 100, 255, 100, 200))
            .with_moves(vec![nuke])
            .build();
        let defender = TestPokemonBuilder::new("Leaf", vec![PokemonType::Grass])
            .with_stats(BaseStats::new(30, 10, 10, 10, 10, 10))
            .build();
        let mut state = create_test_battle(attacker, defender);

        let report = BattleEngine::default()
            .resolve_turn(&mut state, Action::Move(0), Action::Move(0), &mut predictable_rng())
            .unwrap();

        // Only the remaining 30 HP are reported as dealt.
        assert_eq!(damage_events(&report.events), vec![(Side::B, 30, 0)]);
        assert_eq!(state.active_pokemon(Side::B).current_hp(), 0);
    }

    #[test]
    fn test_weak_resisted_hit_still_deals_one() {
        // 0.84 * 10 * 1 / 255 + 2 is about 2.03; halved and rolled at 0.85 it floors to 0.
        let poke = MoveData::new("Poke", PokemonType::Normal, 10, MoveCategory::Physical);
        let attacker = TestPokemonBuilder::new("Tiny", vec![PokemonType::Water])
            .with_stats(BaseStats::new(100, 1, 100, 100, 100, 200))
            .with_moves(vec![poke])
            .build();
        let defender = TestPokemonBuilder::new("Boulder", vec![PokemonType::Rock])
            .with_stats(BaseStats::new(100, 100, 255, 100, 100, 10))
            .with_moves(vec![growl()])
            .build();
        let mut state = create_test_battle(attacker, defender);

        let report = BattleEngine::default()
            .resolve_turn(
                &mut state,
                Action::Move(0),
                Action::Move(0),
                &mut BattleRng::scripted(vec![1]),
            )
            .unwrap();

        assert_eq!(damage_events(&report.events), vec![(Side::B, 1, 99)]);
    }

    #[test]
    fn test_status_moves_never_touch_hp_or_the_rng() {
        let attacker = TestPokemonBuilder::new("Loud", vec![PokemonType::Normal])
            .with_speed(150)
            .with_moves(vec![growl()])
            .build();
        let defender = TestPokemonBuilder::new("Quiet", vec![PokemonType::Normal])
            .with_moves(vec![growl()])
            .build();
        let mut state = create_test_battle(attacker, defender);

        let report = BattleEngine::default()
            .resolve_turn(
                &mut state,
                Action::Move(0),
                Action::Move(0),
                &mut BattleRng::scripted(vec![]),
            )
            .unwrap();

        assert!(damage_events(&report.events).is_empty());
        assert_eq!(state.active_pokemon(Side::A).current_hp(), 100);
        assert_eq!(state.active_pokemon(Side::B).current_hp(), 100);
    }

    #[test]
    fn test_hp_stays_in_bounds_over_many_turns() {
        // Two hits from A always knock B out before B's second hit lands.
        let attacker = TestPokemonBuilder::new("A", vec![PokemonType::Normal])
            .with_stats(BaseStats::new(100, 150, 100, 100, 100, 120))
            .build();
        let defender = TestPokemonBuilder::new("B", vec![PokemonType::Normal]).build();
        let mut state = create_test_battle(attacker, defender);
        let engine = BattleEngine::default();
        let mut rng = BattleRng::seeded(3);

        while !state.is_terminal() {
            let report = engine
                .resolve_turn(&mut state, Action::Move(0), Action::Move(0), &mut rng)
                .unwrap();
            for (side, _, remaining) in damage_events(&report.events) {
                assert!(remaining <= state.active_pokemon(side).max_hp());
            }
            for side in Side::BOTH {
                let pokemon = state.active_pokemon(side);
                assert!(pokemon.current_hp() <= pokemon.max_hp());
            }
        }
        assert_eq!(state.winner(), Some(Side::A));
    }
}
