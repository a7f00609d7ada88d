#[cfg(test)]
mod tests {
    use crate::battle::actions::{legal_actions, Action};
    use crate::battle::effects::{EffectContext, EffectRegistry, MoveEffectHook};
    use crate::battle::engine::BattleEngine;
    use crate::battle::rng::BattleRng;
    use crate::battle::state::{BattleEvent, BattleOutcome, BattleState, EventBus, SkipReason, Side};
    use crate::battle::tests::common::{create_team_battle, predictable_rng, TestPokemonBuilder};
    use crate::pokemon::PokemonInst;
    use pretty_assertions::assert_eq;
    use schema::{MoveCategory, MoveData, PokemonType};

    fn member(name: &str, speed: u16, hp: Option<u16>) -> PokemonInst {
        let builder = TestPokemonBuilder::new(name, vec![PokemonType::Normal]).with_speed(speed);
        match hp {
            Some(hp) => builder.with_hp(hp).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn test_fainted_active_is_replaced_and_its_action_skipped() {
        let mut state = create_team_battle(
            vec![member("Striker", 150, None), member("Reserve", 150, None)],
            vec![member("Weak", 50, Some(1)), member("Healthy", 50, None)],
        );

        let report = BattleEngine::default()
            .resolve_turn(&mut state, Action::Move(0), Action::Move(0), &mut predictable_rng())
            .unwrap();

        assert_eq!(
            report.events[1..],
            [
                BattleEvent::MoveUsed {
                    side: Side::A,
                    pokemon: "Striker".to_string(),
                    move_name: "Tackle".to_string(),
                },
                BattleEvent::DamageDealt {
                    side: Side::B,
                    target: "Weak".to_string(),
                    damage: 1,
                    remaining_hp: 0,
                },
                BattleEvent::PokemonFainted {
                    side: Side::B,
                    pokemon: "Weak".to_string(),
                },
                BattleEvent::PokemonSwitched {
                    side: Side::B,
                    old_pokemon: "Weak".to_string(),
                    new_pokemon: "Healthy".to_string(),
                    forced: true,
                },
                BattleEvent::ActionSkipped {
                    side: Side::B,
                    reason: SkipReason::PokemonFainted,
                },
            ]
        );
        assert_eq!(report.outcome, BattleOutcome::Ongoing);
        assert_eq!(state.side(Side::B).active_index(), 1);
        assert_eq!(state.active_pokemon(Side::B).current_hp(), 100);
        assert!(!legal_actions(&state, Side::B).is_empty());
    }

    #[test]
    fn test_replacement_is_the_lowest_index_healthy_member() {
        let mut state = create_team_battle(
            vec![
                member("Striker", 150, None),
                member("R1", 150, None),
                member("R2", 150, None),
            ],
            vec![
                member("Weak", 50, Some(1)),
                member("Down", 50, Some(0)),
                member("Healthy", 50, None),
            ],
        );

        BattleEngine::default()
            .resolve_turn(&mut state, Action::Move(0), Action::Move(0), &mut predictable_rng())
            .unwrap();

        assert_eq!(state.side(Side::B).active_index(), 2);
    }

    #[test]
    fn test_side_that_already_acted_is_replaced_without_a_skip() {
        let mut state = create_team_battle(
            vec![member("Slowpoke", 50, None), member("Reserve", 50, None)],
            vec![member("Quick", 150, Some(1)), member("Healthy", 150, None)],
        );
        let engine = BattleEngine::default();

        let report = engine
            .resolve_turn(&mut state, Action::Move(0), Action::Move(0), &mut predictable_rng())
            .unwrap();

        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::ActionSkipped { .. })));
        assert_eq!(state.side(Side::B).active_index(), 1);

        // The replacement acts normally next turn.
        let report = engine
            .resolve_turn(&mut state, Action::Move(0), Action::Move(0), &mut predictable_rng())
            .unwrap();
        let users: Vec<String> = report
            .events
            .iter()
            .filter_map(|e| match e {
                BattleEvent::MoveUsed { pokemon, .. } => Some(pokemon.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(users, vec!["Healthy".to_string(), "Slowpoke".to_string()]);
    }

    #[test]
    fn test_last_member_fainting_ends_the_battle() {
        let mut state = create_team_battle(
            vec![member("Striker", 150, None), member("Reserve", 150, None)],
            vec![member("Weak", 50, Some(1)), member("Down", 50, Some(0))],
        );

        let report = BattleEngine::default()
            .resolve_turn(&mut state, Action::Move(0), Action::Move(0), &mut predictable_rng())
            .unwrap();

        assert_eq!(report.outcome, BattleOutcome::Winner(Side::A));
        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::PokemonSwitched { .. })));
        assert_eq!(state.side(Side::B).remaining_hp(), 0);
    }

    #[test]
    fn test_chosen_switch_survives_the_active_fainting() {
        let mut state = create_team_battle(
            vec![member("Striker", 150, None), member("Reserve", 150, None)],
            vec![
                member("Weak", 50, Some(1)),
                member("Healthy", 50, None),
                member("Chosen", 50, None),
            ],
        );

        let report = BattleEngine::default()
            .resolve_turn(&mut state, Action::Move(0), Action::Switch(2), &mut predictable_rng())
            .unwrap();

        assert!(report.rejected.is_empty());
        assert_eq!(
            report.events[4..],
            [
                BattleEvent::PokemonSwitched {
                    side: Side::B,
                    old_pokemon: "Weak".to_string(),
                    new_pokemon: "Healthy".to_string(),
                    forced: true,
                },
                BattleEvent::PokemonSwitched {
                    side: Side::B,
                    old_pokemon: "Healthy".to_string(),
                    new_pokemon: "Chosen".to_string(),
                    forced: false,
                },
            ]
        );
        assert_eq!(state.side(Side::B).active_index(), 2);
    }

    #[test]
    fn test_chosen_switch_matching_the_replacement_is_not_repeated() {
        let mut state = create_team_battle(
            vec![member("Striker", 150, None), member("Reserve", 150, None)],
            vec![member("Weak", 50, Some(1)), member("Healthy", 50, None)],
        );

        let report = BattleEngine::default()
            .resolve_turn(&mut state, Action::Move(0), Action::Switch(1), &mut predictable_rng())
            .unwrap();

        let switches = report
            .events
            .iter()
            .filter(|e| matches!(e, BattleEvent::PokemonSwitched { .. }))
            .count();
        assert_eq!(switches, 1);
        assert!(report.rejected.is_empty());
        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::ActionSkipped { .. })));
        assert_eq!(state.side(Side::B).active_index(), 1);
    }

    /// Knocks out the user after its move lands.
    struct Recoil;

    impl MoveEffectHook for Recoil {
        fn apply(
            &self,
            context: &EffectContext,
            state: &mut BattleState,
            _rng: &mut BattleRng,
            _bus: &mut EventBus,
        ) {
            let user = state.active_pokemon_mut(context.attacker_side);
            let hp = user.current_hp();
            user.take_damage(hp);
        }
    }

    #[test]
    fn test_replacement_fainting_in_the_same_turn_is_replaced_again() {
        let boom = MoveData::new("Boom", PokemonType::Normal, 40, MoveCategory::Physical)
            .with_effect("recoil");
        let bomber = TestPokemonBuilder::new("Bomber", vec![PokemonType::Normal])
            .with_speed(150)
            .with_moves(vec![boom])
            .build();
        let mut state = create_team_battle(
            vec![
                member("Striker", 50, None),
                member("R1", 50, None),
                member("R2", 50, None),
            ],
            vec![bomber, member("Fragile", 50, Some(1)), member("Anchor", 50, None)],
        );
        let engine = BattleEngine::default().with_effects(EffectRegistry::new().with_hook("recoil", Recoil));

        let report = engine
            .resolve_turn(&mut state, Action::Move(0), Action::Move(0), &mut predictable_rng())
            .unwrap();

        let fainted: Vec<String> = report
            .events
            .iter()
            .filter_map(|e| match e {
                BattleEvent::PokemonFainted { side: Side::B, pokemon } => Some(pokemon.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(fainted, vec!["Bomber".to_string(), "Fragile".to_string()]);
        assert_eq!(report.outcome, BattleOutcome::Ongoing);
        assert_eq!(state.side(Side::B).active_index(), 2);
        assert!(!state.active_pokemon(Side::B).is_fainted());
        assert!(!legal_actions(&state, Side::B).is_empty());
    }
}
