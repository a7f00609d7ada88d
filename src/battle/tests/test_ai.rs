#[cfg(test)]
mod tests {
    use crate::battle::actions::{legal_actions, Action};
    use crate::battle::ai::{Behavior, RandomBehavior, ScoringAI};
    use crate::battle::rng::BattleRng;
    use crate::battle::state::Side;
    use crate::battle::tests::common::{create_team_battle, create_test_battle, tackle, TestPokemonBuilder};
    use pretty_assertions::assert_eq;
    use schema::{MoveCategory, MoveData, PokemonType};

    fn ember() -> MoveData {
        MoveData::new("Ember", PokemonType::Fire, 40, MoveCategory::Special)
    }

    #[test]
    fn test_scoring_ai_prefers_the_super_effective_move() {
        let attacker = TestPokemonBuilder::new("Torch", vec![PokemonType::Fire])
            .with_moves(vec![tackle(), ember()])
            .build();
        let defender = TestPokemonBuilder::new("Leaf", vec![PokemonType::Grass]).build();
        let state = create_test_battle(attacker, defender);
        let legal = legal_actions(&state, Side::A);

        let action = ScoringAI::new().decide_action(Side::A, &state, &legal, &mut BattleRng::scripted(vec![]));
        assert_eq!(action, Some(Action::Move(1)));
    }

    #[test]
    fn test_scoring_ai_switches_away_from_an_immune_target() {
        let lead = TestPokemonBuilder::new("Lead", vec![PokemonType::Normal]).build();
        let bench = TestPokemonBuilder::new("Bench", vec![PokemonType::Normal]).build();
        let ghost = TestPokemonBuilder::new("Ghost", vec![PokemonType::Ghost]).build();
        let ghost_bench = TestPokemonBuilder::new("Ghost2", vec![PokemonType::Ghost]).build();
        let state = create_team_battle(vec![lead, bench], vec![ghost, ghost_bench]);
        let legal = legal_actions(&state, Side::A);

        let action = ScoringAI::new().decide_action(Side::A, &state, &legal, &mut BattleRng::scripted(vec![]));
        assert_eq!(action, Some(Action::Switch(1)));
    }

    #[test]
    fn test_random_behavior_draws_from_the_legal_set() {
        let state = create_test_battle(
            TestPokemonBuilder::new("A", vec![PokemonType::Normal]).build(),
            TestPokemonBuilder::new("B", vec![PokemonType::Normal]).build(),
        );
        let legal = vec![Action::Move(0), Action::TypeShift(PokemonType::Normal)];

        let mut rng = BattleRng::scripted(vec![1, 2]);
        assert_eq!(
            RandomBehavior.decide_action(Side::A, &state, &legal, &mut rng),
            Some(Action::Move(0))
        );
        assert_eq!(
            RandomBehavior.decide_action(Side::A, &state, &legal, &mut rng),
            Some(Action::TypeShift(PokemonType::Normal))
        );
        assert_eq!(RandomBehavior.decide_action(Side::A, &state, &[], &mut rng), None);
    }
}
