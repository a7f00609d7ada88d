use crate::battle::actions::Action;
use crate::battle::ai::Behavior;
use crate::battle::engine::{BattleEngine, TurnReport};
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleOutcome, BattleState, Side};
use crate::config::BattleConfig;
use crate::errors::{BattleResult, BattleStateError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

/// Final record of a battle played by [`BattleRunner`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub battle_id: String,
    /// `None` for a draw or when the turn cap was reached.
    pub winner: Option<Side>,
    pub outcome: BattleOutcome,
    pub turns: u32,
    /// Total HP left across each roster, side A then side B.
    pub remaining_hp: [u32; 2],
    pub reached_turn_cap: bool,
}

/// Plays a whole battle between two behaviors.
///
/// The runner owns the turn cap; the engine itself never stops a battle.
pub struct BattleRunner<'a> {
    engine: BattleEngine,
    config: BattleConfig,
    behaviors: [&'a dyn Behavior; 2],
    keep_reports: bool,
    reports: Vec<TurnReport>,
}

impl<'a> BattleRunner<'a> {
    pub fn new(config: BattleConfig, side_a: &'a dyn Behavior, side_b: &'a dyn Behavior) -> Self {
        Self {
            engine: BattleEngine::from_config(&config),
            config,
            behaviors: [side_a, side_b],
            keep_reports: false,
            reports: Vec::new(),
        }
    }

    /// Use a preconfigured engine, for example one with effect hooks.
    pub fn with_engine(mut self, engine: BattleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Keep every turn's report for inspection after the run.
    pub fn keep_reports(mut self, keep: bool) -> Self {
        self.keep_reports = keep;
        self
    }

    pub fn reports(&self) -> &[TurnReport] {
        &self.reports
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    /// Seeded from the config, or from the OS when it has no seed.
    pub fn rng(&self) -> BattleRng {
        match self.config.seed {
            Some(seed) => BattleRng::seeded(seed),
            None => BattleRng::from_entropy(),
        }
    }

    /// Play with a fresh random source built from the config.
    pub fn run(&mut self, state: &mut BattleState) -> BattleResult<BattleSummary> {
        let mut rng = self.rng();
        self.run_with_rng(state, &mut rng)
    }

    pub fn run_with_rng(
        &mut self,
        state: &mut BattleState,
        rng: &mut BattleRng,
    ) -> BattleResult<BattleSummary> {
        let span = info_span!("battle", battle_id = %state.battle_id, seed = ?rng.seed());
        let _guard = span.enter();
        info!(max_turns = self.config.max_turns, "battle started");

        self.reports.clear();
        let mut turns = 0;
        while turns < self.config.max_turns && !state.is_terminal() {
            let action_a = self.choose(Side::A, state, rng)?;
            let action_b = self.choose(Side::B, state, rng)?;
            let report = self.engine.resolve_turn(state, action_a, action_b, rng)?;
            turns += 1;
            if self.keep_reports {
                self.reports.push(report);
            }
        }

        let outcome = state.outcome();
        let summary = BattleSummary {
            battle_id: state.battle_id.clone(),
            winner: outcome.winner(),
            outcome,
            turns,
            remaining_hp: [
                state.side(Side::A).remaining_hp(),
                state.side(Side::B).remaining_hp(),
            ],
            reached_turn_cap: !outcome.is_terminal(),
        };
        info!(outcome = ?summary.outcome, turns, "battle finished");
        Ok(summary)
    }

    fn choose(&self, side: Side, state: &BattleState, rng: &mut BattleRng) -> BattleResult<Action> {
        let legal = self.engine.legal_actions(state, side);
        let action = self.behaviors[side.index()]
            .decide_action(side, state, &legal, rng)
            .ok_or_else(|| {
                BattleStateError::InconsistentState(format!("{} has no legal action", side))
            })?;
        debug!(%side, %action, "action chosen");
        Ok(action)
    }
}
