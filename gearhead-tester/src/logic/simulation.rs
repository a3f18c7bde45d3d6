use anyhow::{Context, Result};
use gearhead_game::{GameConfig, GameSession, SessionSummary};
use serde::Serialize;

use crate::logic::policy::{GameplayStrategy, PlayerPolicy};

const DEFAULT_MAX_TURNS: u32 = 100;
const ITERATION_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration for a single autoplay run.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub max_turns: u32,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(strategy: GameplayStrategy, seed: u64) -> Self {
        Self {
            seed,
            strategy,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Seed for the `iteration`-th repeat of this run; iteration 0 keeps the
    /// base seed.
    #[must_use]
    pub fn iteration_seed(&self, iteration: u64) -> u64 {
        self.seed.wrapping_add(iteration.wrapping_mul(ITERATION_STRIDE))
    }
}

/// Outcome of one autoplay run.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub base_seed: u64,
    pub iteration: u64,
    pub strategy: GameplayStrategy,
    pub parts_earned: u32,
    pub survived: bool,
    pub summary: SessionSummary,
}

/// Play one session to destruction or the turn limit.
///
/// # Errors
///
/// Returns an error if the session cannot be created or a move the policy
/// chose is rejected by the engine.
pub fn run_simulation(
    game_config: &GameConfig,
    config: SimulationConfig,
    iteration: u64,
) -> Result<RunRecord> {
    let seed = config.iteration_seed(iteration);
    let mut session =
        GameSession::new(game_config.clone(), seed).context("failed to start session")?;
    let mut policy = config.strategy.create_policy(seed);

    while !session.is_over() && session.turns() < config.max_turns {
        let decision = policy.pick_event(&session);
        let report = session
            .play_turn(decision.event_index)
            .with_context(|| format!("{} chose event {}", policy.name(), decision.event_index))?;
        log::trace!(
            "seed {seed} turn {}: {} -> {:?} ({})",
            report.turn,
            report.race.event,
            report.race.outcome,
            decision.rationale.as_deref().unwrap_or("-")
        );
        if report.destroyed {
            break;
        }
        install_parts(&mut session, policy.as_mut());
    }

    let race_draws = session.rng_bundle().race().draws();
    log::trace!("seed {seed}: {race_draws} race draws");

    let summary = session.summary();
    Ok(RunRecord {
        base_seed: config.seed,
        iteration,
        strategy: config.strategy,
        parts_earned: summary.wins,
        survived: !summary.destroyed,
        summary,
    })
}

fn install_parts(session: &mut GameSession, policy: &mut dyn PlayerPolicy) {
    while let Some(index) = policy.pick_install(session) {
        if let Err(err) = session.install_from_inventory(index) {
            log::debug!("{} could not install part {index}: {err}", policy.name());
            break;
        }
    }
}

/// Run every seed × iteration for one strategy.
///
/// # Errors
///
/// Propagates the first failing run.
pub fn run_strategy(
    game_config: &GameConfig,
    strategy: GameplayStrategy,
    seeds: &[u64],
    iterations: u64,
    max_turns: u32,
) -> Result<Vec<RunRecord>> {
    let mut records = Vec::new();
    for &seed in seeds {
        let config = SimulationConfig::new(strategy, seed).with_max_turns(max_turns);
        for iteration in 0..iterations {
            records.push(run_simulation(game_config, config, iteration)?);
        }
    }
    Ok(records)
}
