use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{
    GameConfig, GameState, GameStats, GameStatus, PieceSeed, Placement, reward,
};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::util::{self, GameConfigArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of episodes to run
    #[arg(long, default_value_t = 10)]
    episodes: usize,
    /// Placement limit per episode
    #[arg(long, default_value_t = 10_000)]
    max_steps: usize,
    /// Base seed as 32 hex characters; drawn at random when omitted
    #[arg(long)]
    seed: Option<PieceSeed>,
    #[clap(flatten)]
    game_config: GameConfigArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the final board of every episode to stderr
    #[arg(long)]
    show_board: bool,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    base_seed: PieceSeed,
    config: GameConfig,
    episodes: Vec<EpisodeSummary>,
}

#[derive(Debug, Serialize)]
struct EpisodeSummary {
    seed: PieceSeed,
    steps: usize,
    status: GameStatus,
    total_reward: i64,
    stats: GameStats,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = arg.game_config.resolve()?;
    let base_seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    info!(%base_seed, episodes = arg.episodes, "starting simulation");

    // Each episode draws a game seed and an agent seed from the base stream.
    let mut seeds = base_seed.rng();
    let mut episodes = Vec::with_capacity(arg.episodes);
    for episode in 0..arg.episodes {
        let seed: PieceSeed = seeds.random();
        let agent_seed: PieceSeed = seeds.random();
        let (summary, state) = run_episode(config, seed, agent_seed, arg.max_steps)?;
        eprintln!(
            "episode {}/{}: steps={} score={} lines={} status={}",
            episode + 1,
            arg.episodes,
            summary.steps,
            summary.stats.score(),
            summary.stats.total_cleared_lines(),
            summary.status,
        );
        if arg.show_board {
            eprint!("{}", state.view());
        }
        episodes.push(summary);
    }

    let report = SimulationReport {
        base_seed,
        config,
        episodes,
    };
    util::save_json(&report, arg.output.as_deref())
}

/// Plays one game with uniformly random placements, ticking once after each.
fn run_episode(
    config: GameConfig,
    seed: PieceSeed,
    agent_seed: PieceSeed,
    max_steps: usize,
) -> anyhow::Result<(EpisodeSummary, GameState)> {
    let mut state = GameState::with_seed(config, seed)
        .with_context(|| format!("Failed to start game with seed {seed}"))?;
    let mut agent = agent_seed.rng();
    let cols = state.col_count();
    let action_count = Placement::action_count(cols);

    let mut steps = 0;
    let mut total_reward = 0;
    while steps < max_steps && state.status().is_running() {
        let before = state.stats().clone();
        let code = agent.random_range(0..action_count);
        let placement = Placement::from_action_code(code, cols)
            .with_context(|| format!("Action code {code} outside the action space"))?;
        state.apply_placement(placement);
        state.tick();
        total_reward += reward(&before, state.stats());
        steps += 1;
    }

    let summary = EpisodeSummary {
        seed,
        steps,
        status: state.status(),
        total_reward,
        stats: state.stats().clone(),
    };
    Ok((summary, state))
}
