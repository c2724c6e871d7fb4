use anyhow::Result;
use clap::Parser;
use gridworld_core::{
    evaluator::{DefaultEvaluator, Evaluator},
    policy::{RandomPolicy, TabularPolicy},
    record::BufferedRecorder,
    util, Action, EpisodeRunner, GridConfig, GridSpec, StateId, TransitionModel,
};
use log::info;
use std::sync::Arc;

const GAMMA: f32 = 0.9;
const THETA: f32 = 1e-6;

/// Roll out random and greedy policies on a grid world
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with the grid configuration; the default 5x5 grid if omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Writes the configuration in use to the given YAML file
    #[arg(long)]
    save_config: Option<String>,

    /// Number of episodes
    #[arg(short, long, default_value_t = 5)]
    episodes: usize,

    /// Maximum number of steps per episode
    #[arg(short, long, default_value_t = 100)]
    max_steps: usize,

    /// Random seed of the random policy
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

/// Greedy policy of the optimal value function, computed by value iteration.
fn value_iteration(model: &TransitionModel) -> Result<TabularPolicy> {
    let n_states = model.n_states();
    let mut v = vec![0f32; n_states];

    let q = |v: &[f32], s: usize| -> Vec<f32> {
        model
            .outcomes(StateId(s))
            .iter()
            .map(|e| {
                let v_next = if e.is_terminal { 0.0 } else { v[e.next.0] };
                e.reward + GAMMA * v_next
            })
            .collect()
    };

    loop {
        let mut delta = 0f32;
        for s in 0..n_states {
            let best = q(&v, s).into_iter().fold(f32::NEG_INFINITY, f32::max);
            delta = delta.max((best - v[s]).abs());
            v[s] = best;
        }
        if delta < THETA {
            break;
        }
    }

    let actions = (0..n_states)
        .map(|s| {
            let qs = q(&v, s);
            let mut best = 0;
            for (a, &value) in qs.iter().enumerate() {
                if value > qs[best] {
                    best = a;
                }
            }
            Action::ALL[best]
        })
        .collect();
    Ok(TabularPolicy::new(actions, n_states)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GridConfig::load(path)?,
        None => GridConfig::default(),
    };
    if let Some(path) = &args.save_config {
        config.save(path)?;
    }

    let model = Arc::new(TransitionModel::new(GridSpec::new(&config)?));

    let mut runner = EpisodeRunner::new(Arc::clone(&model));
    let mut policy = RandomPolicy::new(args.seed);
    let mut recorder = BufferedRecorder::new();
    let returns = util::eval_with_recorder(
        &mut runner,
        &mut policy,
        args.episodes,
        args.max_steps,
        &mut recorder,
    )?;
    info!(
        "Random policy: {} steps recorded, returns = {:?}",
        recorder.len(),
        returns
    );

    let mut greedy = value_iteration(&model)?;
    let mut evaluator =
        DefaultEvaluator::<EpisodeRunner>::new(&config, 0, args.episodes, args.max_steps)?;
    let record = evaluator.evaluate(&mut greedy)?;
    info!(
        "Greedy policy: average return = {}",
        record.get_scalar("Episode return")?
    );

    Ok(())
}
