//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{policy::Policy, record::Record, Env};
use anyhow::Result;
use log::info;

/// Runs a fixed number of episodes and reports the average return.
///
/// Episodes on the grid need not terminate, e.g. under a policy walking into a
/// wall forever, so each episode is cut after `max_steps` steps.
///
/// ```rust
/// use gridworld_core::{
///     evaluator::{DefaultEvaluator, Evaluator},
///     policy::RandomPolicy,
///     EpisodeRunner, GridConfig,
/// };
///
/// let config = GridConfig::default();
/// let mut evaluator = DefaultEvaluator::<EpisodeRunner>::new(&config, 0, 10, 100).unwrap();
/// let record = evaluator.evaluate(&mut RandomPolicy::new(42)).unwrap();
/// assert!(record.get_scalar("Episode return").is_ok());
/// ```
pub struct DefaultEvaluator<E: Env> {
    n_episodes: usize,
    max_steps: usize,
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f32;
        let mut n_reached = 0;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut r_episode = 0f32;
            let mut n_steps = 0;

            while n_steps < self.max_steps {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act);
                r_episode += step.reward;
                n_steps += 1;
                if step.is_done() {
                    n_reached += 1;
                    break;
                }
                prev_obs = step.obs;
            }

            info!(
                "Episode {:?}, {:?} steps, return = {:?}",
                ix, n_steps, r_episode
            );
            r_total += r_episode;
        }

        let n = self.n_episodes.max(1) as f32;
        let mut record = Record::from_scalar("Episode return", r_total / n);
        record.merge_inplace(Record::from_scalar(
            "Terminated ratio",
            n_reached as f32 / n,
        ));
        Ok(record)
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation
    /// * `max_steps` - Maximum number of steps per episode
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize, max_steps: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            max_steps,
            env: E::build(config, seed)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::{Action, Cell, GridConfig},
        policy::TabularPolicy,
        EpisodeRunner,
    };

    #[test]
    fn test_evaluate_tabular_policy() -> Result<()> {
        // Right along the top row, then down the last column.
        let config = GridConfig::default().n_rows(3).n_cols(3).goal(Cell::new(2, 2));
        let actions = (0..9)
            .map(|id| if id % 3 == 2 { Action::Down } else { Action::Right })
            .collect();
        let mut policy = TabularPolicy::new(actions, 9)?;
        let mut evaluator = DefaultEvaluator::<EpisodeRunner>::new(&config, 0, 3, 50)?;
        let record = evaluator.evaluate(&mut policy)?;
        assert_eq!(record.get_scalar("Episode return")?, 7.0);
        assert_eq!(record.get_scalar("Terminated ratio")?, 1.0);
        Ok(())
    }

    #[test]
    fn test_evaluate_truncates_endless_episodes() -> Result<()> {
        let config = GridConfig::default();
        let mut policy = TabularPolicy::new(vec![Action::Up; 25], 25)?;
        let mut evaluator = DefaultEvaluator::<EpisodeRunner>::new(&config, 0, 2, 20)?;
        let record = evaluator.evaluate(&mut policy)?;
        assert_eq!(record.get_scalar("Episode return")?, -20.0);
        assert_eq!(record.get_scalar("Terminated ratio")?, 0.0);
        Ok(())
    }
}
