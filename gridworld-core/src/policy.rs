//! Policies on the grid.
use crate::{
    error::GridError,
    grid::{Action, StateId},
    Env, EpisodeRunner,
};
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action.
/// The mapping can be either of deterministic or stochastic.
pub trait Policy<E: Env> {
    /// Sample an action given an observation.
    fn sample(&mut self, obs: &E::Obs) -> E::Act;
}

/// A configurable object, having type parameter.
pub trait Configurable<E: Env> {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    fn build(config: Self::Config) -> Self;

    /// Build the object with the configuration in the yaml file of the given path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let file = std::fs::File::open(path)?;
        let rdr = std::io::BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(Self::build(config))
    }
}

/// Configuration of [`RandomPolicy`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct RandomPolicyConfig {
    /// Random seed.
    pub seed: u64,
}

/// Picks one of the four actions uniformly at random.
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    /// Constructs a policy with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Policy<EpisodeRunner> for RandomPolicy {
    fn sample(&mut self, _obs: &StateId) -> Action {
        Action::ALL[self.rng.usize(..Action::N)]
    }
}

impl Configurable<EpisodeRunner> for RandomPolicy {
    type Config = RandomPolicyConfig;

    fn build(config: Self::Config) -> Self {
        Self::new(config.seed)
    }
}

/// Takes a fixed action in every state, e.g. the greedy policy of a value function.
#[derive(Clone, Debug, PartialEq)]
pub struct TabularPolicy {
    actions: Vec<Action>,
}

impl TabularPolicy {
    /// Constructs a policy from one action per state id.
    ///
    /// `n_states` is the number of states of the grid the policy acts on.
    pub fn new(actions: Vec<Action>, n_states: usize) -> Result<Self, GridError> {
        if actions.len() != n_states {
            return Err(GridError::Configuration(format!(
                "policy table has {} entries, the grid has {} states",
                actions.len(),
                n_states
            )));
        }
        Ok(Self { actions })
    }

    /// Action taken in `state`.
    pub fn action(&self, state: StateId) -> Action {
        self.actions[state.0]
    }
}

impl Policy<EpisodeRunner> for TabularPolicy {
    fn sample(&mut self, obs: &StateId) -> Action {
        self.action(*obs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempdir::TempDir;

    #[test]
    fn test_random_policy_is_reproducible() {
        let mut p1 = RandomPolicy::new(42);
        let mut p2 = RandomPolicy::new(42);
        let a1: Vec<Action> = (0..32).map(|_| p1.sample(&StateId(0))).collect();
        let a2: Vec<Action> = (0..32).map(|_| p2.sample(&StateId(0))).collect();
        assert_eq!(a1, a2);
    }

    #[test]
    fn test_random_policy_from_yaml() -> Result<()> {
        let dir = TempDir::new("random_policy")?;
        let path = dir.path().join("random_policy.yaml");
        std::fs::File::create(&path)?.write_all(b"seed: 7\n")?;

        let mut p1 = RandomPolicy::build_from_path(&path)?;
        let mut p2 = RandomPolicy::new(7);
        for _ in 0..16 {
            assert_eq!(p1.sample(&StateId(3)), p2.sample(&StateId(3)));
        }
        Ok(())
    }

    #[test]
    fn test_tabular_policy() {
        let actions = vec![Action::Right, Action::Down, Action::Left, Action::Up];
        let mut policy = TabularPolicy::new(actions, 4).unwrap();
        assert_eq!(policy.sample(&StateId(1)), Action::Down);
        assert_eq!(policy.sample(&StateId(3)), Action::Up);
        assert!(TabularPolicy::new(vec![Action::Up], 4).is_err());
    }
}
