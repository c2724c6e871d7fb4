//! Utilities for interaction of policies and environments.
use crate::{
    policy::Policy,
    record::{RecordValue, Recorder},
    Env,
};
use anyhow::Result;
use log::info;

/// Run episodes with a policy and recorder.
///
/// Every step writes a record holding the environment's own entries plus
/// `reward`, `episode` and `step`. Each episode ends when the environment
/// reports termination or after `max_steps` steps. Returns the return of
/// each episode.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    max_steps: usize,
    recorder: &mut R,
) -> Result<Vec<f32>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
{
    let mut rs = Vec::with_capacity(n_episodes);

    for episode in 0..n_episodes {
        let mut prev_obs = env.reset()?;
        let mut r_total = 0.0;

        for count_step in 0..max_steps {
            let act = policy.sample(&prev_obs);
            let (step, mut record) = env.step(&act);
            r_total += step.reward;

            record.insert("reward", RecordValue::Scalar(step.reward));
            record.insert("episode", RecordValue::Scalar(episode as _));
            record.insert("step", RecordValue::Scalar(count_step as _));
            recorder.write(record);

            if step.is_done() {
                break;
            }
            prev_obs = step.obs;
        }

        info!("Episode {:?}, return = {:?}", episode, r_total);
        rs.push(r_total);
    }

    Ok(rs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        policy::TabularPolicy,
        record::NullRecorder,
        Action, Cell, EpisodeRunner, GridConfig,
    };

    #[test]
    fn test_eval_stops_at_max_steps() -> Result<()> {
        let config = GridConfig::default().n_rows(2).n_cols(2).goal(Cell::new(1, 1));
        let mut env = EpisodeRunner::build(&config, 0)?;
        let mut policy = TabularPolicy::new(vec![Action::Left; 4], 4)?;
        let returns = eval_with_recorder(&mut env, &mut policy, 3, 6, &mut NullRecorder {})?;
        assert_eq!(returns, vec![-6.0; 3]);
        Ok(())
    }
}
