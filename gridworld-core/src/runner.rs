//! Episode state machine over a shared [`TransitionModel`].
use crate::{
    error::GridError,
    grid::{Action, Cell, GridConfig, GridSpec, StateId},
    record::{Record, RecordValue},
    transition::{TransitionEntry, TransitionModel},
    Env, Step,
};
use anyhow::Result;
use log::trace;
use std::{convert::TryFrom, sync::Arc};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Holds the agent's current cell and advances it with the transition model.
///
/// The runner is single-owner mutable state, one per episode stream. The model
/// is shared through an [`Arc`], so independent runners can roll out in
/// parallel threads against one table without locking.
///
/// Whether the episode is active or over is not stored; it is the terminal flag
/// of the last step. Stepping from a terminal state is allowed and repeats the
/// absorbing self-loop.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Active: reset
///     Active --> Active: step (not terminal)
///     Active --> Terminal: step (goal or trap)
///     Terminal --> Terminal: step (reward 0)
///     Terminal --> Active: reset
/// ```
#[derive(Clone, Debug)]
pub struct EpisodeRunner {
    model: Arc<TransitionModel>,
    current: Cell,
}

impl EpisodeRunner {
    /// Creates a runner placed at the start cell.
    pub fn new(model: Arc<TransitionModel>) -> Self {
        let current = model.spec().start();
        Self { model, current }
    }

    /// The grid, e.g. for drawing goal and traps.
    pub fn spec(&self) -> &GridSpec {
        self.model.spec()
    }

    /// The agent's current cell.
    pub fn current(&self) -> Cell {
        self.current
    }

    /// State id of the agent's current cell.
    pub fn state(&self) -> StateId {
        self.spec().to_state_id(self.current)
    }

    /// Moves the agent back to the start cell and returns its state id.
    pub fn reset(&mut self) -> StateId {
        self.current = self.spec().start();
        self.state()
    }

    /// Applies `action` to the current cell.
    pub fn step(&mut self, action: Action) -> TransitionEntry {
        let state = self.state();
        let entry = self.model.transition(state, action);
        self.current = self.spec().from_state_id(entry.next);
        trace!(
            "{} --{}--> {} (reward = {}, terminal = {})",
            state,
            action,
            entry.next,
            entry.reward,
            entry.is_terminal
        );
        entry
    }

    /// Same as [`EpisodeRunner::step`] with the action given by its index.
    ///
    /// Fails with [`GridError::InvalidAction`] if `ix` is not in `0..4`; the
    /// runner is left unchanged in that case.
    pub fn step_index(&mut self, ix: usize) -> Result<TransitionEntry, GridError> {
        let action = Action::try_from(ix)?;
        Ok(self.step(action))
    }

    fn record(&self, action: Action, entry: &TransitionEntry) -> Record {
        Record::from_slice(&[
            ("state", RecordValue::Scalar(entry.next.0 as _)),
            ("row", RecordValue::Scalar(self.current.row as _)),
            ("col", RecordValue::Scalar(self.current.col as _)),
            ("action", RecordValue::String(action.to_string())),
        ])
    }
}

impl Env for EpisodeRunner {
    type Config = GridConfig;
    type Obs = StateId;
    type Act = Action;
    type Info = ();

    /// Builds a runner with its own transition model. The seed is ignored.
    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        let spec = GridSpec::new(config)?;
        Ok(Self::new(Arc::new(TransitionModel::new(spec))))
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let entry = EpisodeRunner::step(self, *a);
        let record = self.record(*a, &entry);
        let step = Step::new(entry.next, *a, entry.reward, entry.is_terminal, false, (), None);
        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        Ok(EpisodeRunner::reset(self))
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (mut step, record) = Env::step(self, a);
        if step.is_done() {
            step.init_obs = Some(EpisodeRunner::reset(self));
        }
        (step, record)
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<Self::Obs> {
        Ok(EpisodeRunner::reset(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(config: &GridConfig) -> EpisodeRunner {
        <EpisodeRunner as Env>::build(config, 0).unwrap()
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut runner = runner(&GridConfig::default().start(Cell::new(2, 1)));
        let start = runner.spec().to_state_id(Cell::new(2, 1));
        assert_eq!(runner.reset(), start);
        runner.step(Action::Down);
        runner.step(Action::Right);
        assert_ne!(runner.state(), start);
        for _ in 0..3 {
            assert_eq!(runner.reset(), start);
            assert_eq!(runner.current(), Cell::new(2, 1));
        }
    }

    #[test]
    fn test_step_updates_current_cell() {
        let mut runner = runner(&GridConfig::default());
        runner.reset();
        let e = runner.step(Action::Down);
        assert_eq!(e.next, StateId(5));
        assert_eq!(runner.current(), Cell::new(1, 0));
        let e = runner.step(Action::Left);
        assert_eq!(e.next, StateId(5));
        assert_eq!(e.reward, -1.0);
        assert!(!e.is_terminal);
    }

    #[test]
    fn test_step_past_terminal() {
        let config = GridConfig::default()
            .n_rows(1)
            .n_cols(2)
            .goal(Cell::new(0, 1));
        let mut runner = runner(&config);
        runner.reset();
        let e = runner.step(Action::Right);
        assert_eq!((e.next, e.reward, e.is_terminal), (StateId(1), 10.0, true));
        for &a in Action::ALL.iter() {
            let e = runner.step(a);
            assert_eq!((e.next, e.reward, e.is_terminal), (StateId(1), 0.0, true));
        }
    }

    #[test]
    fn test_start_on_trap() {
        let config = GridConfig::default().traps(vec![Cell::new(0, 0)]);
        let mut runner = runner(&config);
        assert_eq!(runner.reset(), StateId(0));
        let e = runner.step(Action::Right);
        assert_eq!((e.next, e.reward, e.is_terminal), (StateId(0), 0.0, true));
    }

    #[test]
    fn test_step_index() {
        let mut runner = runner(&GridConfig::default());
        runner.reset();
        assert_eq!(runner.step_index(1).unwrap().next, StateId(1));
        assert_eq!(runner.step_index(4), Err(GridError::InvalidAction(4)));
        assert_eq!(runner.current(), Cell::new(0, 1));
    }

    #[test]
    fn test_env_step_with_reset() -> Result<()> {
        let config = GridConfig::default()
            .n_rows(1)
            .n_cols(3)
            .goal(Cell::new(0, 2));
        let mut runner = runner(&config);
        Env::reset(&mut runner)?;

        let (step, record) = runner.step_with_reset(&Action::Right);
        assert!(!step.is_done());
        assert!(step.init_obs.is_none());
        assert_eq!(record.get_scalar("state")?, 1.0);
        assert_eq!(record.get_string("action")?, "right");

        let (step, record) = runner.step_with_reset(&Action::Right);
        assert!(step.is_terminated);
        assert!(!step.is_truncated);
        assert_eq!(step.obs, StateId(2));
        assert_eq!(step.reward, 10.0);
        assert_eq!(step.init_obs, Some(StateId(0)));
        assert_eq!(record.get_scalar("col")?, 2.0);
        assert_eq!(runner.current(), Cell::new(0, 0));
        Ok(())
    }
}
