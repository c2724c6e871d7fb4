//! Tabulated transition and reward function of the grid.
//!
//! The table is filled eagerly for every `(state, action)` pair when the model is
//! built, so lookups during episodes are plain array reads. Entries are stored
//! in a flat vector indexed by `state * 4 + action`.
use crate::{
    error::GridError,
    grid::{Action, GridSpec, StateId},
};
use log::debug;

/// Outcome of applying an action in a state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionEntry {
    /// Next state.
    pub next: StateId,

    /// Reward of the transition.
    pub reward: f32,

    /// `true` if the next state is terminal.
    pub is_terminal: bool,
}

impl TransitionEntry {
    /// Probability of the outcome. Transitions are deterministic.
    pub const PROB: f32 = 1.0;

    fn absorbing(state: StateId) -> Self {
        Self {
            next: state,
            reward: 0.0,
            is_terminal: true,
        }
    }
}

/// Deterministic transition model of a [`GridSpec`].
///
/// The model is immutable after [`TransitionModel::new`] and can be shared
/// across threads, e.g. behind an [`Arc`](std::sync::Arc), by any number of
/// [`EpisodeRunner`](crate::EpisodeRunner)s.
#[derive(Clone, Debug)]
pub struct TransitionModel {
    spec: GridSpec,
    table: Vec<TransitionEntry>,
}

impl TransitionModel {
    /// Builds the transition table of the grid.
    ///
    /// Terminal cells (goal and traps) are absorbing: every action leads back to
    /// the same cell with zero reward. From other cells the action offset is
    /// applied, a move leaving the grid keeps the agent in place, and the
    /// reward is determined by the cell reached.
    pub fn new(spec: GridSpec) -> Self {
        let mut table = Vec::with_capacity(spec.n_states() * Action::N);
        let mut n_terminals = 0;

        for cell in spec.cells() {
            let state = spec.to_state_id(cell);

            if spec.is_terminal(cell) {
                n_terminals += 1;
                table.extend(Action::ALL.iter().map(|_| TransitionEntry::absorbing(state)));
                continue;
            }

            for &action in Action::ALL.iter() {
                let next_cell = spec.step_cell(cell, action);
                // Goal is checked first.
                let (reward, is_terminal) = if spec.is_goal(next_cell) {
                    (spec.goal_reward(), true)
                } else if spec.is_trap(next_cell) {
                    (spec.trap_reward(), true)
                } else {
                    (spec.step_reward(), false)
                };
                table.push(TransitionEntry {
                    next: spec.to_state_id(next_cell),
                    reward,
                    is_terminal,
                });
            }
        }

        debug!(
            "Built transition model: {}x{} grid, {} states, {} terminal",
            spec.n_rows(),
            spec.n_cols(),
            spec.n_states(),
            n_terminals
        );

        Self { spec, table }
    }

    /// The grid the model was built from.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Number of states.
    pub fn n_states(&self) -> usize {
        self.spec.n_states()
    }

    /// Number of actions.
    pub fn n_actions(&self) -> usize {
        Action::N
    }

    /// Looks up the outcome of `action` in `state`.
    ///
    /// `state` must come from the model's [`GridSpec`]; see
    /// [`TransitionModel::try_transition`] for a checked variant.
    #[inline]
    pub fn transition(&self, state: StateId, action: Action) -> TransitionEntry {
        self.table[state.0 * Action::N + action.index()]
    }

    /// Same as [`TransitionModel::transition`], failing on ids outside of the grid.
    pub fn try_transition(
        &self,
        state: StateId,
        action: Action,
    ) -> Result<TransitionEntry, GridError> {
        self.spec.check_state_id(state)?;
        Ok(self.transition(state, action))
    }

    /// Outcomes of all actions in `state`, ordered by [`Action::index`].
    pub fn outcomes(&self, state: StateId) -> &[TransitionEntry] {
        let ix = state.0 * Action::N;
        &self.table[ix..ix + Action::N]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, GridConfig};

    fn model(config: GridConfig) -> TransitionModel {
        TransitionModel::new(GridSpec::new(&config).unwrap())
    }

    #[test]
    fn test_table_size() {
        let model = model(GridConfig::default().n_rows(3).n_cols(4).goal(Cell::new(2, 3)));
        assert_eq!(model.n_states(), 12);
        assert_eq!(model.table.len(), 48);
        for id in 0..model.n_states() {
            assert_eq!(model.outcomes(StateId(id)).len(), 4);
        }
    }

    #[test]
    fn test_terminal_states_are_absorbing() {
        let config = GridConfig::default().traps(vec![Cell::new(2, 2), Cell::new(0, 4)]);
        let model = model(config);
        let spec = model.spec().clone();
        for cell in vec![Cell::new(4, 4), Cell::new(2, 2), Cell::new(0, 4)] {
            let s = spec.to_state_id(cell);
            for &a in Action::ALL.iter() {
                assert_eq!(
                    model.transition(s, a),
                    TransitionEntry {
                        next: s,
                        reward: 0.0,
                        is_terminal: true
                    }
                );
            }
        }
    }

    #[test]
    fn test_boundary_clip() {
        let model = model(GridConfig::default());
        let s = StateId(0);
        for &a in [Action::Up, Action::Left].iter() {
            let e = model.transition(s, a);
            assert_eq!(e.next, s);
            assert_eq!(e.reward, -1.0);
            assert!(!e.is_terminal);
        }
        let e = model.transition(s, Action::Right);
        assert_eq!(e.next, StateId(1));
        let e = model.transition(s, Action::Down);
        assert_eq!(e.next, StateId(5));
    }

    #[test]
    fn test_goal_reward_from_neighbors() {
        let config = GridConfig::default().goal(Cell::new(2, 2)).goal_reward(7.5);
        let model = model(config);
        let spec = model.spec().clone();
        let goal = spec.to_state_id(Cell::new(2, 2));
        let neighbors = [
            (Cell::new(1, 2), Action::Down),
            (Cell::new(3, 2), Action::Up),
            (Cell::new(2, 1), Action::Right),
            (Cell::new(2, 3), Action::Left),
        ];
        for &(cell, a) in neighbors.iter() {
            let e = model.transition(spec.to_state_id(cell), a);
            assert_eq!(e.next, goal);
            assert_eq!(e.reward, 7.5);
            assert!(e.is_terminal);
        }
    }

    #[test]
    fn test_trap_reward() {
        let config = GridConfig::default()
            .n_rows(3)
            .n_cols(3)
            .goal(Cell::new(2, 2))
            .traps(vec![Cell::new(0, 1)])
            .trap_reward(-10.0);
        let model = model(config);
        let e = model.transition(StateId(0), Action::Right);
        assert_eq!(e.next, StateId(1));
        assert_eq!(e.reward, -10.0);
        assert!(e.is_terminal);

        // From below the trap
        let e = model.transition(StateId(4), Action::Up);
        assert_eq!(e.next, StateId(1));
        assert_eq!(e.reward, -10.0);
        assert!(e.is_terminal);
    }

    #[test]
    fn test_try_transition_out_of_range() {
        let model = model(GridConfig::default());
        assert_eq!(
            model.try_transition(StateId(25), Action::Up),
            Err(GridError::OutOfRange { id: 25, n_states: 25 })
        );
        assert!(model.try_transition(StateId(24), Action::Up).is_ok());
    }

    #[test]
    fn test_single_cell_grid() {
        let model = model(
            GridConfig::default()
                .n_rows(1)
                .n_cols(1)
                .goal(Cell::new(0, 0)),
        );
        for &a in Action::ALL.iter() {
            assert_eq!(model.transition(StateId(0), a), TransitionEntry::absorbing(StateId(0)));
        }
    }
}
