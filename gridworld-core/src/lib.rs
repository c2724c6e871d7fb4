#![warn(missing_docs)]
//! A deterministic, fully observable grid-world MDP for tabular reinforcement learning.
//!
//! An agent occupies a cell of a 2-D grid and moves with one of four cardinal
//! actions. Entering the goal or a trap ends the episode with the corresponding
//! reward; every other step costs the step reward. Moves leaving the grid keep
//! the agent in place, and terminal cells are absorbing.
//!
//! * [`GridSpec`] - validated, immutable grid configuration
//! * [`TransitionModel`] - eagerly tabulated transition and reward function
//! * [`EpisodeRunner`] - per-episode agent state driven by `reset` and `step`
//!
//! ```rust
//! use gridworld_core::{Action, EpisodeRunner, GridConfig, GridSpec, TransitionModel};
//! use std::sync::Arc;
//!
//! let spec = GridSpec::new(&GridConfig::default()).unwrap();
//! let model = Arc::new(TransitionModel::new(spec));
//! let mut runner = EpisodeRunner::new(model);
//!
//! runner.reset();
//! let outcome = runner.step(Action::Right);
//! assert_eq!(outcome.next.0, 1);
//! assert_eq!(outcome.reward, -1.0);
//! assert!(!outcome.is_terminal);
//! ```
pub mod error;
pub mod evaluator;
pub mod policy;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Env, Info, Obs, Step};

mod grid;
pub use grid::{Action, Cell, GridConfig, GridSpec, StateId};

mod transition;
pub use transition::{TransitionEntry, TransitionModel};

mod runner;
pub use runner::EpisodeRunner;
