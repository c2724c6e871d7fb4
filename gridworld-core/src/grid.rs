//! Grid geometry: cells, state ids, actions and the static grid specification.
//!
//! [`GridSpec`] is built once from a [`GridConfig`] and never changes afterwards.
//! Its only behavior is the bijection between [`Cell`] and [`StateId`]
//! together with a few geometric queries used when the transition table is built.
//!
//! ```rust
//! use gridworld_core::{Cell, GridConfig, GridSpec};
//!
//! let spec = GridSpec::new(&GridConfig::default()).unwrap();
//! let id = spec.to_state_id(Cell::new(4, 4));
//! assert_eq!(id.0, 24);
//! assert_eq!(spec.from_state_id(id), Cell::new(4, 4));
//! ```
mod config;
use crate::{error::GridError, Act, Obs};
pub use config::GridConfig;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, convert::TryFrom, fmt};

/// A cell of the grid, 0-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Row, in `[0, n_rows)`.
    pub row: usize,

    /// Column, in `[0, n_cols)`.
    pub col: usize,
}

impl Cell {
    /// Constructs a cell.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Identifier of a cell, `row * n_cols + col`.
///
/// This is the observation emitted by [`EpisodeRunner`](crate::EpisodeRunner).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub usize);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Obs for StateId {}

/// One of the four cardinal moves.
///
/// The discriminants are the indices used by the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// `(-1, 0)`
    Up = 0,

    /// `(0, 1)`
    Right = 1,

    /// `(1, 0)`
    Down = 2,

    /// `(0, -1)`
    Left = 3,
}

impl Action {
    /// All actions, ordered by index.
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Number of actions.
    pub const N: usize = 4;

    /// Index of the action in `0..4`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `(Δrow, Δcolumn)` offset of the action.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = GridError;

    fn try_from(ix: usize) -> Result<Self, Self::Error> {
        Action::ALL
            .get(ix)
            .copied()
            .ok_or(GridError::InvalidAction(ix))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
            Action::Left => "left",
        };
        f.write_str(s)
    }
}

impl Act for Action {}

/// Static configuration of the grid.
///
/// Constructed with [`GridSpec::new`], which rejects ill-formed configurations.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    n_rows: usize,
    n_cols: usize,
    start: Cell,
    goal: Cell,
    traps: BTreeSet<Cell>,
    step_reward: f32,
    goal_reward: f32,
    trap_reward: f32,
}

impl GridSpec {
    /// Validates the configuration and freezes it.
    ///
    /// Fails with [`GridError::Configuration`] if a dimension is zero, if the
    /// transition table (`n_rows * n_cols * 4` entries) cannot be indexed with a
    /// `usize`, if start, goal or a trap lies outside the grid, or if the goal
    /// is also listed as a trap.
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        let GridConfig {
            n_rows,
            n_cols,
            start,
            goal,
            ref traps,
            step_reward,
            goal_reward,
            trap_reward,
        } = *config;

        if n_rows == 0 || n_cols == 0 {
            return Err(GridError::Configuration(format!(
                "grid dimensions must be positive, got {}x{}",
                n_rows, n_cols
            )));
        }
        if n_rows
            .checked_mul(n_cols)
            .and_then(|n| n.checked_mul(Action::N))
            .is_none()
        {
            return Err(GridError::Configuration(format!(
                "grid {}x{} is too large for the transition table",
                n_rows, n_cols
            )));
        }

        let spec = Self {
            n_rows,
            n_cols,
            start,
            goal,
            traps: traps.iter().copied().collect(),
            step_reward,
            goal_reward,
            trap_reward,
        };

        spec.check_in_bounds("start", start)?;
        spec.check_in_bounds("goal", goal)?;
        for trap in spec.traps.iter() {
            spec.check_in_bounds("trap", *trap)?;
        }
        if spec.traps.contains(&goal) {
            return Err(GridError::Configuration(format!(
                "goal {} is also listed as a trap",
                goal
            )));
        }

        Ok(spec)
    }

    fn check_in_bounds(&self, what: &str, cell: Cell) -> Result<(), GridError> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(GridError::Configuration(format!(
                "{} {} is outside of the {}x{} grid",
                what, cell, self.n_rows, self.n_cols
            )))
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of states, `n_rows * n_cols`.
    pub fn n_states(&self) -> usize {
        self.n_rows * self.n_cols
    }

    /// Number of actions, always 4.
    pub fn n_actions(&self) -> usize {
        Action::N
    }

    /// Start cell.
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Goal cell.
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Trap cells.
    pub fn traps(&self) -> &BTreeSet<Cell> {
        &self.traps
    }

    /// Reward of an ordinary step.
    pub fn step_reward(&self) -> f32 {
        self.step_reward
    }

    /// Reward of entering the goal.
    pub fn goal_reward(&self) -> f32 {
        self.goal_reward
    }

    /// Reward of entering a trap.
    pub fn trap_reward(&self) -> f32 {
        self.trap_reward
    }

    /// `row * n_cols + col`.
    #[inline]
    pub fn to_state_id(&self, cell: Cell) -> StateId {
        StateId(cell.row * self.n_cols + cell.col)
    }

    /// `(id / n_cols, id % n_cols)`.
    ///
    /// The id is not checked; see [`GridSpec::try_from_state_id`].
    #[inline]
    pub fn from_state_id(&self, id: StateId) -> Cell {
        Cell::new(id.0 / self.n_cols, id.0 % self.n_cols)
    }

    /// Same as [`GridSpec::from_state_id`], failing on ids outside of the grid.
    pub fn try_from_state_id(&self, id: StateId) -> Result<Cell, GridError> {
        self.check_state_id(id)?;
        Ok(self.from_state_id(id))
    }

    pub(crate) fn check_state_id(&self, id: StateId) -> Result<(), GridError> {
        if id.0 < self.n_states() {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                id: id.0,
                n_states: self.n_states(),
            })
        }
    }

    /// Returns `true` if the cell lies inside the grid.
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.n_rows && cell.col < self.n_cols
    }

    /// Returns `true` if the cell is the goal.
    pub fn is_goal(&self, cell: Cell) -> bool {
        cell == self.goal
    }

    /// Returns `true` if the cell is a trap.
    pub fn is_trap(&self, cell: Cell) -> bool {
        self.traps.contains(&cell)
    }

    /// Returns `true` if the cell is the goal or a trap.
    pub fn is_terminal(&self, cell: Cell) -> bool {
        self.is_goal(cell) || self.is_trap(cell)
    }

    /// Applies the offset of `action` to `cell`.
    ///
    /// A move leaving the grid keeps the agent where it is.
    pub fn step_cell(&self, cell: Cell, action: Action) -> Cell {
        let (dr, dc) = action.offset();
        match (cell.row.checked_add_signed(dr), cell.col.checked_add_signed(dc)) {
            (Some(row), Some(col)) if self.in_bounds(Cell::new(row, col)) => Cell::new(row, col),
            _ => cell,
        }
    }

    /// Iterates over all cells in state id order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.n_states()).map(move |id| self.from_state_id(StateId(id)))
    }
}
