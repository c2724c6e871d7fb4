//! Configuration of [`GridSpec`](super::GridSpec).
use super::Cell;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`GridSpec`](super::GridSpec).
///
/// The configuration is not validated until it is turned into a
/// [`GridSpec`](super::GridSpec).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct GridConfig {
    /// Number of rows.
    pub n_rows: usize,

    /// Number of columns.
    pub n_cols: usize,

    /// Cell where every episode starts.
    pub start: Cell,

    /// Goal cell.
    pub goal: Cell,

    /// Trap cells.
    #[serde(default)]
    pub traps: Vec<Cell>,

    /// Reward of a step which does not enter the goal or a trap.
    pub step_reward: f32,

    /// Reward of entering the goal.
    pub goal_reward: f32,

    /// Reward of entering a trap.
    pub trap_reward: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            n_rows: 5,
            n_cols: 5,
            start: Cell::new(0, 0),
            goal: Cell::new(4, 4),
            traps: vec![],
            step_reward: -1.0,
            goal_reward: 10.0,
            trap_reward: -10.0,
        }
    }
}

impl GridConfig {
    /// Sets the number of rows.
    pub fn n_rows(mut self, v: usize) -> Self {
        self.n_rows = v;
        self
    }

    /// Sets the number of columns.
    pub fn n_cols(mut self, v: usize) -> Self {
        self.n_cols = v;
        self
    }

    /// Sets the start cell.
    pub fn start(mut self, v: Cell) -> Self {
        self.start = v;
        self
    }

    /// Sets the goal cell.
    pub fn goal(mut self, v: Cell) -> Self {
        self.goal = v;
        self
    }

    /// Sets the trap cells.
    pub fn traps(mut self, v: Vec<Cell>) -> Self {
        self.traps = v;
        self
    }

    /// Sets the reward of an ordinary step.
    pub fn step_reward(mut self, v: f32) -> Self {
        self.step_reward = v;
        self
    }

    /// Sets the reward of entering the goal.
    pub fn goal_reward(mut self, v: f32) -> Self {
        self.goal_reward = v;
        self
    }

    /// Sets the reward of entering a trap.
    pub fn trap_reward(mut self, v: f32) -> Self {
        self.trap_reward = v;
        self
    }

    /// Constructs [`GridConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GridConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
