//! Environment abstraction the grid runner plugs into.
mod env;
mod step;
pub use env::Env;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
pub trait Obs: Clone + Debug {}

/// An action of an environment.
pub trait Act: Clone + Debug {}
