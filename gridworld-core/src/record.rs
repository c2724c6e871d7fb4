//! Records of episode rollouts.
//!
//! Every step of an [`EpisodeRunner`](crate::EpisodeRunner) emits a [`Record`]
//! alongside the [`Step`](crate::Step). Control loops pass records to a
//! [`Recorder`], which decides what to keep.
//!
//! ```rust
//! use gridworld_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(1.0));
//! record.insert("reward", RecordValue::Scalar(-1.0));
//! assert_eq!(record.get_scalar("reward").unwrap(), -1.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
