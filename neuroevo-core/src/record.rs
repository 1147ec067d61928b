//! Types and traits for recording the progress of evolution.
//!
//! Once per generation, [`Evolution`](crate::Evolution) writes a [`Record`]
//! to a [`Recorder`]. The record is a key-value map of [`RecordValue`]s:
//!
//! ```rust
//! use neuroevo_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_slice(&[("generation", RecordValue::Scalar(3.0))]);
//! record.insert("mean_score", RecordValue::Scalar(21.5));
//! record.insert("parent_indices", RecordValue::Array1(vec![4.0, 0.0, 7.0]));
//! assert_eq!(record.get_scalar("mean_score").unwrap(), 21.5);
//! ```
//!
//! * [`NullRecorder`] discards every record.
//! * [`BufferedRecorder`] keeps them in memory, in the order they were written.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
