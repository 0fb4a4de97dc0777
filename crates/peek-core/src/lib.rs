//! Seek resolution and poll-loop state machine for kafka-peek.
//!
//! This crate knows nothing about Kafka. It owns the cursor over a single
//! partition of an append-only event stream and decides, after every fetched
//! batch, whether to keep polling:
//!
//! - `resolve_initial_position` turns the mutually exclusive seek inputs
//!   (explicit sequence number, explicit enqueued time, or neither) into one
//!   [`SeekPosition`].
//! - [`PeekSession`] runs the fetch / advance / deliver / evaluate loop against
//!   three injected capabilities: a [`PartitionReader`] (the broker client), an
//!   [`EventSink`] (where in-range events go), and a [`ConfirmPrompt`]
//!   (interactive continue-or-stop).
//!
//! Logical stops (empty batch, bound reached, user decline) are reported as
//! [`StopReason`] values; broker failures surface as [`Error::Transport`] so
//! the two terminations stay distinguishable at the boundary.

mod error;
mod event;
mod position;
mod session;


// Re-export error types
pub use error::{Error, Result};

// Re-export batch and event types
pub use event::{Batch, PeekedEvent};

// Re-export seek position types
pub use position::{resolve_initial_position, SeekPosition};

// Re-export session types and capability traits
pub use session::{
    ConfirmPrompt, EventSink, PartitionReader, PeekSession, PollConfig, StopConfig, StopReason,
};
