use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Where the next fetch resumes reading within a partition.
///
/// Immutable once constructed; the poll loop replaces its cursor wholly on
/// each advance instead of mutating a position in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekPosition {
    /// Resume at a broker-assigned sequence number.
    ///
    /// With `inclusive` set the event carrying `sequence_number` itself is
    /// read again; otherwise reading resumes strictly after it.
    FromSequenceNumber { sequence_number: i64, inclusive: bool },

    /// Resume at the first event enqueued at or after this instant.
    FromEnqueuedTime(DateTime<Utc>),

    /// Resume after whatever is newest at call time; no historical replay.
    Latest,
}

impl SeekPosition {
    /// Position strictly after `sequence_number`, the shape the poll loop
    /// advances its cursor to.
    pub fn after(sequence_number: i64) -> Self {
        SeekPosition::FromSequenceNumber {
            sequence_number,
            inclusive: false,
        }
    }
}

impl std::fmt::Display for SeekPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeekPosition::FromSequenceNumber {
                sequence_number,
                inclusive,
            } => {
                let bound = if *inclusive { "inclusive" } else { "exclusive" };
                write!(f, "sequence-number {sequence_number} ({bound})")
            }
            SeekPosition::FromEnqueuedTime(t) => write!(f, "enqueued-time {}", t.to_rfc3339()),
            SeekPosition::Latest => f.write_str("latest"),
        }
    }
}

/// Resolve the initial seek position from the optional explicit inputs.
///
/// Precedence, first match wins:
/// 1. explicit sequence number (inclusive; must be >= 0)
/// 2. explicit enqueued time
/// 3. neither given: [`SeekPosition::Latest`]
///
/// When both inputs are supplied the sequence number wins silently. That is
/// intentional precedence, not an error. Pure function, never contacts the
/// broker.
pub fn resolve_initial_position(
    sequence_number: Option<i64>,
    enqueued_time: Option<DateTime<Utc>>,
) -> Result<SeekPosition> {
    if let Some(n) = sequence_number {
        if n < 0 {
            return Err(Error::InvalidConfig(format!(
                "seek start sequence number must be >= 0, got {n}"
            )));
        }
        return Ok(SeekPosition::FromSequenceNumber {
            sequence_number: n,
            inclusive: true,
        });
    }
    if let Some(t) = enqueued_time {
        return Ok(SeekPosition::FromEnqueuedTime(t));
    }
    Ok(SeekPosition::Latest)
}
