//! The poll-loop state machine.
//!
//! A [`PeekSession`] owns the cursor over one partition and drives the
//! fetch / advance / deliver / evaluate cycle until a stop condition fires or
//! a fetch fails. One fetch is outstanding at a time; fetch, deliver, and
//! evaluate run strictly sequentially with no shared state, so the session
//! needs no locking.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::event::{Batch, PeekedEvent};
use crate::position::SeekPosition;

/// Broker client capability: one bounded fetch from a partition.
#[async_trait]
pub trait PartitionReader {
    /// Fetch up to `max_messages` events from `partition_id`, resuming at
    /// `from`, returning within `max_wait_time`.
    ///
    /// Fewer events than requested, including none, is a normal timeout
    /// outcome and must not be reported as an error. Events must be ordered
    /// by ascending sequence number.
    async fn fetch_batch(
        &mut self,
        partition_id: &str,
        max_messages: usize,
        from: &SeekPosition,
        max_wait_time: Duration,
    ) -> Result<Batch>;
}

/// Where in-range events are delivered, e.g. a console line per event.
pub trait EventSink {
    fn emit(&mut self, event: &PeekedEvent);
}

/// Blocking yes/no confirmation, asked once per iteration when enabled.
pub trait ConfirmPrompt {
    fn ask_yes_no(&mut self, prompt: &str) -> std::io::Result<bool>;
}

/// Fixed per-session fetch parameters.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Partition to read from.
    pub partition_id: String,
    /// Maximum events per poll, 1..=100.
    pub max_messages: usize,
    /// Upper bound on how long one poll may wait, 1..=60 seconds.
    pub max_wait_time: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            partition_id: "0".to_string(),
            max_messages: 2,
            max_wait_time: Duration::from_secs(10),
        }
    }
}

impl PollConfig {
    pub fn validate(&self) -> Result<()> {
        if self.partition_id.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "partition id must not be blank".to_string(),
            ));
        }
        if !(1..=100).contains(&self.max_messages) {
            return Err(Error::InvalidConfig(format!(
                "max messages per poll must be in 1..=100, got {}",
                self.max_messages
            )));
        }
        let secs = self.max_wait_time.as_secs();
        if self.max_wait_time < Duration::from_secs(1) || secs > 60 {
            return Err(Error::InvalidConfig(format!(
                "poll max wait time must be in 1..=60 seconds, got {:?}",
                self.max_wait_time
            )));
        }
        Ok(())
    }
}

/// Independently optional stop bounds, fixed for the whole session.
///
/// The two upper bounds do double duty: each delivered event is filtered
/// against them individually, and the raw batch's last event is compared
/// against them to decide stopping.
#[derive(Debug, Clone, Default)]
pub struct StopConfig {
    /// Stop once the last polled event's sequence number reaches this bound.
    pub max_sequence_number: Option<i64>,
    /// Stop once the last polled event was enqueued at or after this instant.
    pub max_enqueued_time: Option<chrono::DateTime<chrono::Utc>>,
    /// Stop when a poll returns no events.
    pub stop_on_empty_batch: bool,
    /// Ask for confirmation after each batch and stop when declined.
    pub confirm_each_batch: bool,
}

impl StopConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.max_sequence_number {
            if n < 0 {
                return Err(Error::InvalidConfig(format!(
                    "seek end sequence number must be >= 0, got {n}"
                )));
            }
        }
        Ok(())
    }
}

/// Why a session stopped polling. All of these are successful terminations,
/// distinct from transport errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A poll returned no events and the empty-batch stop was enabled.
    NoEventsReceived,
    /// The last polled event reached the configured sequence number bound.
    SequenceNumberBoundReached,
    /// The last polled event reached the configured enqueued-time bound.
    EnqueuedTimeBoundReached,
    /// The user declined the continue prompt.
    DeclinedByUser,
}

impl StopReason {
    /// Stable identifier used verbatim in the stop log line.
    pub fn as_str(&self) -> &str {
        match self {
            StopReason::NoEventsReceived => "no events received",
            StopReason::SequenceNumberBoundReached => "seek end sequence number reached",
            StopReason::EnqueuedTimeBoundReached => "seek end time reached",
            StopReason::DeclinedByUser => "abort by user",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Poll-loop state machine over one partition.
///
/// Holds the only mutable piece of state, the cursor. Each iteration fetches
/// one batch at the cursor, advances the cursor past the batch's last event,
/// delivers the in-range events, then evaluates the stop conditions in fixed
/// priority order: empty batch, sequence number bound, enqueued-time bound,
/// user decline.
pub struct PeekSession {
    cursor: SeekPosition,
    poll: PollConfig,
    stop: StopConfig,
}

impl PeekSession {
    /// Create a session starting at `initial`. Rejects out-of-range poll
    /// parameters and bounds before any fetch can happen.
    pub fn new(initial: SeekPosition, poll: PollConfig, stop: StopConfig) -> Result<Self> {
        poll.validate()?;
        stop.validate()?;
        Ok(Self {
            cursor: initial,
            poll,
            stop,
        })
    }

    /// The position the next fetch would resume from.
    pub fn cursor(&self) -> &SeekPosition {
        &self.cursor
    }

    /// Run the loop until a stop condition fires or a fetch fails.
    ///
    /// Returns the stop reason on a logical stop; a fetch failure surfaces as
    /// [`Error::Transport`] and terminates the loop without retry.
    pub async fn run<R, S, P>(
        &mut self,
        reader: &mut R,
        sink: &mut S,
        prompt: &mut P,
    ) -> Result<StopReason>
    where
        R: PartitionReader + Send,
        S: EventSink + Send,
        P: ConfirmPrompt + Send,
    {
        loop {
            debug!(
                partition_id = %self.poll.partition_id,
                from = %self.cursor,
                max_messages = self.poll.max_messages,
                "polling partition"
            );
            let batch = reader
                .fetch_batch(
                    &self.poll.partition_id,
                    self.poll.max_messages,
                    &self.cursor,
                    self.poll.max_wait_time,
                )
                .await?;
            debug!(events = batch.len(), "received batch");

            self.advance_cursor(&batch);

            for event in &batch.events {
                if self.within_bounds(event) {
                    sink.emit(event);
                }
            }

            if batch.is_empty() && self.stop.stop_on_empty_batch {
                return Ok(StopReason::NoEventsReceived);
            }
            if let Some(reason) = self.bound_reached(&batch) {
                return Ok(reason);
            }
            if self.stop.confirm_each_batch && !prompt.ask_yes_no("Continue?")? {
                return Ok(StopReason::DeclinedByUser);
            }
        }
    }

    /// Replace the cursor so the next fetch resumes strictly after the
    /// highest sequence number seen. An empty batch leaves it unchanged.
    fn advance_cursor(&mut self, batch: &Batch) {
        if let Some(last) = batch.last_event() {
            self.cursor = SeekPosition::after(last.sequence_number);
        }
    }

    /// Display filter: an event strictly beyond a configured bound is never
    /// surfaced, even when the fetch over-fetched past it.
    fn within_bounds(&self, event: &PeekedEvent) -> bool {
        if let Some(max) = self.stop.max_sequence_number {
            if event.sequence_number > max {
                return false;
            }
        }
        if let Some(max) = self.stop.max_enqueued_time {
            if event.enqueued_time > max {
                return false;
            }
        }
        true
    }

    /// Bound checks compare the raw batch's last event, not the filtered
    /// view, so an over-fetched batch still stops the loop. The sequence
    /// number bound outranks the time bound.
    fn bound_reached(&self, batch: &Batch) -> Option<StopReason> {
        let last = batch.last_event()?;
        if let Some(max) = self.stop.max_sequence_number {
            if last.sequence_number >= max {
                return Some(StopReason::SequenceNumberBoundReached);
            }
        }
        if let Some(max) = self.stop.max_enqueued_time {
            if last.enqueued_time >= max {
                return Some(StopReason::EnqueuedTimeBoundReached);
            }
        }
        None
    }
}
