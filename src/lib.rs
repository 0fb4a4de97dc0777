//! Command-line interface types for kafka-peek
//!
//! # Usage Examples
//!
//! ```bash
//! # Peek at the newest events on partition 0, two at a time
//! kafka-peek peek --topic orders
//!
//! # Replay partition 3 from sequence number 1200 until 1300 is reached
//! kafka-peek peek --topic orders --partition-id 3 \
//!   --seek-start-sequence-number 1200 \
//!   --poll-stop-on-seek-end-sequence-number 1300 \
//!   --poll-stop-on-user-confirmation-prompt false
//!
//! # Everything enqueued during a time window, without prompting
//! kafka-peek peek --topic orders \
//!   --seek-start-time 2026-08-22T00:00:00Z \
//!   --poll-stop-on-seek-end-time 2026-08-23T00:00:00Z \
//!   --poll-stop-on-user-confirmation-prompt false
//! ```
//!
//! Seek precedence: `--seek-start-sequence-number` wins over
//! `--seek-start-time`; with neither, polling starts after the newest event.

use chrono::{DateTime, Utc};
use clap::Parser;

pub mod peek;

pub use peek::run_peek;

#[derive(Parser, Clone, Debug)]
pub struct PeekOpts {
    /// Kafka brokers (comma-separated list)
    #[arg(long, env = "KAFKA_PEEK_BROKERS", default_value = "localhost:9092")]
    pub brokers: String,

    /// Topic to peek into
    #[arg(long, env = "KAFKA_PEEK_TOPIC")]
    pub topic: String,

    /// Consumer group name; kafka-peek never commits offsets for it
    #[arg(long, default_value = "kafka-peek", value_parser = non_blank)]
    pub consumer_group: String,

    /// Partition to read from
    #[arg(long, default_value = "0", value_parser = non_blank)]
    pub partition_id: String,

    /// Start reading at this sequence number (aka kafka-api: 'start-offset');
    /// wins over --seek-start-time
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    pub seek_start_sequence_number: Option<i64>,

    /// Start reading at the first event enqueued at or after this RFC 3339
    /// instant, e.g. 2026-08-22T00:00:00Z
    #[arg(long, value_parser = parse_instant)]
    pub seek_start_time: Option<DateTime<Utc>>,

    /// Upper bound on how long one poll may wait for events
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=60))]
    pub poll_max_wait_time_in_seconds: u64,

    /// Maximum number of events fetched per poll
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub poll_max_messages: u32,

    /// Stop polling when a poll returns no events
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub poll_stop_on_no_events_received: bool,

    /// Stop polling once the last polled event's sequence number reaches this
    /// bound (aka kafka-api: 'end-offset')
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    pub poll_stop_on_seek_end_sequence_number: Option<i64>,

    /// Stop polling once the last polled event was enqueued at or after this
    /// RFC 3339 instant
    #[arg(long, value_parser = parse_instant)]
    pub poll_stop_on_seek_end_time: Option<DateTime<Utc>>,

    /// Ask for confirmation after each batch and stop when declined
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub poll_stop_on_user_confirmation_prompt: bool,
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("must be an RFC 3339 instant, e.g. 2026-08-22T00:00:00Z: {e}"))
}

fn non_blank(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("must not be blank".to_string())
    } else {
        Ok(s.to_string())
    }
}
