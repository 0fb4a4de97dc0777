//! Wiring for the `peek` subcommand: builds the Kafka reader and the console
//! collaborators, then hands control to the poll session.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use kafka_peek_core::{
    resolve_initial_position, ConfirmPrompt, EventSink, PeekSession, PeekedEvent, PollConfig,
    StopConfig,
};
use kafka_peek_reader::{parse_partition_id, KafkaPartitionReader, ReaderConfig};
use tracing::info;

use crate::PeekOpts;

/// Sink that prints one `event at: <sequence>/<enqueued> => <body>` line per
/// event, with a blank line in between.
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &PeekedEvent) {
        println!(
            "event at: {}/{} => {}",
            event.sequence_number,
            event.enqueued_time.to_rfc3339(),
            event.body_as_text()
        );
        println!();
    }
}

/// Blocking yes/no prompt on stdin. Re-asks on unrecognized input; EOF counts
/// as a decline so a closed stdin cannot keep the loop running.
pub struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn ask_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("{prompt} [y/n]: ");
            io::stdout().flush()?;
            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(false);
            }
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => {}
            }
        }
    }
}

/// Run one peek session end to end.
///
/// All configuration is validated here, before the consumer connects; the
/// consumer is then held for the whole session and dropped on every exit
/// path, normal stop or fetch failure alike.
pub async fn run_peek(opts: PeekOpts) -> anyhow::Result<()> {
    let partition = parse_partition_id(&opts.partition_id)?;
    let initial = resolve_initial_position(opts.seek_start_sequence_number, opts.seek_start_time)?;

    let mut session = PeekSession::new(
        initial,
        PollConfig {
            partition_id: opts.partition_id.clone(),
            max_messages: opts.poll_max_messages as usize,
            max_wait_time: Duration::from_secs(opts.poll_max_wait_time_in_seconds),
        },
        StopConfig {
            max_sequence_number: opts.poll_stop_on_seek_end_sequence_number,
            max_enqueued_time: opts.poll_stop_on_seek_end_time,
            stop_on_empty_batch: opts.poll_stop_on_no_events_received,
            confirm_each_batch: opts.poll_stop_on_user_confirmation_prompt,
        },
    )?;

    let mut reader = KafkaPartitionReader::connect(ReaderConfig {
        brokers: opts.brokers.clone(),
        group_id: opts.consumer_group.clone(),
        topic: opts.topic.clone(),
        ..Default::default()
    })?;

    let partition_ids = reader
        .partition_ids(Duration::from_secs(opts.poll_max_wait_time_in_seconds))
        .with_context(|| format!("Failed to fetch metadata for topic {}", opts.topic))?;
    println!(
        "topic: {} has the following partition ids: {partition_ids:?}",
        opts.topic
    );
    println!();
    if !partition_ids.contains(&partition) {
        anyhow::bail!(
            "partition {partition} does not exist in topic {} (available: {partition_ids:?})",
            opts.topic
        );
    }

    info!(
        topic = %opts.topic,
        partition_id = %opts.partition_id,
        consumer_group = %opts.consumer_group,
        from = %session.cursor(),
        "starting peek session"
    );
    println!(
        "=> polling {}@{}:{} from position: {} ...",
        opts.consumer_group,
        opts.topic,
        opts.partition_id,
        session.cursor()
    );
    println!();

    let reason = session
        .run(&mut reader, &mut ConsoleSink, &mut StdinPrompt)
        .await?;

    println!();
    println!("stop polling. reason: {reason}");
    Ok(())
}
