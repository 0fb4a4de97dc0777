use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kafka_peek_core::{Batch, Error, PartitionReader, PeekedEvent, Result, SeekPosition};
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Message};
use rdkafka::{Offset, TopicPartitionList};
use tracing::debug;

/// Configuration for the Kafka partition reader.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Kafka brokers (comma-separated list)
    pub brokers: String,
    /// Consumer group name. Offsets are never committed for it; the group is
    /// only used to identify the client to the broker.
    pub group_id: String,
    /// Topic to read from
    pub topic: String,
    /// Session timeout in milliseconds
    pub session_timeout_ms: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            group_id: "kafka-peek".to_string(),
            topic: "".to_string(),
            session_timeout_ms: "6000".to_string(),
        }
    }
}

/// Parse a partition id string into a Kafka partition number.
///
/// Called during startup validation so a malformed id is a configuration
/// error before any connection is made.
pub fn parse_partition_id(partition_id: &str) -> Result<i32> {
    match partition_id.trim().parse::<i32>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(Error::InvalidConfig(format!(
            "partition id must be a non-negative integer, got {partition_id:?}"
        ))),
    }
}

/// Offset for a seek on a sequence number. Kafka offsets are the sequence
/// numbers of this stream, so the translation is direct.
fn sequence_offset(sequence_number: i64, inclusive: bool) -> Offset {
    if inclusive {
        Offset::Offset(sequence_number)
    } else {
        Offset::Offset(sequence_number + 1)
    }
}

/// Reader over one Kafka topic, assigned to a single partition per fetch.
///
/// The underlying consumer is created once and reused across polls; dropping
/// the reader closes the broker connection on every exit path.
pub struct KafkaPartitionReader {
    consumer: StreamConsumer,
    topic: String,
}

impl KafkaPartitionReader {
    /// Build the consumer. Validates the connection settings but does not
    /// contact the broker yet; the first metadata or fetch call does.
    pub fn connect(config: ReaderConfig) -> Result<Self> {
        if config.brokers.trim().is_empty() {
            return Err(Error::InvalidConfig("brokers must not be blank".to_string()));
        }
        if config.topic.trim().is_empty() {
            return Err(Error::InvalidConfig("topic must not be blank".to_string()));
        }
        if config.group_id.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "consumer group must not be blank".to_string(),
            ));
        }

        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", "false")
            .set("session.timeout.ms", &config.session_timeout_ms)
            .set("enable.partition.eof", "false")
            .create()
            .map_err(|e| Error::Transport(format!("Failed to create consumer: {e}")))?;

        Ok(Self {
            consumer,
            topic: config.topic,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Partition ids of the topic, from broker metadata.
    pub fn partition_ids(&self, timeout: Duration) -> Result<Vec<i32>> {
        let metadata = self
            .consumer
            .fetch_metadata(Some(&self.topic), timeout)
            .map_err(|e| Error::Transport(format!("Failed to fetch metadata: {e}")))?;
        let topic = metadata
            .topics()
            .iter()
            .find(|t| t.name() == self.topic)
            .ok_or_else(|| Error::Transport(format!("Topic {} not found", self.topic)))?;
        Ok(topic.partitions().iter().map(|p| p.id()).collect())
    }

    fn starting_offset(
        &self,
        partition: i32,
        from: &SeekPosition,
        timeout: Duration,
    ) -> Result<Offset> {
        Ok(match from {
            SeekPosition::FromSequenceNumber {
                sequence_number,
                inclusive,
            } => sequence_offset(*sequence_number, *inclusive),
            SeekPosition::Latest => Offset::End,
            SeekPosition::FromEnqueuedTime(t) => self.offset_for_time(partition, *t, timeout)?,
        })
    }

    /// Resolve an enqueued-time seek to the first offset at or after the
    /// instant, via the broker's time index.
    fn offset_for_time(
        &self,
        partition: i32,
        enqueued_time: DateTime<Utc>,
        timeout: Duration,
    ) -> Result<Offset> {
        let mut lookup = TopicPartitionList::new();
        lookup
            .add_partition_offset(
                &self.topic,
                partition,
                Offset::Offset(enqueued_time.timestamp_millis()),
            )
            .map_err(|e| Error::Transport(format!("Failed to build offset lookup: {e}")))?;

        let resolved = self
            .consumer
            .offsets_for_times(lookup, timeout)
            .map_err(|e| Error::Transport(format!("Offset lookup by time failed: {e}")))?;

        let elem = resolved
            .elements_for_topic(&self.topic)
            .into_iter()
            .find(|e| e.partition() == partition)
            .ok_or_else(|| {
                Error::Transport(format!("No offset returned for partition {partition}"))
            })?;

        match elem.offset() {
            Offset::Offset(o) => Ok(Offset::Offset(o)),
            // No event enqueued at or after the instant; start at the end.
            _ => Ok(Offset::End),
        }
    }
}

fn to_event(message: &BorrowedMessage<'_>) -> PeekedEvent {
    let enqueued_time = message
        .timestamp()
        .to_millis()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_else(|| {
            debug!(offset = message.offset(), "message has no broker timestamp");
            DateTime::<Utc>::UNIX_EPOCH
        });
    PeekedEvent {
        sequence_number: message.offset(),
        enqueued_time,
        body: message.payload().map(|p| p.to_vec()).unwrap_or_default(),
    }
}

#[async_trait]
impl PartitionReader for KafkaPartitionReader {
    async fn fetch_batch(
        &mut self,
        partition_id: &str,
        max_messages: usize,
        from: &SeekPosition,
        max_wait_time: Duration,
    ) -> Result<Batch> {
        let partition = parse_partition_id(partition_id)?;
        let offset = self.starting_offset(partition, from, max_wait_time)?;

        let mut assignment = TopicPartitionList::new();
        assignment
            .add_partition_offset(&self.topic, partition, offset)
            .map_err(|e| Error::Transport(format!("Failed to assign partition: {e}")))?;
        self.consumer
            .assign(&assignment)
            .map_err(|e| Error::Transport(format!("Failed to assign partition: {e}")))?;

        let deadline = Instant::now() + max_wait_time;
        let mut events = Vec::new();
        while events.len() < max_messages {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match tokio::time::timeout(remaining, self.consumer.recv()).await {
                Ok(Ok(message)) => events.push(to_event(&message)),
                Ok(Err(e)) => {
                    return Err(Error::Transport(format!("Error receiving message: {e}")))
                }
                Err(_) => break, // Timeout, no more messages available right now
            }
        }

        debug!(partition, ?offset, events = events.len(), "fetched batch");
        Ok(Batch::new(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_offset_inclusive_maps_directly() {
        assert_eq!(sequence_offset(5, true), Offset::Offset(5));
    }

    #[test]
    fn sequence_offset_exclusive_resumes_after() {
        assert_eq!(sequence_offset(5, false), Offset::Offset(6));
    }

    #[test]
    fn parse_partition_id_accepts_non_negative_integers() {
        assert_eq!(parse_partition_id("0").unwrap(), 0);
        assert_eq!(parse_partition_id("12").unwrap(), 12);
    }

    #[test]
    fn parse_partition_id_rejects_garbage() {
        assert!(parse_partition_id("-1").is_err());
        assert!(parse_partition_id("abc").is_err());
        assert!(parse_partition_id("").is_err());
    }
}
