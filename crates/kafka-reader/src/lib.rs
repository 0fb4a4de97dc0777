//! Kafka partition reader for kafka-peek.
//!
//! Implements the `PartitionReader` capability from `kafka-peek-core` on top
//! of rdkafka: one long-lived consumer per session, manually assigned to a
//! single partition at a seek position translated into a Kafka offset, with a
//! bounded, timed fetch per poll. Offsets are never committed; peeking leaves
//! no trace in the consumer group.

mod reader;

pub use reader::{parse_partition_id, KafkaPartitionReader, ReaderConfig};
