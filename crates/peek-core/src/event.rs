use chrono::{DateTime, Utc};

/// One event read from a partition.
///
/// Produced only by the broker side; the loop never constructs events itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeekedEvent {
    /// Broker-assigned position within the partition, monotonically
    /// increasing and unique per partition.
    pub sequence_number: i64,
    /// When the broker accepted the event.
    pub enqueued_time: DateTime<Utc>,
    /// Raw payload bytes.
    pub body: Vec<u8>,
}

impl PeekedEvent {
    /// Body decoded as text for display, lossy on invalid UTF-8.
    pub fn body_as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// The result of one bounded fetch: zero or more events ordered by ascending
/// sequence number (broker contract). Lives for one loop iteration.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub events: Vec<PeekedEvent>,
}

impl Batch {
    pub fn new(events: Vec<PeekedEvent>) -> Self {
        Self { events }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn last_event(&self) -> Option<&PeekedEvent> {
        self.events.last()
    }

    pub fn last_sequence_number(&self) -> Option<i64> {
        self.last_event().map(|e| e.sequence_number)
    }

    pub fn last_enqueued_time(&self) -> Option<DateTime<Utc>> {
        self.last_event().map(|e| e.enqueued_time)
    }
}
