use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::OwnerId;

/// Lamport clock for causal ordering of log entries.
///
/// Each writer stamps its entries with a monotonically increasing logical
/// time. Comparing clocks establishes a total order across writers:
/// `time` first, then the writer's `id` to break ties deterministically.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LamportClock {
    /// Logical time, incremented on every local event.
    pub time: u64,
    /// The writer this clock belongs to; breaks ties between writers.
    pub id: OwnerId,
}

impl LamportClock {
    /// Create a clock with an explicit time.
    pub fn new(id: OwnerId, time: u64) -> Self {
        Self { time, id }
    }

    /// The zero clock for a writer.
    pub fn zero(id: OwnerId) -> Self {
        Self { time: 0, id }
    }

    /// Advance by one local event.
    pub fn tick(&self) -> Self {
        Self {
            time: self.time + 1,
            id: self.id,
        }
    }

    /// Merge with a received clock: jump past the greater time, keep the
    /// local writer identity.
    pub fn merge(&self, received: &Self) -> Self {
        Self {
            time: self.time.max(received.time),
            id: self.id,
        }
    }
}

impl PartialOrd for LamportClock {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LamportClock {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Debug for LamportClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LamportClock({}@{})", self.time, self.id.short_id())
    }
}
