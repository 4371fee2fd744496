//! Record of the commands sent to a bridge and the notifications it answered with.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::command::LightCommand;
use crate::transport::TransportEvent;

/// One exchange with the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum HistoryRecord {
    /// A command handed to the transport for a fixture.
    Sent {
        identifier: String,
        command: LightCommand,
    },
    /// A notification delivered by the transport.
    Received { event: TransportEvent },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Time since the history was started or last cleared.
    pub elapsed: Duration,
    pub record: HistoryRecord,
}

/// Bounded log of the traffic with one bridge.
///
/// The oldest entries are dropped once `capacity` is reached; the counters in
/// [`HistorySummary`] keep counting everything recorded since the last clear.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    started: Instant,
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    sent: usize,
    received: usize,
    rejected: usize,
    last_error: Option<String>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CommandHistory {
            started: Instant::now(),
            entries: VecDeque::with_capacity(capacity),
            capacity,
            sent: 0,
            received: 0,
            rejected: 0,
            last_error: None,
        }
    }

    fn push(&mut self, record: HistoryRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            elapsed: self.started.elapsed(),
            record,
        });
    }

    pub fn record_sent(&mut self, identifier: &str, command: &LightCommand) {
        self.sent += 1;
        self.push(HistoryRecord::Sent {
            identifier: identifier.to_string(),
            command: command.clone(),
        });
    }

    pub fn record_received(&mut self, event: &TransportEvent) {
        self.received += 1;
        if matches!(event, TransportEvent::CommandRejected { .. }) {
            self.rejected += 1;
        }
        self.push(HistoryRecord::Received {
            event: event.clone(),
        });
    }

    pub fn record_error(&mut self, error: &str) {
        self.last_error = Some(error.to_string());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Commands sent to the fixture with the given native identifier, oldest first.
    pub fn commands_for<'a>(&'a self, identifier: &'a str) -> impl Iterator<Item = &'a LightCommand> {
        self.entries.iter().filter_map(move |entry| match &entry.record {
            HistoryRecord::Sent {
                identifier: target,
                command,
            } if target == identifier => Some(command),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::with_capacity(self.capacity);
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            sent: self.sent,
            received: self.received,
            rejected: self.rejected,
            retained: self.entries.len(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Counters of a [`CommandHistory`] for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub sent: usize,
    pub received: usize,
    /// Received notifications that reported a refused command.
    pub rejected: usize,
    pub retained: usize,
    pub last_error: Option<String>,
}
