//! Grouped aggregation of result records into summary lines
//!
//! Records arrive ordered by group key. A change of key closes the open
//! group and emits its summary. The record that triggers the change is
//! appended to the open group before the key comparison and then moved
//! into the new group, and the closed group is reported with the flags of
//! that triggering record. Captured logs were summarized this way, so
//! replaying them must reproduce it.

use std::fmt;

use crate::record::ResultRecord;
use crate::stats::{summarize, Summary};

/// One emitted summary line
#[derive(Debug, Clone, PartialEq)]
pub enum GroupSummary {
    Stats {
        summary: Summary,
        flags: String,
        /// `None` only if the group was opened by a limit line with no prior record
        group_key: Option<i64>,
    },
    LimitExceeded {
        description: String,
    },
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSummary::Stats {
                summary,
                flags,
                group_key,
            } => {
                write!(
                    f,
                    "STATS: {:.6} {:.6} {} {} ",
                    summary.mean, summary.median, summary.max, flags
                )?;
                match group_key {
                    Some(key) => write!(f, "{}", key),
                    None => write!(f, "None"),
                }
            }
            GroupSummary::LimitExceeded { description } => {
                write!(f, "STATS: LIMIT EXCEEDED {}", description)
            }
        }
    }
}

/// Accumulator for the group currently open
#[derive(Debug, Default)]
struct RunningAggregate {
    elapsed: Vec<i64>,
    flags: String,
    group_key: Option<i64>,
    exceeded: Option<String>,
}

impl RunningAggregate {
    fn seeded(elapsed: i64, flags: String, group_key: i64) -> Self {
        Self {
            elapsed: vec![elapsed],
            flags,
            group_key: Some(group_key),
            exceeded: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.elapsed.is_empty() && self.exceeded.is_none()
    }

    fn finalize(self) -> GroupSummary {
        if let Some(description) = self.exceeded {
            return GroupSummary::LimitExceeded { description };
        }
        GroupSummary::Stats {
            summary: summarize(&self.elapsed),
            flags: self.flags,
            group_key: self.group_key,
        }
    }
}

/// Streaming group-boundary detector
#[derive(Debug, Default)]
pub struct GroupedAggregator {
    current: RunningAggregate,
    groups_emitted: usize,
}

impl GroupedAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of summaries produced so far
    pub fn groups_emitted(&self) -> usize {
        self.groups_emitted
    }

    /// Add one record; returns the summary of the previous group when the key changes
    pub fn push(&mut self, record: &ResultRecord) -> Option<GroupSummary> {
        // A limit reported before any record is closed by the first record.
        if self.current.group_key.is_none() && self.current.exceeded.is_some() {
            let next =
                RunningAggregate::seeded(record.elapsed_ms, record.flags.clone(), record.group_key);
            let closed = std::mem::replace(&mut self.current, next);
            tracing::info!(next_group_key = record.group_key, "keyless limit closed");
            return Some(self.emit(closed));
        }

        self.current.elapsed.push(record.elapsed_ms);
        self.current.flags = record.flags.clone();

        let previous_key = match self.current.group_key {
            None => {
                self.current.group_key = Some(record.group_key);
                return None;
            }
            Some(key) => key,
        };
        if previous_key == record.group_key {
            return None;
        }

        // The triggering sample belongs to the new group.
        let carried = self.current.elapsed.pop()?;
        let next = RunningAggregate::seeded(carried, record.flags.clone(), record.group_key);
        let closed = std::mem::replace(&mut self.current, next);

        tracing::info!(
            group_key = previous_key,
            samples = closed.elapsed.len(),
            next_group_key = record.group_key,
            "group boundary"
        );
        Some(self.emit(closed))
    }

    /// Flag the open group so it reports `LIMIT EXCEEDED` instead of statistics
    pub fn mark_exceeded(&mut self, description: impl Into<String>) {
        let description = description.into();
        tracing::info!(
            group_key = ?self.current.group_key,
            %description,
            "limit exceeded"
        );
        self.current.exceeded = Some(description);
    }

    /// Close the open group, if any, and reset for the next one
    pub fn finish(&mut self) -> Option<GroupSummary> {
        let closed = std::mem::take(&mut self.current);
        if closed.is_empty() {
            return None;
        }
        Some(self.emit(closed))
    }

    fn emit(&mut self, closed: RunningAggregate) -> GroupSummary {
        self.groups_emitted += 1;
        closed.finalize()
    }
}
