//! Regenerate summary lines from a captured output stream
//!
//! Old `STATS` lines are dropped and recomputed. Group boundaries are found
//! from key changes between consecutive records, so the record that starts
//! a new type closes the previous one. A limit line marks the open group,
//! which then reports `LIMIT EXCEEDED` when the next type starts.
//!
//! A limit line carries no problem name. When it is the first result of a
//! type that follows a numeric one, it lands on the earlier type's still-open
//! group, so that type reports the limit and the limited type reports nothing.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::aggregate::GroupedAggregator;
use crate::record::Line;

/// Counters for a completed replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub lines_read: usize,
    pub records: usize,
    /// Stale summary lines dropped from the input
    pub discarded_summaries: usize,
    pub summaries: usize,
    pub limits_exceeded: usize,
}

/// Replay `input` through the aggregator, writing the regenerated stream to `out`
pub fn replay<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();
    let mut aggregator = GroupedAggregator::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read captured output")?;
        report.lines_read += 1;
        if line.trim().is_empty() {
            continue;
        }

        let classified =
            Line::classify(&line).with_context(|| format!("line {}: {:?}", index + 1, line))?;
        match classified {
            Line::Comment(text) | Line::Instrument(text) => writeln!(out, "{}", text)?,
            Line::Summary => report.discarded_summaries += 1,
            Line::LimitExceeded(limit) => {
                writeln!(out, "{}", line)?;
                aggregator.mark_exceeded(limit.description);
                report.limits_exceeded += 1;
            }
            Line::Result(record) => {
                writeln!(out, "{}", line)?;
                report.records += 1;
                if let Some(summary) = aggregator.push(&record) {
                    writeln!(out, "{}", summary)?;
                }
            }
        }
    }

    if let Some(summary) = aggregator.finish() {
        writeln!(out, "{}", summary)?;
    }
    report.summaries = aggregator.groups_emitted();
    out.flush()?;

    tracing::info!(
        lines = report.lines_read,
        records = report.records,
        summaries = report.summaries,
        discarded = report.discarded_summaries,
        limits = report.limits_exceeded,
        "replay finished"
    );
    Ok(report)
}
