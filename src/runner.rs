//! Drive the solver over the instance corpus
//!
//! For each problem type, every instance is solved `repetitions` times. Each
//! result line is echoed to the output and fed to the aggregator, and one
//! summary line is written once the type's instances are exhausted. A limit
//! line ends the type early.

use anyhow::{anyhow, bail, Context, Result};
use std::io::Write;
use std::path::PathBuf;

use crate::aggregate::GroupedAggregator;
use crate::config::RunConfig;
use crate::corpus::{self, Instance};
use crate::record::Line;
use crate::solver::Solver;

/// Counters for a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Solver invocations attempted
    pub invocations: usize,
    /// Invocations abandoned because the solver wrote to stderr
    pub solver_errors: usize,
    /// Result records aggregated
    pub records: usize,
    /// Summary lines written
    pub summaries: usize,
    /// Problem types cut short by a limit line
    pub limits_exceeded: usize,
}

/// What one solver invocation means for the rest of the group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Recorded,
    SolverError,
    LimitExceeded,
}

/// Runs a solver over a corpus directory
#[derive(Debug)]
pub struct Runner<S: Solver> {
    solver: S,
    instances_dir: PathBuf,
    config: RunConfig,
}

impl<S: Solver> Runner<S> {
    pub fn new(solver: S, instances_dir: impl Into<PathBuf>, config: RunConfig) -> Self {
        Self {
            solver,
            instances_dir: instances_dir.into(),
            config,
        }
    }

    /// Run every configured problem type, writing the combined stream to `out`
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunReport> {
        self.config.validate()?;

        let mut report = RunReport::default();
        let mut aggregator = GroupedAggregator::new();

        for group_key in self.config.group_keys.clone() {
            let exceeded = self.run_group(group_key, &mut aggregator, out, &mut report)?;
            if exceeded {
                report.limits_exceeded += 1;
            }

            match aggregator.finish() {
                Some(summary) => {
                    tracing::info!(group_key, %summary, "group finished");
                    writeln!(out, "{}", summary)?;
                    report.summaries += 1;
                }
                None => {
                    tracing::warn!(
                        group_key,
                        dir = %self.instances_dir.display(),
                        "no results for problem type"
                    );
                }
            }
            out.flush()?;
        }

        Ok(report)
    }

    /// Returns true if the group was cut short by a limit line
    fn run_group<W: Write>(
        &mut self,
        group_key: i64,
        aggregator: &mut GroupedAggregator,
        out: &mut W,
        report: &mut RunReport,
    ) -> Result<bool> {
        for instance in corpus::instances(&self.instances_dir, group_key)? {
            let instance = instance?;
            for repetition in 0..self.config.repetitions {
                tracing::debug!(
                    instance = %instance.path.display(),
                    repetition,
                    "solving"
                );
                report.invocations += 1;
                match self.solve_once(&instance, aggregator, out)? {
                    Outcome::Recorded => report.records += 1,
                    Outcome::SolverError => {
                        report.solver_errors += 1;
                        break;
                    }
                    Outcome::LimitExceeded => return Ok(true),
                }
            }
        }
        Ok(false)
    }

    fn solve_once<W: Write>(
        &mut self,
        instance: &Instance,
        aggregator: &mut GroupedAggregator,
        out: &mut W,
    ) -> Result<Outcome> {
        let output = self.solver.solve(&instance.text)?;

        if !output.stderr.is_empty() {
            eprintln!("ERROR : {}", output.stderr.trim_end());
            tracing::warn!(
                instance = %instance.path.display(),
                stderr = %output.stderr.trim_end(),
                "solver reported an error, skipping remaining repetitions"
            );
            return Ok(Outcome::SolverError);
        }

        let (instrument, result_line) = output
            .result_lines()
            .ok_or_else(|| anyhow!("Solver produced no output for {}", instance.path.display()))?;

        writeln!(out, "{}", result_line)?;

        let line = Line::classify(result_line)
            .with_context(|| format!("Bad solver result for {}", instance.path.display()))?;

        match line {
            Line::Result(record) => {
                if let Some(summary) = aggregator.push(&record) {
                    writeln!(out, "{}", summary)?;
                }
                if let Some(instrument) = instrument {
                    writeln!(
                        out,
                        "{} {} {}",
                        instrument, record.flags, record.problem_name
                    )?;
                }
                Ok(Outcome::Recorded)
            }
            Line::LimitExceeded(limit) => {
                aggregator.mark_exceeded(limit.description);
                Ok(Outcome::LimitExceeded)
            }
            Line::Comment(_) | Line::Instrument(_) | Line::Summary => bail!(
                "malformed record: expected a result line for {}, got {:?}",
                instance.path.display(),
                result_line
            ),
        }
    }
}
