//! External solver invocation
//!
//! The solver reads one problem on stdin and writes its result on stdout.
//! Anything on stderr makes the invocation a failure.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// Captured output of one solver invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverOutput {
    pub stdout: String,
    pub stderr: String,
}

impl SolverOutput {
    /// Split stdout into an optional instrumentation line and the result line
    ///
    /// With two or more lines the result is the second line, and the first
    /// is kept only if it is an instrumentation line. A single line is the
    /// result. Returns `None` when the solver printed nothing.
    pub fn result_lines(&self) -> Option<(Option<&str>, &str)> {
        let lines: Vec<&str> = self.stdout.lines().collect();
        match lines.as_slice() {
            [] => None,
            [only] => Some((None, *only)),
            [first, second, ..] => {
                let instrument = first
                    .starts_with(crate::record::INSTRUMENT_MARKER)
                    .then_some(*first);
                Some((instrument, *second))
            }
        }
    }
}

/// Something that can solve one problem instance
pub trait Solver {
    fn solve(&mut self, problem: &str) -> Result<SolverOutput>;
}

/// Solver run as a child process, one process per invocation
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    program: PathBuf,
    options: Vec<String>,
}

impl ProcessSolver {
    /// `options` is split on whitespace into separate arguments
    pub fn new(program: impl Into<PathBuf>, options: &str) -> Self {
        Self {
            program: program.into(),
            options: options.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Rendering of the command line for diagnostics
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.options.iter().cloned());
        parts.join(" ")
    }
}

impl Solver for ProcessSolver {
    fn solve(&mut self, problem: &str) -> Result<SolverOutput> {
        let mut child = Command::new(&self.program)
            .args(&self.options)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn solver {}", self.command_line()))?;

        // Feed stdin from its own thread while the pipes drain; the writer
        // drops its handle when done, closing the solver's stdin.
        let stdin = child.stdin.take();
        let (write_result, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(problem.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let write_result = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer thread panicked")));
            (write_result, output)
        });
        let output = output
            .with_context(|| format!("Failed to wait for solver {}", self.command_line()))?;

        // A solver that exits without reading all of stdin is not a harness error.
        if let Err(e) = write_result {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(e).context("Failed to write problem to solver stdin");
            }
        }

        tracing::debug!(
            solver = %self.command_line(),
            status = %output.status,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "solver finished"
        );

        Ok(SolverOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
