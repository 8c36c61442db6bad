// Shared helpers for driving solvebench against a fake solver
//
// The fake solver is a POSIX shell script run through `sh`, so the test
// binary never executes a file it has just written.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Reads `<elapsed> <name> [instrument]` from stdin and answers like a solver.
///
/// `limit` as the elapsed field reports a limit breach, `error` writes to stderr.
/// The first script argument is echoed back as the flags token.
const FAKE_SOLVER: &str = r#"#!/bin/sh
read elapsed name extra
case "$elapsed" in
  limit) echo "LIMIT EXCEEDED time bound of 10 seconds" ;;
  error) echo "solver crashed" >&2 ;;
  *)
    if [ "$extra" = "instrument" ]; then
      echo "INSTRUMENT 3 4"
    fi
    echo "1 0 0 1 $elapsed $1 $name"
    ;;
esac
"#;

/// A corpus directory plus a fake solver script
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("instances")).unwrap();
        fs::write(dir.path().join("solver.sh"), FAKE_SOLVER).unwrap();
        Self { dir }
    }

    /// Add an instance whose solver answer is `answer` (elapsed, `limit` or `error`)
    pub fn instance(self, name: &str, answer: &str) -> Self {
        fs::write(
            self.instances_dir().join(name),
            format!("{} {}\n", answer, name),
        )
        .unwrap();
        self
    }

    /// Add an instance whose solver output starts with an instrumentation line
    pub fn instrumented_instance(self, name: &str, elapsed: u32) -> Self {
        fs::write(
            self.instances_dir().join(name),
            format!("{} {} instrument\n", elapsed, name),
        )
        .unwrap();
        self
    }

    pub fn instances_dir(&self) -> PathBuf {
        self.dir.path().join("instances")
    }

    pub fn solver_script(&self) -> PathBuf {
        self.dir.path().join("solver.sh")
    }

    /// Solver options string: the script path followed by the flags token
    pub fn solver_options(&self, flags: &str) -> String {
        format!("{} {}", self.solver_script().display(), flags)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Lines starting with `STATS`
pub fn stats_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|l| l.starts_with("STATS"))
        .map(str::to_string)
        .collect()
}

/// Everything except `#` metadata lines
pub fn body_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}
