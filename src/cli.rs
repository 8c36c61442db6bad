//! CLI argument parsing for solvebench

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::RunConfig;

#[derive(Parser, Debug)]
#[command(name = "solvebench")]
#[command(version)]
#[command(
    about = "Run a solver over generated problem instances and summarize elapsed times per problem type",
    long_about = None
)]
pub struct Cli {
    /// Solver program to run; the problem is written to its stdin
    #[arg(value_name = "SOLVER_PROGRAM")]
    pub solver_program: PathBuf,

    /// Options passed to the solver, as one whitespace-separated string
    ///
    /// May start with `-` (only `-h` and `-V` are taken by the harness)
    #[arg(value_name = "SOLVER_OPTIONS", allow_hyphen_values = true)]
    pub solver_options: String,

    /// Directory containing gen.<type>.<dim1>.<dim2>.<index> instance files
    #[arg(value_name = "INSTANCES_DIR")]
    pub instances_dir: PathBuf,

    /// Number of times to run each instance (overrides the config file)
    #[arg(long = "repetitions", value_name = "N")]
    pub repetitions: Option<u32>,

    /// Comma-separated problem types to run (overrides the config file)
    #[arg(long = "types", value_name = "LIST", value_delimiter = ',')]
    pub types: Option<Vec<i64>>,

    /// TOML file with repetitions and group_keys
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Merge command-line overrides into a base configuration
    pub fn apply_overrides(&self, mut config: RunConfig) -> RunConfig {
        if let Some(repetitions) = self.repetitions {
            config.repetitions = repetitions;
        }
        if let Some(types) = &self.types {
            config.group_keys = types.clone();
        }
        config
    }
}

/// Arguments for re-aggregating a captured output stream from stdin
#[derive(Parser, Debug)]
#[command(name = "solvebench-replay")]
#[command(version)]
#[command(
    about = "Regenerate STATS lines from a captured solvebench output stream on stdin",
    long_about = None
)]
pub struct ReplayCli {
    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

/// Initialize tracing subscriber for debug output to stderr
///
/// Both binaries call this once, before any other work. `RUST_LOG` still
/// applies on top of the trace-level default.
pub fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_positionals() {
        let cli = Cli::parse_from(["solvebench", "./knapsack", "-t -r", "instances"]);
        assert_eq!(cli.solver_program, PathBuf::from("./knapsack"));
        assert_eq!(cli.solver_options, "-t -r");
        assert_eq!(cli.instances_dir, PathBuf::from("instances"));
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_hyphenated_options_are_a_value() {
        let cli = Cli::parse_from(["solvebench", "./knapsack", "-t", "instances"]);
        assert_eq!(cli.solver_options, "-t");
        assert_eq!(cli.types, None);
    }

    #[test]
    fn test_cli_empty_options_allowed() {
        let cli = Cli::parse_from(["solvebench", "./knapsack", "", "instances"]);
        assert_eq!(cli.solver_options, "");
    }

    #[test]
    fn test_cli_requires_three_positionals() {
        assert!(Cli::try_parse_from(["solvebench", "./knapsack", "-t"]).is_err());
        assert!(Cli::try_parse_from(["solvebench"]).is_err());
    }

    #[test]
    fn test_cli_rejects_extra_positionals() {
        assert!(Cli::try_parse_from(["solvebench", "a", "b", "c", "d"]).is_err());
    }

    #[test]
    fn test_cli_repetitions_and_types() {
        let cli = Cli::parse_from([
            "solvebench",
            "--repetitions",
            "10",
            "--types",
            "2,3",
            "./knapsack",
            "",
            "instances",
        ]);
        assert_eq!(cli.repetitions, Some(10));
        assert_eq!(cli.types, Some(vec![2, 3]));
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from(["solvebench", "--types", "4", "./knapsack", "", "dir"]);
        let config = cli.apply_overrides(RunConfig {
            repetitions: 7,
            group_keys: vec![1, 2],
        });
        assert_eq!(config.repetitions, 7);
        assert_eq!(config.group_keys, vec![4]);
    }

    #[test]
    fn test_apply_overrides_keeps_defaults() {
        let cli = Cli::parse_from(["solvebench", "./knapsack", "", "dir"]);
        assert_eq!(cli.apply_overrides(RunConfig::default()), RunConfig::default());
    }

    #[test]
    fn test_replay_cli_takes_no_positionals() {
        assert!(ReplayCli::try_parse_from(["solvebench-replay"]).is_ok());
        assert!(ReplayCli::try_parse_from(["solvebench-replay", "file"]).is_err());
    }

    #[test]
    fn test_replay_cli_debug_flag() {
        let cli = ReplayCli::parse_from(["solvebench-replay", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_init_tracing_disabled_installs_nothing() {
        // A second global install would panic.
        init_tracing(false);
        init_tracing(false);
    }
}
