use anyhow::{Context, Result};
use clap::Parser;
use solvebench::{
    cli::{init_tracing, Cli},
    config::RunConfig,
    metadata::RunMetadata,
    runner::Runner,
    solver::ProcessSolver,
};
use std::io::{self, BufWriter, Write};

/// Load the config file if given, then apply command-line overrides
fn load_config(args: &Cli) -> Result<RunConfig> {
    let base = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    let config = args.apply_overrides(base);
    config.validate().context("Invalid run configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    tracing::debug!(?config, "run configuration");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let argv: Vec<String> = std::env::args().collect();
    RunMetadata::collect(&argv).write_to(&mut out)?;
    out.flush()?;

    let solver = ProcessSolver::new(&args.solver_program, &args.solver_options);
    let mut runner = Runner::new(solver, &args.instances_dir, config);
    let report = runner.run(&mut out)?;
    out.flush()?;

    tracing::debug!(?report, "run finished");
    Ok(())
}
