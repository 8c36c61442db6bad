use anyhow::Result;
use clap::Parser;
use solvebench::{
    cli::{init_tracing, ReplayCli},
    replay::replay,
};
use std::io::{self, BufWriter};

fn main() -> Result<()> {
    let args = ReplayCli::parse();

    init_tracing(args.debug);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    replay(stdin.lock(), &mut out)?;

    Ok(())
}
