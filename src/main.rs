use clap::Parser;

use altgraph::pipeline::{run_build, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run_build(&args)?;
    Ok(())
}
