use anyhow::Result;
use clap::Parser;
use pennywise::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(std::io::stderr)
        .init();

    cli.run()
}
