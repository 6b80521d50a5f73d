//! wq-cli - Correlate chlorophyll and dissolved oxygen at monitoring sites.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wq-cli",
    version,
    about = "Puget Sound chlorophyll and oxygen correlation toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: wq_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    wq_cmd::run(cli.command)
}
