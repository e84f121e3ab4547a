mod cli;
mod commands;
mod logger;

use cli::{Cli, Commands};
use commands::{convert, distance, fetch, flatten, info};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logger::init(cli.verbose);
    match &cli.command {
        Commands::Fetch(args) => fetch::run(&cli, args),
        Commands::Distance(args) => distance::run(&cli, args),
        Commands::Convert(args) => convert::run(&cli, args),
        Commands::Info(args) => info::run(&cli, args),
        Commands::Flatten(args) => flatten::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
