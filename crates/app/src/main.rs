use clap::Parser;

mod args;
mod commands;
mod input;
mod logging;
mod render;
mod source;

use args::{Cli, Command};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    // Open + migrate storage in the binary glue so core/services stay pure.
    let storage = source::open(&cli.source).await?;

    match cli.subcommand() {
        Command::Take(args) => commands::take(&storage, &args).await,
        Command::List => commands::list(&storage).await,
        Command::Validate(arg) => commands::validate(&storage, &arg).await,
        Command::Import(args) => commands::import(&storage, &args).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
