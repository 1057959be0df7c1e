//! CLI entry point.

use clap::{CommandFactory, Parser};

use vocalis_cli::{Cli, Commands, handlers, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads VOCALIS_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve(args) => handlers::serve::execute(args).await?,
        Commands::Paths(args) => handlers::paths::execute(&args)?,
    }

    Ok(())
}
