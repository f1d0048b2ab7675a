//! CLI entry point - the composition root.
//!
//! Parses arguments, installs logging, bootstraps the `CliContext` and
//! dispatches to a handler. Errors are mapped to exit codes here.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use favkit_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Paths needs no database
    if matches!(command, Commands::Paths) {
        return handlers::paths::execute(config.db_path.as_deref());
    }

    let ctx = bootstrap(config).await?;

    match command {
        Commands::List { search } => handlers::list::execute(&ctx, search.as_deref()).await,
        Commands::Add { url } => handlers::add::execute(&ctx, &url).await,
        Commands::Remove { url } => handlers::remove::execute(&ctx, &url).await,
        Commands::Toggle { url } => handlers::toggle::execute(&ctx, &url).await,
        Commands::Show { url } => handlers::show::execute(&ctx, &url).await,
        Commands::Status => handlers::status::execute(&ctx).await,
        Commands::Clear { force } => handlers::clear::execute(&ctx, force).await,
        Commands::Paths => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads FAVKIT_* values
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}
