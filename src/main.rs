use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use subtitle::app::AppContext;
use subtitle::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries titles only
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = cli.load_config()?;
    cli.apply_overrides(&mut config);

    let ctx = AppContext::new(&config)?;

    match cli.command {
        Commands::Get { urls } => {
            commands::get_titles(&ctx, &urls).await?;
        }
        Commands::Watch => {
            commands::watch(&ctx).await?;
        }
    }

    Ok(())
}
