use std::env;
use std::io::{self, Write};

use clap::Parser;
use tracing::error;

use sphinx_scout::cli::{build_query, row_to_json, Cli, Commands};
use sphinx_scout::{Dependencies, ScoutError, Settings};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), ScoutError> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(url) = cli.url {
        settings.sphinx_url = url;
    }

    let dependencies = Dependencies::new(&settings).await?;
    let result = run(&dependencies, cli.command).await;
    dependencies.shutdown().await;

    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}

async fn run(dependencies: &Dependencies, command: Commands) -> Result<(), ScoutError> {
    let engine = &dependencies.engine;

    match command {
        Commands::Search {
            query,
            index,
            filters,
            limit,
            offset,
            page,
            per_page,
        } => {
            let search = build_query(&index, &query, &filters, limit, offset);
            let raw = match (page, per_page) {
                (Some(page), Some(per_page)) => engine.paginate(&search, per_page, page).await?,
                _ => engine.search(&search).await?,
            };

            let stdout = io::stdout();
            let mut out = stdout.lock();
            for row in raw.rows() {
                writeln!(out, "{}", row_to_json(row)?)?;
            }
            writeln!(out, "total: {}", engine.total_count(&raw))?;
        }
        Commands::Flush { index } => {
            engine.flush(&index).await?;
            println!("flushed {}", index);
        }
        Commands::Health => {
            let healthy = engine.health_check().await?;
            println!("{}", if healthy { "ok" } else { "unhealthy" });
        }
    }

    Ok(())
}
