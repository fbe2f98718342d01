//! Interactive StayFit database console.
//!
//! Run with:
//! ```
//! cargo run -p seed-console --bin stayfit-console -- --db-password secret
//! ```

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use seed_console::config::{DbConfig, SeedConfig};
use seed_console::console::Console;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stayfit-console", version, about = "Seed and inspect the StayFit database")]
struct Cli {
    #[command(flatten)]
    db: DbConfig,

    /// Seed for the random generator; makes generated data reproducible.
    #[arg(long)]
    seed: Option<u64>,

    /// Apply the bundled schema migrations before starting.
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    tracing::info!("Using database {}", cli.db.display_target());
    let pool = cli.db.pool();

    if cli.migrate {
        stayfit::MIGRATOR.run(&pool).await?;
        tracing::info!("Schema migrations applied");
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut console = Console::new(
        pool.clone(),
        SeedConfig::default(),
        rng,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    );
    let result = console.run().await;

    pool.close().await;
    Ok(result?)
}
