use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::RngExt;
use std::sync::Arc;

use vantage::analytics::{self, RangeToken};
use vantage::config::{Config, DatabaseBackend};
use vantage::models::PageEvent;
use vantage::storage::{EventStore, PostgresEventStore, SqliteEventStore};

#[derive(Parser)]
#[command(name = "vantage-admin")]
#[command(about = "Vantage analytics ops CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert synthetic page events for demos and load checks
    Seed {
        /// Number of events to insert
        #[arg(long, default_value_t = 10_000)]
        count: u64,
        /// Spread events over this many days before now
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Count events in a lookback range
    Count {
        /// Range token: 24h, 7d, 30d, 6m, 1y
        #[arg(long, default_value = "7d")]
        range: String,
    },
    /// Run the summary pipeline and print the payload
    Summary {
        /// Range token: 24h, 7d, 30d, 6m, 1y
        #[arg(long, default_value = "7d")]
        range: String,
    },
}

const SEED_PATHS: &[&str] = &[
    "/",
    "/products",
    "/pricing",
    "/blog",
    "/about",
    "/contact",
    "/careers",
];

const SEED_REFERRERS: &[Option<&str>] = &[
    None,
    Some("https://www.google.com/search"),
    Some("https://www.bing.com/search"),
    Some("https://news.ycombinator.com/item"),
    Some("https://t.co/x4k2"),
    Some("not-a-url"),
];

const SEED_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101",
    "Dalvik/2.1.0 (Android 13; Pixel 7)",
    "AppStore/3.0 iOS/17.0 model/iPhone14,2",
    "curl/8.4.0",
];

const SEED_COUNTRIES: &[Option<&str>] = &[
    Some("US"),
    Some("MX"),
    Some("DE"),
    Some("BR"),
    Some("IN"),
    Some("GB"),
    None,
];

fn synthesize_events(count: u64, days: u32) -> Vec<PageEvent> {
    let mut rng = rand::rng();
    let now = Utc::now().timestamp();
    let span = i64::from(days).max(1) * 86_400;

    (0..count)
        .map(|_| {
            let occurred_at = now - rng.random_range(0..span);
            let mut event = PageEvent::new(occurred_at)
                .with_path(SEED_PATHS[rng.random_range(0..SEED_PATHS.len())])
                .with_user_agent(SEED_USER_AGENTS[rng.random_range(0..SEED_USER_AGENTS.len())]);
            if let Some(referrer) = SEED_REFERRERS[rng.random_range(0..SEED_REFERRERS.len())] {
                event = event.with_referrer(referrer);
            }
            if let Some(country) = SEED_COUNTRIES[rng.random_range(0..SEED_COUNTRIES.len())] {
                event = event.with_country(country);
            }
            event
        })
        .collect()
}

async fn open_store(config: &Config) -> Result<Arc<dyn EventStore>> {
    let store: Arc<dyn EventStore> = match config.database.backend {
        DatabaseBackend::Sqlite => Arc::new(
            SqliteEventStore::new(&config.database.url, config.database.max_connections).await?,
        ),
        DatabaseBackend::Postgres => Arc::new(
            PostgresEventStore::new(&config.database.url, config.database.max_connections)
                .await?,
        ),
    };

    // Ensure the event table exists
    store.init().await?;
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Seed { count, days } => {
            let events = synthesize_events(count, days);

            match config.database.backend {
                DatabaseBackend::Sqlite => {
                    let store = SqliteEventStore::new(
                        &config.database.url,
                        config.database.max_connections,
                    )
                    .await?;
                    store.init().await?;
                    store.insert_events(&events).await?;
                }
                DatabaseBackend::Postgres => {
                    let store = PostgresEventStore::new(
                        &config.database.url,
                        config.database.max_connections,
                    )
                    .await?;
                    store.init().await?;
                    store.insert_events(&events).await?;
                }
            }

            println!("✓ Inserted {} synthetic events spanning {} days", count, days);
        }
        Commands::Count { range } => {
            let store = open_store(&config).await?;
            let token = RangeToken::parse(Some(range.as_str()));
            let cutoff = token.cutoff(Utc::now());
            let count = store.count_matching(cutoff).await?;
            println!("{} events in the last {}", count, token.as_str());
        }
        Commands::Summary { range } => {
            let store = open_store(&config).await?;
            let token = RangeToken::parse(Some(range.as_str()));
            let report = analytics::build_summary(
                store.as_ref(),
                token,
                Utc::now(),
                config.analytics.fetch_page_size,
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
