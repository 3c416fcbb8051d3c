use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studyhall::{
    config::Config,
    migrations::{self, Migrator},
    store::{DocumentStore, MongoStore},
};

#[derive(Parser, Debug)]
#[command(name = "studyhall-migrate")]
#[command(about = "Apply or revert Studyhall database migrations")]
struct Args {
    /// MongoDB connection string, defaults to STUDYHALL_MONGO_URL
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply every pending migration
    Up,
    /// Revert the most recently applied migration
    Down,
    /// List migrations and when they were applied
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "studyhall=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::load()?;

    let url = args
        .url
        .or(config.mongo_url)
        .context("no database: pass --url or set STUDYHALL_MONGO_URL")?;
    let store: Arc<dyn DocumentStore> = Arc::new(MongoStore::connect(&url, &config.database).await?);
    let migrator = Migrator::new(store, migrations::all());

    match args.command {
        Command::Up => {
            let ran = migrator.up().await?;
            info!("Applied {} migration(s)", ran.len());
            for id in ran {
                println!("MIGRATED UP: {id}");
            }
        }
        Command::Down => match migrator.down().await? {
            Some(id) => println!("MIGRATED DOWN: {id}"),
            None => println!("Nothing to revert"),
        },
        Command::Status => {
            for status in migrator.status().await? {
                let applied = status.applied_at.as_deref().unwrap_or("PENDING");
                println!("{:<48} {applied}", status.id);
            }
        }
    }

    Ok(())
}
