use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use sports_odds_api::auth::{hash_password, SystemClock, TokenSigner};
use sports_odds_api::utils::data::{write_events_csv, write_events_json, write_events_table};
use sports_odds_api::utils::event_filter::EventFilter;
use sports_odds_api::{logging, AppConfig, OddsRepository};

#[derive(Parser)]
#[command(name = "cli", about = "Inspect the sports odds snapshot and manage API credentials")]
struct Cli {
    /// Snapshot path; defaults to ODDS_FILE_PATH
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List events, earliest first
    Events {
        /// Sport key or part of a sport title
        #[arg(long)]
        sport: Option<String>,
        /// Only events starting today (local time)
        #[arg(long)]
        today: bool,
        /// Only these event ids
        #[arg(long, value_delimiter = ',')]
        favorites: Vec<String>,
        #[arg(long, value_enum, default_value_t = ViewMode::Table)]
        format: ViewMode,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the distinct sports in the snapshot
    Sports,
    /// Print an Argon2 hash for ADMIN_PASSWORD_HASH
    HashPassword { password: String },
    /// Check a token against JWT_SECRET and print its claims
    VerifyToken { token: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewMode {
    Table,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Invalid configuration")?;
    logging::init_tracing(&config.log_level)?;

    let snapshot = cli.snapshot.unwrap_or_else(|| config.odds_file_path.clone());
    let repository = OddsRepository::new(snapshot);

    match cli.command {
        Command::Events {
            sport,
            today,
            favorites,
            format,
            output,
        } => {
            let events = match sport.as_deref() {
                Some(key) => repository.list_by_sport(key).await?,
                None => repository.load_snapshot().await?,
            };

            let filter = EventFilter {
                on_date: today.then(|| Local::now().date_naive()),
                favorites,
            };
            let events = filter.apply(events);

            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).context("Failed to create output file")?,
                )),
                None => Box::new(io::stdout().lock()),
            };

            match format {
                ViewMode::Table => write_events_table(&events, writer)?,
                ViewMode::Json => write_events_json(&events, writer)?,
                ViewMode::Csv => write_events_csv(&events, writer)?,
            }

            if let Some(path) = output {
                eprintln!("Saved {} events to {}", events.len(), path.display());
            }
        }
        Command::Sports => {
            let sports = repository.list_sports().await?;
            if sports.is_empty() {
                println!("No sports available.");
            }
            for sport in sports {
                println!("{:<28} {}", sport.key, sport.title);
            }
        }
        Command::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
        }
        Command::VerifyToken { token } => {
            let signer = TokenSigner::new(config.jwt_secret.as_bytes(), Arc::new(SystemClock));
            let claims = signer.verify(&token)?;
            let expires = Utc
                .timestamp_opt(claims.exp, 0)
                .single()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| claims.exp.to_string());
            println!("id:       {}", claims.id);
            println!("username: {}", claims.username);
            println!("expires:  {}", expires);
        }
    }

    Ok(())
}
