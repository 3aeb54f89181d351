use std::env;
use std::fs;
use std::process;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use thm_readme::WebScraper;
use thm_readme::render::render_markdown;

#[derive(Parser)]
#[command(name = "thm-readme")]
#[command(about = "Generates a markdown README of completed TryHackMe rooms", long_about = None)]
struct Cli {
    #[arg(help = "TryHackMe username")]
    username: String,

    #[arg(long, default_value = "README.md", help = "Output file path")]
    outfile: String,

    #[arg(
        short = 's',
        long,
        value_enum,
        default_value = "api",
        help = "Where to read completed rooms from"
    )]
    source: Source,

    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,
}

#[derive(Debug, Clone, ValueEnum)]
enum Source {
    /// The all-completed-rooms JSON endpoint (honors THM_SESSION)
    Api,
    /// The public profile page
    Html,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let scraper = WebScraper::new().unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    let session_cookie = env::var("THM_SESSION").ok();

    let rooms = match cli.source {
        Source::Api => {
            scraper
                .fetch_completed_rooms(&cli.username, session_cookie.as_deref())
                .await
        }
        Source::Html => {
            if session_cookie.is_some() {
                log::warn!("THM_SESSION is ignored for {:?} source", cli.source);
            }
            scraper.fetch_profile_rooms(&cli.username).await
        }
    }
    .unwrap_or_else(|e| {
        log::error!("Error fetching rooms: {}", e);
        process::exit(1);
    });

    let markdown = render_markdown(&cli.username, &rooms);

    if let Err(e) = fs::write(&cli.outfile, markdown) {
        log::error!("Error writing {}: {}", cli.outfile, e);
        process::exit(1);
    }

    log::info!("{} rooms written to {}", rooms.len(), cli.outfile);
}
