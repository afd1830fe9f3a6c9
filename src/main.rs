//! # Gatewood Main Entry Point
//!
//! Loads and validates the world configuration, wires the dispatcher to a
//! chat service, and feeds key events from stdin. Each input line is either a
//! DOM-style key identifier (`ArrowUp`, `Enter`, a single character) or a
//! whole chat message, which is fed character by character followed by Enter.

use clap::Parser;
use gatewood::chat::{ChatService, HttpChatService, ScriptedChatService};
use gatewood::game::engine::Event;
use gatewood::world::demo;
use gatewood::{Dispatcher, GatewoodResult, Key, WorldConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Command line arguments for Gatewood.
#[derive(Parser, Debug)]
#[command(name = "gatewood")]
#[command(about = "A tile-based RPG front-end with an AI-driven dialog core")]
#[command(version)]
struct Args {
    /// Path to a world configuration file (JSON); the built-in demo world is
    /// used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chat proxy endpoint; without it a scripted offline service replies
    #[arg(long)]
    endpoint: Option<String>,

    /// Shared access key sent with each chat request; falls back to the
    /// GATEWOOD_ACCESS_KEY environment variable
    #[arg(long)]
    access_key: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> GatewoodResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    log::info!("Starting Gatewood v{}", gatewood::VERSION);

    let world = match &args.config {
        Some(path) => WorldConfig::load(path)?,
        None => demo::world()?,
    };
    let world = Arc::new(world);

    match &args.endpoint {
        Some(endpoint) => {
            let access_key = args
                .access_key
                .clone()
                .or_else(|| std::env::var("GATEWOOD_ACCESS_KEY").ok())
                .unwrap_or_default();
            run(world, HttpChatService::new(endpoint, access_key)).await;
        }
        None => {
            log::info!("No endpoint given; using the scripted offline chat service");
            run(world, ScriptedChatService::new(Vec::new())).await;
        }
    }

    log::info!("Session ended");
    Ok(())
}

fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_target(false)
        .init();
}

/// Runs the dispatcher loop alongside a blocking stdin reader. The session
/// ends when stdin closes or a line reads `quit`.
async fn run<C: ChatService + 'static>(world: Arc<WorldConfig>, client: C) {
    let dispatcher = Dispatcher::new(world, client);
    let sender = dispatcher.sender();

    let input = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed == "quit" {
                break;
            }
            for event in events_for_line(trimmed) {
                if sender.send(event).is_err() {
                    return;
                }
            }
        }
    });

    tokio::select! {
        _ = dispatcher.run() => {}
        _ = input => {}
    }
}

/// Turns one input line into key events: a recognized identifier becomes one
/// key press; any longer text is typed character by character and submitted
/// with Enter.
fn events_for_line(line: &str) -> Vec<Event> {
    if line.is_empty() {
        return Vec::new();
    }
    if let Some(key) = Key::parse(line) {
        return vec![Event::KeyDown(key)];
    }
    let mut events: Vec<Event> = line
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| Event::KeyDown(Key::Char(c)))
        .collect();
    events.push(Event::KeyDown(Key::Enter));
    events
}
