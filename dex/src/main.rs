//! Pokédex encounter widget.
//!
//! A small terminal widget that periodically encounters a random creature,
//! shows its sprite and flavor text, tracks shiny encounters across
//! sessions, and renders a persistent collection grid.
//!
//! # Headless Mode
//!
//! Run with `--once` to generate and record a single encounter and print the
//! card to stdout:
//!
//! ```bash
//! cargo run -p dex -- --once
//! ```

mod app;
mod events;
mod fetch_worker;
mod ui;

use clap::Parser;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dex_core::{DexConfig, DexSession, EncounterGenerator, ObjectCache};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use app::App;
use events::{handle_event, EventResult};
use fetch_worker::{spawn_worker, WorkerRequest, WorkerResponse};
use ui::render::render;

/// Pokédex encounter widget.
#[derive(Debug, Parser)]
#[command(name = "dex", about = "Pokédex encounter widget", version)]
struct Args {
    /// Highest creature identifier to roll.
    #[arg(long, default_value_t = dex_core::config::DEFAULT_MAX_ID)]
    max_id: u32,

    /// Per-encounter shiny probability.
    #[arg(long, default_value_t = dex_core::config::DEFAULT_SHINY_RATE)]
    shiny_rate: f64,

    /// Seconds between automatic encounters.
    #[arg(long, default_value_t = 60)]
    interval: u64,

    /// Cache directory (defaults to $XDG_CACHE_HOME/pokedex).
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Flavor text language tag.
    #[arg(long, default_value = "en")]
    language: String,

    /// Generate one encounter, print the card, and exit.
    #[arg(long)]
    once: bool,
}

impl Args {
    fn to_config(&self) -> DexConfig {
        let mut config = DexConfig::new()
            .with_max_id(self.max_id)
            .with_shiny_rate(self.shiny_rate)
            .with_encounter_interval(Duration::from_secs(self.interval))
            .with_language(self.language.clone());
        if let Some(dir) = &self.cache_dir {
            config = config.with_cache_root(dir);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.to_config();

    let cache = Arc::new(ObjectCache::new(&config.cache_root));
    cache.ensure_dir().await?;
    init_logging(&config);

    let catalog = Arc::new(pokeapi::Client::new());
    let generator = EncounterGenerator::new(catalog, cache.clone(), &config);

    if args.once {
        return run_once(config, cache, generator).await;
    }

    let session = DexSession::open(config, cache).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(session), generator).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Err(e) = &result {
        eprintln!("Error: {e}");
    }
    result
}

/// Send logs to a file under the cache root; stdout belongs to the UI.
fn init_logging(config: &DexConfig) {
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
    else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}

/// Headless mode: one encounter, card on stdout.
async fn run_once(
    config: DexConfig,
    cache: Arc<ObjectCache>,
    generator: EncounterGenerator<pokeapi::Client>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = DexSession::open(config, cache).await?;

    let record = generator.generate().await?;
    session.apply(record.clone(), chrono::Utc::now()).await;

    if record.shiny {
        println!("✨ SHINY ✨");
    }
    println!("{} – {}", record.dex_label(), record.name);
    println!("Type: {}", record.type_line());
    println!("{}", record.flavor);

    let stats = session.stats();
    println!();
    println!("Encounters: {}", stats.total);
    if let Some((name, count)) = &stats.top_shiny {
        println!("Top shiny: {name} ({count})");
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    generator: EncounterGenerator<pokeapi::Client>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (request_tx, mut response_rx) = spawn_worker(generator);

    // Both intervals fire immediately on startup: the first encounter and
    // the first since-line recompute happen right away.
    let mut encounter_timer = tokio::time::interval(app.encounter_interval());
    let mut since_timer = tokio::time::interval(app.since_interval());
    let mut input = EventStream::new();

    loop {
        terminal.draw(|f| render(f, &app))?;

        tokio::select! {
            _ = encounter_timer.tick() => {
                app.begin_fetch();
                let _ = request_tx.send(WorkerRequest::Encounter).await;
            }
            _ = since_timer.tick() => {
                app.refresh_since_line(chrono::Utc::now());
            }
            Some(response) = response_rx.recv() => {
                match response {
                    WorkerResponse::Encounter(Ok(record)) => {
                        app.apply_encounter(record, chrono::Utc::now()).await;
                    }
                    WorkerResponse::Encounter(Err(e)) => {
                        app.set_error(e.to_string());
                    }
                }
            }
            maybe_event = input.next() => {
                let Some(Ok(event)) = maybe_event else {
                    break;
                };
                match handle_event(&mut app, event) {
                    EventResult::Quit => break,
                    EventResult::RequestEncounter => {
                        app.begin_fetch();
                        let _ = request_tx.send(WorkerRequest::Encounter).await;
                    }
                    EventResult::Continue | EventResult::NeedsRedraw => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    let _ = request_tx.send(WorkerRequest::Shutdown).await;
    Ok(())
}
