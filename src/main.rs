use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod chat;
mod config;
mod contact;
mod gemini;
mod handler;
mod profile;
mod theme;
mod tui;
mod ui;

use app::App;
use config::Config;
use gemini::GeminiClient;
use profile::Profile;
use theme::Theme;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Terminal portfolio and resume viewer with an AI assistant")]
struct Cli {
    /// Path to a profile JSON file (defaults to the bundled profile)
    #[arg(short, long)]
    profile: Option<PathBuf>,
    /// Color theme: midnight or paper
    #[arg(short, long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|_| Config::new());

    init_logging()?;

    let profile = match cli.profile.or_else(|| config.profile_path.clone()) {
        Some(path) => Profile::load(&path)?,
        None => Profile::builtin()?,
    };

    let theme = cli
        .theme
        .or_else(|| config.theme.clone())
        .and_then(|name| Theme::by_name(&name))
        .unwrap_or_default();

    // Built once; a missing key surfaces as failed requests, which
    // the dispatch boundary turns into the generic apology.
    let api_key = config.api_key().unwrap_or_default();
    let gemini = GeminiClient::new(&api_key, &profile.system_instruction());

    let mut app = App::new(profile, theme, gemini);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(&mut app, event);
        }

        // The tick stream guarantees this runs shortly after the
        // dispatch task finishes even without keyboard activity.
        app.poll_assistant().await;
    }

    tui::restore()?;
    Ok(())
}

/// The terminal owns stderr, so diagnostics go to a log file. The
/// RUST_LOG env var overrides the default filter.
fn init_logging() -> Result<()> {
    let log_path = Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "folio=info".into()))
        .with_writer(file)
        .with_ansi(false)
        .init();

    Ok(())
}
