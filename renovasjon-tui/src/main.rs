//! Terminal UI that resolves a Norwegian address and shows its upcoming waste collections.

mod app;
mod cli;
mod input;
mod ui;

use std::{fs::File, io, path::Path, sync::Mutex, time::Duration as StdDuration};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use renovasjon_core::config::RenovasjonConfig;
use renovasjon_provider_geonorge as geonorge;
use renovasjon_provider_komtek as komtek;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::Cli;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = RenovasjonConfig::load_with_env(cli.config.as_deref())
        .context("failed to load configuration")?;

    // HTTP + backend setup
    let client = Client::builder()
        .user_agent(config.http.user_agent.as_str())
        .timeout(config.http.timeout())
        .build()?;

    let addresses = geonorge::address_port(client.clone(), &config.address_registry);
    let backends = komtek::backends(client, &config, addresses);
    info!(timeout_secs = config.http.timeout_secs, "backends ready");

    // App state
    let lookup_on_start = cli.address.is_some();
    let app = App::new(backends, cli.address);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app, lookup_on_start).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    lookup_on_start: bool,
) -> Result<()> {
    let mut pending = if lookup_on_start {
        Action::LookupAddress
    } else {
        Action::None
    };

    loop {
        match pending {
            Action::Quit => break,
            Action::None => {}
            Action::LookupAddress => {
                app.is_loading = true;
                app.error_message = None;
                terminal.draw(|frame| ui::draw(frame, &app))?;

                app.lookup_address().await;
                app.is_loading = false;
            }
            Action::RefreshCollections => {
                app.is_loading = true;
                terminal.draw(|frame| ui::draw(frame, &app))?;

                app.refresh_collections().await;
                app.is_loading = false;
            }
        }
        pending = Action::None;

        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            pending = input::handle_key_event(key, &mut app);
        }
    }

    Ok(())
}
