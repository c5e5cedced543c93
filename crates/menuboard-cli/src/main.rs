mod admin;
mod app;
mod cli;
mod event;
mod theme;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{info, warn};

use menuboard_client::display::Clock;
use menuboard_client::{DocumentCache, HttpMenuRemote, SyncClient, SyncOutcome};
use menuboard_core::MenuDocument;
use menuboard_shared::config::ClientConfig;

use app::App;
use cli::{Cli, Commands};

type DisplaySync = SyncClient<HttpMenuRemote>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    color_eyre::install().ok();
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::load()?;
    if cli.remote.is_some() {
        config.remote_url = cli.remote.clone();
    }

    // The terminal belongs to the board, so logs go to files.
    let _guard = menuboard_shared::telemetry::init_file_telemetry(&config.log_dir(), "menuboard.log")?;

    match cli.command.unwrap_or(Commands::Display) {
        Commands::Display => start_display(config).await,
        Commands::HashPassword { password } => admin::hash_password(&password),
        command => admin::run(command, &config).await,
    }
}

async fn start_display(config: ClientConfig) -> anyhow::Result<()> {
    let remote = Arc::new(HttpMenuRemote::new(Duration::from_secs(config.request_timeout_seconds)));
    let sync = Arc::new(SyncClient::new(
        remote,
        DocumentCache::new(config.document_cache_path()),
        config.remote_url.clone(),
    ));
    if sync.endpoint().await.is_none() {
        warn!("No remote endpoint configured, showing cached or built-in menu");
    }

    let (documents_tx, documents_rx) = mpsc::channel(4);
    let (refresh_tx, refresh_rx) = mpsc::channel(1);
    let poller = tokio::spawn(poll_loop(
        sync,
        Duration::from_secs(config.poll_interval_seconds.max(1)),
        documents_tx,
        refresh_rx,
    ));

    // Initialize terminal (ratatui::init handles raw mode + alternate screen)
    let terminal = ratatui::init();

    let result = run_display(terminal, &config, documents_rx, refresh_tx).await;

    // Restore terminal (always, even on error)
    ratatui::restore();
    poller.abort();

    result
}

/// Restore the cache, then sync once on start and on every interval or
/// manual refresh. Only changed documents are sent to the frame loop.
async fn poll_loop(
    sync: Arc<DisplaySync>,
    interval: Duration,
    documents: mpsc::Sender<MenuDocument>,
    mut refresh: mpsc::Receiver<()>,
) {
    if let SyncOutcome::Updated { .. } = sync.restore().await {
        if documents.send(sync.document().await).await.is_err() {
            return;
        }
    }

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            Some(()) = refresh.recv() => info!("Manual refresh requested"),
        }

        if let SyncOutcome::Updated { version, source } = sync.sync().await {
            info!(version = ?version, ?source, "Display document changed");
            if documents.send(sync.document().await).await.is_err() {
                break;
            }
        }
    }
}

async fn run_display(
    mut terminal: DefaultTerminal,
    config: &ClientConfig,
    mut documents: mpsc::Receiver<MenuDocument>,
    refresh: mpsc::Sender<()>,
) -> anyhow::Result<()> {
    let clock = Clock::start();
    let mut app = App::new(config, MenuDocument::seed(), clock.now());

    loop {
        while let Ok(document) = documents.try_recv() {
            app.apply_document(document, clock.now());
        }

        let size = terminal.size()?;
        app.tick(clock.now(), ui::viewport_rows(size.height));

        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Check quit flag
        if app.should_quit {
            break;
        }

        // Poll events, the timeout doubles as the frame interval
        if let Some(evt) = event::poll_event(config.frame_millis)? {
            event::handle_event(&mut app, evt, &refresh);
        }
    }
    Ok(())
}
