//! BlinkNow - An eye care reminder service
//!
//! This is the main entry point for the blink-now application.

use std::sync::Arc;
use tokio::{net::TcpListener, runtime::Handle};
use tracing::{error, info, warn};

use blink_now::{
    api::create_router,
    commands::CommandSurface,
    config::Config,
    services::{AppSink, Autostart, NotificationQueue, ProgressChannel, SettingsStore},
    state::AppState,
    tasks::TokioTicker,
    timer::CountdownEngine,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("blink_now={},tower_http=info", config.log_level()))
        .init();

    info!("Starting blink-now v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, interval bounds={}..={}min",
          config.host, config.port, config.bounds().min, config.bounds().max);

    // Settings and autostart
    let settings = SettingsStore::new(
        config.settings_path()?,
        Autostart::for_current_user()?,
        config.bounds(),
    );
    if let Err(e) = settings.initialize().await {
        warn!("Failed to initialize settings, using defaults: {}", e);
    }
    let saved = settings.get_all().await;
    info!("Settings loaded from {}", settings.path().display());

    // Countdown engine wired to notifications and the progress channel
    let progress = ProgressChannel::new();
    let notifications = NotificationQueue::spawn(config.notifier(), &Handle::current());
    let sink = Arc::new(AppSink::new(notifications, progress.clone()));
    let ticker = Arc::new(TokioTicker::new(Handle::current()));
    let engine = CountdownEngine::new(sink, ticker);
    let commands = CommandSurface::new(engine, config.bounds());

    if config.start {
        let interval = i64::try_from(saved.interval_minutes).unwrap_or(i64::MAX);
        let result = commands.start(interval, &saved.message);
        if !result.success {
            warn!("Could not start reminder at launch: {}", result.error.unwrap_or_default());
        }
    }

    let state = Arc::new(AppState::new(
        commands,
        progress,
        settings,
        config.port,
        config.host.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start  - Start the reminder countdown");
    info!("  POST /timer/stop   - Stop the reminder countdown");
    info!("  GET  /timer/status - Current countdown state");
    info!("  GET  /timer/events - Progress stream (server-sent events)");
    info!("  GET  /settings     - Read settings");
    info!("  PUT  /settings     - Update settings");
    info!("  GET  /status       - Server status");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!("{:#}", e),
            }
        }
    }

    // Stop ticking before the runtime goes away
    let stopped = state.commands.stop();
    if !stopped.success {
        warn!("Failed to stop reminder on shutdown: {:?}", stopped.error);
    }

    info!("Server shutdown complete");
    Ok(())
}
