//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, error, info, warn};

use crate::{
    commands::CommandResult,
    error::{EngineError, SettingsError},
    services::{Settings, SettingsUpdate},
    state::{AppState, CountdownStateView},
};
use super::responses::{HealthResponse, StartRequest, StatusResponse};

/// Handle POST /timer/start - Start the repeating reminder
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StartRequest>, JsonRejection>,
) -> (StatusCode, Json<CommandResult>) {
    state.record_action("start-timer");

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Malformed start request: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(CommandResult::failed(rejection.body_text())),
            );
        }
    };

    match state.commands.try_start(request.interval, &request.message) {
        Ok(()) => {
            info!("Start endpoint called - reminder every {} minutes", request.interval);
            (StatusCode::OK, Json(CommandResult::ok()))
        }
        Err(e) => {
            let status = match e {
                EngineError::AlreadyRunning => StatusCode::CONFLICT,
                EngineError::StateLock(_) | EngineError::NotificationUnavailable => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            };
            (status, Json(CommandResult::failed(e)))
        }
    }
}

/// Handle POST /timer/stop - Stop the reminder
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<CommandResult>) {
    state.record_action("stop-timer");

    let result = state.commands.stop();
    if result.success {
        info!("Stop endpoint called - reminder stopped");
        (StatusCode::OK, Json(result))
    } else {
        error!("Failed to stop reminder: {:?}", result.error);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(result))
    }
}

/// Handle GET /timer/status - Current countdown state
pub async fn timer_status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountdownStateView>, StatusCode> {
    state.commands.status().map(Json).map_err(|e| {
        error!("Failed to get timer status: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /timer/events - Stream progress snapshots as they are published
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Display attached to progress stream");
    let rx = state.progress.subscribe();

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let snapshot = rx.borrow_and_update().clone();
        Some((snapshot, rx))
    })
    .filter_map(|snapshot| async move { snapshot })
    .filter_map(|snapshot| async move {
        match Event::default().event("timer-update").json_data(&snapshot) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                warn!("Failed to encode progress snapshot: {}", e);
                None
            }
        }
    });

    Sse::new(updates).keep_alive(KeepAlive::default())
}

/// Handle GET /settings - Current user settings
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.settings.get_all().await)
}

/// Handle PUT /settings - Merge a partial settings update
pub async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<Settings>, (StatusCode, Json<CommandResult>)> {
    state.record_action("update-settings");

    match state.settings.update(update).await {
        Ok(settings) => Ok(Json(settings)),
        Err(SettingsError::Invalid(e)) => {
            warn!("Settings update rejected: {}", e);
            Err((StatusCode::UNPROCESSABLE_ENTITY, Json(CommandResult::failed(e))))
        }
        Err(e) => {
            error!("Failed to update settings: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(CommandResult::failed(e))))
        }
    }
}

/// Handle GET /status - Return current server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.commands.status() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
