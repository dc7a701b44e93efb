//! Remote vault sync handlers
//!
//! Login resolves the email to a deterministic vault key and, when a
//! remote snapshot exists, replaces local state with it. Push and pull
//! are full-snapshot overwrites with no retry; a failure leaves the sync
//! indicator in the error state until the next successful operation.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use kharch_core::{Error as CoreError, SyncStatus};

use crate::{map_core_error, scheduler, AppError, AppState, SuccessResponse};

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: SyncStatus,
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct PullResponse {
    pub restored: bool,
}

/// POST /api/sync/login - Attach a sync identity and adopt the remote vault
///
/// When no remote vault exists yet one is created seeded with the current
/// local snapshot, and local state stays authoritative.
pub async fn sync_login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> Result<Json<StatusResponse>, AppError> {
    if body.email.trim().is_empty() {
        return Err(AppError::bad_request("Email cannot be empty"));
    }

    *state.sync_status.write().await = SyncStatus::Syncing;

    let seed = state.ledger.read().await.snapshot();
    let remote = match state.syncer.login(&body.email, &seed).await {
        Ok(remote) => remote,
        Err(e) => {
            *state.sync_status.write().await = SyncStatus::Error;
            warn!(error = %e, "Sync login failed");
            return Err(sync_error(e));
        }
    };

    if let Some(snapshot) = remote {
        info!("Adopted remote vault snapshot");
        let mut ledger = state.ledger.write().await;
        ledger.restore(snapshot);
        ledger.persist(&state.vault).map_err(map_core_error)?;
    } else {
        info!("Created remote vault from local snapshot");
    }

    *state.sync_status.write().await = SyncStatus::Idle;
    Ok(Json(StatusResponse {
        status: SyncStatus::Idle,
        email: state.syncer.email().map_err(map_core_error)?,
    }))
}

/// POST /api/sync/logout - Detach the sync identity
///
/// Local data and the remote vault mapping are kept, so logging back in
/// with the same email finds the same vault.
pub async fn sync_logout(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.syncer.logout().map_err(map_core_error)?;
    *state.sync_status.write().await = SyncStatus::Idle;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/sync/status - Current sync indicator and identity
pub async fn sync_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(StatusResponse {
        status: *state.sync_status.read().await,
        email: state.syncer.email().map_err(map_core_error)?,
    }))
}

/// POST /api/sync/push - Push the local snapshot immediately
pub async fn sync_push(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SuccessResponse>, AppError> {
    require_login(&state)?;
    scheduler::push_now(&state).await;
    match *state.sync_status.read().await {
        SyncStatus::Error => Err(AppError::internal("Push to remote vault failed")),
        _ => Ok(Json(SuccessResponse { success: true })),
    }
}

/// POST /api/sync/pull - Replace local state with the remote snapshot
pub async fn sync_pull(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PullResponse>, AppError> {
    require_login(&state)?;

    *state.sync_status.write().await = SyncStatus::Syncing;
    let remote = match state.syncer.pull_snapshot().await {
        Ok(remote) => remote,
        Err(e) => {
            *state.sync_status.write().await = SyncStatus::Error;
            warn!(error = %e, "Pull from remote vault failed");
            return Err(sync_error(e));
        }
    };

    let restored = if let Some(snapshot) = remote {
        let mut ledger = state.ledger.write().await;
        ledger.restore(snapshot);
        ledger.persist(&state.vault).map_err(map_core_error)?;
        true
    } else {
        false
    };

    *state.sync_status.write().await = SyncStatus::Idle;
    Ok(Json(PullResponse { restored }))
}

fn require_login(state: &AppState) -> Result<(), AppError> {
    if state.syncer.is_logged_in().map_err(map_core_error)? {
        Ok(())
    } else {
        Err(AppError::bad_request("Not logged in"))
    }
}

/// Surface sync failures with their real message
fn sync_error(err: CoreError) -> AppError {
    match err {
        CoreError::Sync(msg) => AppError::internal(&msg),
        other => map_core_error(other),
    }
}
