//! Debounced push scheduling
//!
//! Each accepted mutation arms a delayed push; a newer mutation aborts the
//! pending delay and starts a fresh one, so a burst of edits results in a
//! single push. Only the delay phase is cancellable. Once a push is in
//! flight it runs to completion, so a concurrent pull can still be
//! overwritten; last writer wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use kharch_core::SyncStatus;

use crate::AppState;

const DEFAULT_DEBOUNCE_MS: u64 = 1500;

pub struct PushScheduler {
    delay: Duration,
    pending: Mutex<Option<PendingPush>>,
}

/// A scheduled push and whether it has moved past its delay
struct PendingPush {
    handle: JoinHandle<()>,
    entered: Arc<AtomicBool>,
}

impl PushScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Create from environment
    ///
    /// Optional: `KHARCH_PUSH_DEBOUNCE_MS` (default: 1500)
    pub fn from_env() -> Self {
        let delay_ms = std::env::var("KHARCH_PUSH_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS);
        Self::new(Duration::from_millis(delay_ms))
    }

    /// Arm (or re-arm) the delayed push
    ///
    /// A previous task still in its delay phase is aborted; one that has
    /// already started pushing is left alone.
    pub fn schedule(&self, state: Arc<AppState>) {
        let delay = self.delay;
        let entered = Arc::new(AtomicBool::new(false));
        let task_entered = entered.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task_entered.store(true, Ordering::SeqCst);
            push_now(&state).await;
        });

        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = pending.replace(PendingPush { handle, entered }) {
            if !previous.entered.load(Ordering::SeqCst) {
                previous.handle.abort();
                debug!("Re-armed debounced push");
            }
        }
    }
}

/// Push the current snapshot, flipping the sync indicator around the call
///
/// A failed push only flips the indicator to Error; local state stays
/// authoritative and the next mutation schedules a retry.
pub(crate) async fn push_now(state: &Arc<AppState>) {
    *state.sync_status.write().await = SyncStatus::Syncing;

    let snapshot = state.ledger.read().await.snapshot();
    match state.syncer.push_snapshot(&snapshot).await {
        Ok(()) => {
            debug!("Pushed snapshot to remote vault");
            *state.sync_status.write().await = SyncStatus::Idle;
        }
        Err(e) => {
            warn!(error = %e, "Push to remote vault failed");
            *state.sync_status.write().await = SyncStatus::Error;
        }
    }
}
