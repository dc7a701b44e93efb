//! Kharch Web Server
//!
//! Axum-based REST API for the Kharch expense tracker.
//!
//! Every accepted mutation persists the local vault and, when a sync
//! identity is configured, schedules a debounced push of the full snapshot
//! to the remote vault.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use kharch_core::ai::{AiClient, ExpenseAi};
use kharch_core::{Error as CoreError, FileVault, Ledger, SyncClient, SyncStatus, Syncer};

mod handlers;
mod scheduler;

pub use scheduler::PushScheduler;

/// Maximum receipt upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub ledger: RwLock<Ledger>,
    pub vault: FileVault,
    pub ai: Option<AiClient>,
    pub syncer: Syncer,
    pub sync_status: RwLock<SyncStatus>,
    pub pusher: PushScheduler,
}

impl AppState {
    /// Persist the ledger and, when logged in, schedule a debounced push
    ///
    /// Called after every accepted mutation. A persistence failure is an
    /// error; a scheduling decision is not.
    pub async fn commit(self: &Arc<Self>) -> Result<(), AppError> {
        {
            let ledger = self.ledger.read().await;
            ledger.persist(&self.vault).map_err(map_core_error)?;
        }
        if self.syncer.is_logged_in().map_err(map_core_error)? {
            self.pusher.schedule(self.clone());
        }
        Ok(())
    }
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(
    vault: FileVault,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Result<Router, CoreError> {
    let ledger = Ledger::load(&vault)?;

    let ai = AiClient::from_env();
    match ai {
        Some(ref client) => {
            info!(
                "AI backend configured: {} (model: {})",
                client.host(),
                client.model()
            );
        }
        None => {
            info!("AI backend not configured (set GEMINI_API_KEY to enable AI features)");
        }
    }

    let sync_client = SyncClient::from_env();
    info!("Remote vault store: {}", sync_client.base_url());
    let syncer = Syncer::new(sync_client, vault.clone());

    let state = Arc::new(AppState {
        ledger: RwLock::new(ledger),
        vault,
        ai,
        syncer,
        sync_status: RwLock::new(SyncStatus::Idle),
        pusher: PushScheduler::from_env(),
    });

    let api_routes = Router::new()
        // Expenses
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route(
            "/expenses/:id",
            axum::routing::put(handlers::update_expense).delete(handlers::delete_expense),
        )
        // Income and salary
        .route(
            "/income",
            get(handlers::list_income).post(handlers::create_income),
        )
        .route(
            "/income/:id",
            axum::routing::put(handlers::update_income).delete(handlers::delete_income),
        )
        .route(
            "/salary",
            get(handlers::get_salary).put(handlers::set_salary),
        )
        // Reports
        .route("/summary", get(handlers::get_summary))
        // AI assistance
        .route("/assist/chat", post(handlers::assist_chat))
        .route("/assist/receipt", post(handlers::assist_receipt))
        .route("/insights", get(handlers::get_insights))
        // Sync
        .route("/sync/login", post(handlers::sync_login))
        .route("/sync/logout", post(handlers::sync_logout))
        .route("/sync/status", get(handlers::sync_status))
        .route("/sync/push", post(handlers::sync_push))
        .route("/sync/pull", post(handlers::sync_pull))
        // Export
        .route("/export", get(handlers::export_expenses));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(axum::extract::DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    Ok(app)
}

/// Start the server
pub async fn serve(
    vault: FileVault,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    check_ai_connection().await;

    let app = create_router(vault, static_dir, config)?;
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection() {
    match AiClient::from_env() {
        Some(client) => {
            if client.health_check().await {
                info!(
                    "AI backend connected: {} (model: {})",
                    client.host(),
                    client.model()
                );
            } else {
                warn!(
                    "AI backend configured but not responding: {} (model: {})",
                    client.host(),
                    client.model()
                );
            }
        }
        None => {
            info!("AI backend not configured (set GEMINI_API_KEY to enable AI features)");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

/// Map a core error to an HTTP error
///
/// Validation failures become 400s with the real message; everything else
/// is sanitized to a 500 and logged.
pub(crate) fn map_core_error(err: CoreError) -> AppError {
    match err {
        CoreError::InvalidData(msg) => AppError::bad_request(&msg),
        CoreError::NotFound(msg) => AppError::not_found(&msg),
        other => AppError::from(other),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
