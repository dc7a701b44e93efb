//! Pluggable AI backend abstraction
//!
//! The AI collaborator does two jobs: turn free text or a receipt image into
//! a partial expense, and analyze recent spending for savings suggestions.
//! Backends return all fields as optional; callers apply defaults and decide
//! whether the result is usable.
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY`: API key (required for gemini backend)
//! - `GEMINI_MODEL`: Model name (default: gemini-2.5-flash)
//! - `GEMINI_HOST`: API host (default: https://generativelanguage.googleapis.com)

mod gemini;
mod mock;
pub mod parsing;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Expense, ExtractedExpense, SavingsInsight};

/// Most recent records considered for savings analysis
pub const INSIGHT_WINDOW: usize = 50;

/// Input for expense extraction
#[derive(Debug, Clone)]
pub enum ExtractInput {
    /// Free-form text ("coffee at Blue Tokai 250 upi")
    Text(String),
    /// Receipt image with its mime type and optional user context
    Image {
        data: Vec<u8>,
        mime_type: String,
        context: Option<String>,
    },
}

/// Trait defining the interface for all AI backends
#[async_trait]
pub trait ExpenseAi: Send + Sync {
    /// Extract expense fields from text or a receipt image
    async fn extract_expense(&self, input: &ExtractInput) -> Result<ExtractedExpense>;

    /// Analyze recent expenses for savings opportunities
    ///
    /// Only the last [`INSIGHT_WINDOW`] records are sent to the model.
    async fn savings_insights(&self, expenses: &[Expense]) -> Result<SavingsInsight>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AiClient {
    /// Google Gemini backend (HTTP API)
    Gemini(GeminiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AiClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `gemini` (default): Uses GEMINI_API_KEY, GEMINI_MODEL, GEMINI_HOST
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" => GeminiBackend::from_env().map(AiClient::Gemini),
            "mock" => Some(AiClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to gemini");
                GeminiBackend::from_env().map(AiClient::Gemini)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AiClient::Mock(MockBackend::new())
    }
}

/// The slice of expenses a savings analysis should look at
pub(crate) fn insight_window(expenses: &[Expense]) -> &[Expense] {
    let start = expenses.len().saturating_sub(INSIGHT_WINDOW);
    &expenses[start..]
}

#[async_trait]
impl ExpenseAi for AiClient {
    async fn extract_expense(&self, input: &ExtractInput) -> Result<ExtractedExpense> {
        match self {
            AiClient::Gemini(b) => b.extract_expense(input).await,
            AiClient::Mock(b) => b.extract_expense(input).await,
        }
    }

    async fn savings_insights(&self, expenses: &[Expense]) -> Result<SavingsInsight> {
        match self {
            AiClient::Gemini(b) => b.savings_insights(expenses).await,
            AiClient::Mock(b) => b.savings_insights(expenses).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AiClient::Gemini(b) => b.health_check().await,
            AiClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AiClient::Gemini(b) => b.model(),
            AiClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AiClient::Gemini(b) => b.host(),
            AiClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_client_mock() {
        let client = AiClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = AiClient::mock();
        assert!(client.health_check().await);
    }

    #[test]
    fn test_insight_window_truncates() {
        use chrono::Utc;
        let expenses: Vec<Expense> = (0..60)
            .map(|i| Expense {
                id: i.to_string(),
                date: Utc::now(),
                vendor: "V".to_string(),
                category: crate::models::Category::Others,
                sub_category: None,
                amount: i as f64,
                payment_mode: "Cash".to_string(),
                notes: String::new(),
            })
            .collect();

        let window = insight_window(&expenses);
        assert_eq!(window.len(), INSIGHT_WINDOW);
        assert_eq!(window[0].id, "10");
    }
}
