//! Mock backend for testing
//!
//! Returns deterministic extractions so handler and CLI tests can run
//! without a network or an API key.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Expense, ExtractedExpense, SavingsInsight};

use super::{insight_window, ExpenseAi, ExtractInput};

#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }

    fn extract_from_text(text: &str) -> ExtractedExpense {
        let lower = text.to_lowercase();

        // Last numeric token wins as the amount
        let amount = text
            .split_whitespace()
            .filter_map(|token| {
                token
                    .trim_matches(|c: char| !c.is_ascii_digit() && c != '.')
                    .parse::<f64>()
                    .ok()
            })
            .last();

        let category = [
            ("petrol", "BIKE PETROL"),
            ("rent", "HOUSE EXPENSE"),
            ("lunch", "FOOD"),
            ("dinner", "FOOD"),
            ("pizza", "FOOD"),
            ("tea", "SNACK"),
            ("coffee", "SNACK"),
            ("medicine", "MEDICAL"),
            ("pharmacy", "MEDICAL"),
            ("movie", "ENTERTAINMENT"),
            ("recharge", "PHONE DUE"),
            ("bus", "TRAVEL"),
            ("train", "TRAVEL"),
        ]
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| category.to_string());

        let payment_mode = if lower.contains("upi") {
            Some("UPI".to_string())
        } else if lower.contains("card") {
            Some("Card".to_string())
        } else {
            None
        };

        ExtractedExpense {
            amount,
            category,
            payment_mode,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ExpenseAi for MockBackend {
    async fn extract_expense(&self, input: &ExtractInput) -> Result<ExtractedExpense> {
        match input {
            ExtractInput::Text(text) => Ok(Self::extract_from_text(text)),
            ExtractInput::Image { context, .. } => Ok(ExtractedExpense {
                vendor: Some("Mock Store".to_string()),
                amount: Some(150.0),
                category: Some("OTHERS".to_string()),
                notes: context.clone(),
                ..Default::default()
            }),
        }
    }

    async fn savings_insights(&self, expenses: &[Expense]) -> Result<SavingsInsight> {
        let recent = insight_window(expenses);
        let total: f64 = recent.iter().map(|e| e.amount).sum();

        Ok(SavingsInsight {
            suggestions: vec![
                "Cook at home more often".to_string(),
                "Batch small purchases".to_string(),
            ],
            avoidable_expenses: "Frequent snack spending".to_string(),
            estimated_savings: total * 0.1,
        })
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
