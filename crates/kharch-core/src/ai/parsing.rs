//! JSON parsing helpers for AI backend responses
//!
//! These functions extract JSON from model responses, which often include
//! extra text before/after the JSON payload.

use crate::error::{Error, Result};
use crate::models::{ExtractedExpense, SavingsInsight};

/// Parse an extracted expense from an AI response
///
/// Every field stays optional no matter what schema the request asked for.
pub fn parse_extracted_expense(response: &str) -> Result<ExtractedExpense> {
    serde_json::from_str(json_slice(response)?).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid expense JSON from AI: {} | Raw: {}",
            e,
            truncate(response)
        ))
    })
}

/// Parse a savings insight from an AI response
pub fn parse_savings_insight(response: &str) -> Result<SavingsInsight> {
    serde_json::from_str(json_slice(response)?).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid insight JSON from AI: {} | Raw: {}",
            e,
            truncate(response)
        ))
    })
}

/// Locate the outermost JSON object in a response
fn json_slice(response: &str) -> Result<&str> {
    let response = response.trim();
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => Ok(&response[s..=e]),
        _ => Err(Error::InvalidData(format!(
            "No JSON found in AI response | Raw: {}",
            truncate(response)
        ))),
    }
}

fn truncate(response: &str) -> String {
    if response.len() > 200 {
        // Model output is arbitrary UTF-8; cut on a char boundary
        let mut cut = 200;
        while !response.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &response[..cut])
    } else {
        response.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracted_expense_plain_json() {
        let result = parse_extracted_expense(
            r#"{"vendor": "Blue Tokai", "amount": 250.0, "category": "SNACK"}"#,
        )
        .unwrap();
        assert_eq!(result.vendor.as_deref(), Some("Blue Tokai"));
        assert_eq!(result.amount, Some(250.0));
    }

    #[test]
    fn test_parse_extracted_expense_with_prose() {
        let response = "Sure! Here is the expense:\n```json\n{\"amount\": 99}\n```";
        let result = parse_extracted_expense(response).unwrap();
        assert_eq!(result.amount, Some(99.0));
        assert!(result.vendor.is_none());
    }

    #[test]
    fn test_parse_extracted_expense_empty_object() {
        let result = parse_extracted_expense("{}").unwrap();
        assert!(result.amount.is_none());
    }

    #[test]
    fn test_parse_no_json_is_error() {
        assert!(parse_extracted_expense("I could not read the receipt").is_err());
    }

    #[test]
    fn test_error_truncation_is_multibyte_safe() {
        // A multibyte char straddling the truncation point must not panic
        let response = format!("{}₹ is roughly what the receipt says", "x".repeat(199));
        let err = parse_extracted_expense(&response).unwrap_err();
        assert!(err.to_string().contains("..."));
    }

    #[test]
    fn test_parse_savings_insight_defaults_missing_fields() {
        let result = parse_savings_insight(r#"{"suggestions": ["Cook at home"]}"#).unwrap();
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.estimated_savings, 0.0);
        assert_eq!(result.avoidable_expenses, "");
    }
}
