//! Google Gemini backend implementation
//!
//! Uses the generateContent REST API with JSON response mode. Text prompts
//! and receipt images go through the same endpoint; images are sent as
//! base64 inline data parts.
//!
//! # Configuration
//!
//! Environment variables:
//! - `GEMINI_API_KEY`: API key (required)
//! - `GEMINI_MODEL`: Model name (default: gemini-2.5-flash)
//! - `GEMINI_HOST`: API host (default: https://generativelanguage.googleapis.com)

use async_trait::async_trait;
use base64::Engine;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Category, Expense, ExtractedExpense, SavingsInsight};

use super::parsing::{parse_extracted_expense, parse_savings_insight};
use super::{insight_window, ExpenseAi, ExtractInput};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_HOST: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone)]
pub struct GeminiBackend {
    http_client: Client,
    host: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(api_key: &str, model: &str, host: &str) -> Self {
        Self {
            http_client: Client::new(),
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create from environment variables
    ///
    /// Required: `GEMINI_API_KEY`
    /// Optional: `GEMINI_MODEL`, `GEMINI_HOST`
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let host = std::env::var("GEMINI_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Some(Self::new(&api_key, &model, &host))
    }

    /// Make a generateContent request and return the model text
    async fn generate(&self, system: &str, parts: Vec<Part>) -> Result<String> {
        let request = GenerateContentRequest {
            system_instruction: Instruction {
                parts: vec![Part::Text {
                    text: system.to_string(),
                }],
            },
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.host, self.model, self.api_key
        );

        let response = self.http_client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::InvalidData(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| match p {
                        Part::Text { text } => Some(text),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::InvalidData("No response from Gemini API".into()))?;

        debug!(model = %self.model, chars = text.len(), "Gemini response received");
        Ok(text)
    }

    fn extraction_system_prompt() -> String {
        let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!(
            "You are an expense entry assistant. Today's date is {}. \
             Extract the expense described by the user (or shown on the receipt) \
             as a JSON object with these keys, all optional: \
             date (YYYY-MM-DD), vendor, category, subCategory, amount (number), \
             paymentMode, notes. \
             The category must be one of: {}. \
             Omit any field you cannot determine. Respond with JSON only.",
            Utc::now().format("%Y-%m-%d"),
            categories.join(", ")
        )
    }

    fn insights_system_prompt() -> &'static str {
        "You are a frugal personal finance advisor. Given a JSON list of recent \
         expenses, respond with a JSON object containing: suggestions (array of \
         short actionable strings), avoidableExpenses (one sentence naming the \
         spending that could be cut), and estimatedSavings (number, monthly). \
         Respond with JSON only."
    }
}

#[async_trait]
impl ExpenseAi for GeminiBackend {
    async fn extract_expense(&self, input: &ExtractInput) -> Result<ExtractedExpense> {
        let parts = match input {
            ExtractInput::Text(text) => vec![Part::Text { text: text.clone() }],
            ExtractInput::Image {
                data,
                mime_type,
                context,
            } => {
                let mut parts = vec![Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.clone(),
                        data: base64::engine::general_purpose::STANDARD.encode(data),
                    },
                }];
                if let Some(context) = context {
                    parts.push(Part::Text {
                        text: context.clone(),
                    });
                }
                parts
            }
        };

        let response = self
            .generate(&Self::extraction_system_prompt(), parts)
            .await?;
        parse_extracted_expense(&response)
    }

    async fn savings_insights(&self, expenses: &[Expense]) -> Result<SavingsInsight> {
        let recent = insight_window(expenses);
        let payload = serde_json::to_string(recent)?;

        let response = self
            .generate(
                Self::insights_system_prompt(),
                vec![Part::Text { text: payload }],
            )
            .await?;
        parse_savings_insight(&response)
    }

    async fn health_check(&self) -> bool {
        // A bare model fetch is enough to prove the key and host work
        let url = format!(
            "{}/v1beta/models/{}?key={}",
            self.host, self.model, self.api_key
        );
        match self.http_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.host
    }
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Instruction,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Instruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

/// A content part: plain text or base64 inline data
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

/// Gemini generateContent response (only the fields we read)
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_trims_trailing_slash() {
        let backend = GeminiBackend::new("key", "gemini-2.5-flash", "https://example.com/");
        assert_eq!(backend.model(), "gemini-2.5-flash");
        assert_eq!(backend.host(), "https://example.com");
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            system_instruction: Instruction {
                parts: vec![Part::Text {
                    text: "sys".to_string(),
                }],
            },
            contents: vec![Content {
                parts: vec![Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/png".to_string(),
                        data: "AAAA".to_string(),
                    },
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"systemInstruction\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
        assert!(json.contains("\"inlineData\""));
        assert!(json.contains("\"mimeType\":\"image/png\""));
    }

    #[test]
    fn test_extraction_prompt_lists_categories() {
        let prompt = GeminiBackend::extraction_system_prompt();
        assert!(prompt.contains("HOUSE EXPENSE"));
        assert!(prompt.contains("OTHERS"));
    }
}
