//! Client for the Google generative-language REST API.
//!
//! The tutoring endpoints send prompt strings to a hosted model and post-process the
//! returned text. Which model name is actually served changes over time, so startup
//! walks a static preference list and keeps the first model that answers a trivial
//! probe; if none answers (or no API key is configured) the service runs with no
//! client and the tutoring endpoints fall back to canned copy.
//!
//! The prediction core never calls into this module.

use serde::{Deserialize, Serialize};

/// Model names to try at startup, most preferred first.
const MODEL_PREFERENCE: [&str; 3] = ["gemini-2.5-flash", "gemini-1.5-flash", "gemini-1.5-pro"];

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Request body for the Gemini API.
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

/// Response from the Gemini API.
#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
struct ThinkingConfig {
    /// Set to 0 to disable thinking for faster requests.
    thinking_budget: u32,
}

/// A bound client: one API key, one model name that answered the startup probe.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Walks the model preference list and returns a client bound to the first model
    /// that answers a trivial prompt. `None` when the key is empty or nothing answers.
    pub async fn select(api_key: &str) -> Option<Self> {
        if api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY not set, tutoring endpoints will serve fallback copy");
            return None;
        }

        let client = reqwest::Client::new();
        for model in MODEL_PREFERENCE {
            let candidate = Self {
                client: client.clone(),
                api_key: api_key.to_string(),
                model: model.to_string(),
            };
            match candidate.generate("hello").await {
                Ok(_) => {
                    tracing::info!(model, "generation model selected");
                    return Some(candidate);
                }
                Err(e) => {
                    tracing::warn!(model, "generation model probe failed: {e}");
                }
            }
        }

        tracing::warn!("no generation model answered, tutoring endpoints will serve fallback copy");
        None
    }

    /// The model name this client is bound to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one prompt and returns the first candidate's text.
    pub async fn generate(&self, prompt: &str) -> Result<String, String> {
        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            }),
        };

        let response = self
            .client
            .post(format!(
                "{API_BASE}/{}:generateContent?key={}",
                self.model, self.api_key
            ))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let response_text = response
            .text()
            .await
            .map_err(|e| format!("failed to read response body: {e}"))?;
        let response = serde_json::from_str::<GeminiResponse>(&response_text).map_err(|e| {
            format!("error decoding response body: {e}. Full response: {response_text}")
        })?;

        response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| "response contained no candidates".to_string())
    }
}

/// Drops markdown code-fence lines from generated text.
pub fn strip_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits generated text into one question per line, dropping blanks and
/// stripping bullet markers and list numbering.
pub fn parse_question_lines(text: &str) -> Vec<String> {
    strip_fences(text)
        .lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    let line = line
        .trim_start_matches(['-', '*'])
        .trim_start();
    // "3." or "3)" numbering
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim();
        }
    }
    line
}
