//! HTTP client for the hosted chat-completion endpoint.
//!
//! Pure request/response glue: one prompt in, one generated reply out.
//! No retries, no caching, no conversation state. The only policy here is
//! the fixed domain preamble that constrains replies to skin-condition
//! topics.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Domain-constraint preamble sent with every prompt.
const SYSTEM_PREAMBLE: &str = "You are a helpful, respectful, and honest assistant \
providing information about skin conditions. Answer concisely and in a friendly \
manner. Do not provide medical advice.";

const MAX_NEW_TOKENS: u32 = 250;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },
    #[error("upstream model is still loading, try again shortly")]
    ModelWarming,
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("endpoint returned no completion")]
    EmptyCompletion,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Client for a hosted text-generation endpoint (Hugging Face Inference
/// API wire format, Llama-2 chat prompt structure).
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ChatClient {
    /// Create a client for the given model endpoint URL.
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Forward one prompt, constrained by the domain preamble, and relay
    /// the trimmed generated text.
    pub async fn ask(&self, prompt: &str) -> Result<String, ChatError> {
        let framed = frame_prompt(prompt);
        let request = GenerateRequest {
            inputs: &framed,
            parameters: GenerateParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                return_full_text: false,
            },
        };

        info!(endpoint = %self.endpoint, "forwarding prompt to chat endpoint");
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(map_error_status(status.as_u16(), body));
        }

        let body = resp.text().await?;
        parse_completion(&body)
    }
}

/// Map a non-success endpoint status to its passthrough error.
///
/// 503 gets its own case: the hosted model spins down when idle, so
/// callers can word the reply sensibly instead of relaying a raw body.
fn map_error_status(status: u16, body: String) -> ChatError {
    if status == 503 {
        ChatError::ModelWarming
    } else {
        ChatError::Endpoint { status, body }
    }
}

/// Wrap a user prompt in the Llama-2 chat structure with the system preamble.
fn frame_prompt(prompt: &str) -> String {
    format!("[INST] <<SYS>>\n{SYSTEM_PREAMBLE}\n<</SYS>>\n\n{prompt} [/INST]")
}

/// Extract the generated text from an endpoint response body.
fn parse_completion(body: &str) -> Result<String, ChatError> {
    let completions: Vec<GeneratedText> = serde_json::from_str(body)?;
    let first = completions
        .into_iter()
        .next()
        .ok_or(ChatError::EmptyCompletion)?;
    Ok(first.generated_text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framed_prompt_carries_preamble_and_tags() {
        let framed = frame_prompt("what causes hives?");
        assert!(framed.starts_with("[INST] <<SYS>>"));
        assert!(framed.ends_with("what causes hives? [/INST]"));
        assert!(framed.contains("Do not provide medical advice."));
    }

    #[test]
    fn request_json_shape() {
        let framed = frame_prompt("q");
        let request = GenerateRequest {
            inputs: &framed,
            parameters: GenerateParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                return_full_text: false,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["parameters"]["max_new_tokens"], 250);
        assert_eq!(json["parameters"]["return_full_text"], false);
        assert!(json["inputs"].as_str().unwrap().contains("[INST]"));
    }

    #[test]
    fn parse_completion_trims_reply() {
        let body = r#"[{"generated_text": "  Hives are usually harmless.\n"}]"#;
        assert_eq!(
            parse_completion(body).unwrap(),
            "Hives are usually harmless."
        );
    }

    #[test]
    fn parse_completion_takes_first_of_many() {
        let body = r#"[{"generated_text": "first"}, {"generated_text": "second"}]"#;
        assert_eq!(parse_completion(body).unwrap(), "first");
    }

    #[test]
    fn empty_completion_list_is_an_error() {
        let err = parse_completion("[]").unwrap_err();
        assert!(matches!(err, ChatError::EmptyCompletion));
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let err = parse_completion(r#"{"error": "overloaded"}"#).unwrap_err();
        assert!(matches!(err, ChatError::Json(_)));
    }

    #[test]
    fn warming_model_maps_to_its_own_case() {
        let err = map_error_status(503, "model llama is currently loading".into());
        assert!(matches!(err, ChatError::ModelWarming));
    }

    #[test]
    fn other_failures_pass_through_status_and_body() {
        let err = map_error_status(429, "rate limited".into());
        match err {
            ChatError::Endpoint { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected Endpoint, got {other:?}"),
        }
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = ChatClient::new(
            "https://api.example.com/models/llama/".into(),
            "tok".into(),
        );
        assert_eq!(client.endpoint, "https://api.example.com/models/llama");
    }
}
