//! Text generation adapter: TextGenerator over an HTTP inference endpoint.
//!
//! Speaks the hosted text-generation protocol:
//!
//! ```text
//! POST {endpoint}/{model_id}
//! {"inputs": "...", "parameters": {"max_length": 100, "pad_token_id": 50256}}
//!
//! 200 [{"generated_text": "..."}]
//! 4xx/5xx {"error": "..."}
//! ```
//!
//! Calls are blocking with no timeout and no retry.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::ports::{GenerationError, TextGenerator, MAX_LENGTH, PAD_TOKEN_ID};

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_length: u32,
    pad_token_id: u32,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Candidates(Vec<Candidate>),
    Failure { error: String },
}

/// HTTP client for a remote text-generation model.
pub struct HttpTextGenerator {
    client: reqwest::blocking::Client,
    url: String,
    model_id: String,
    token: Option<Zeroizing<String>>,
}

impl HttpTextGenerator {
    /// Build a client for `model_id` served under `endpoint`.
    ///
    /// # Errors
    /// Returns `GenerationError::Transport` if the HTTP client cannot be built.
    pub fn new(
        endpoint: &str,
        model_id: &str,
        token: Option<String>,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        tracing::info!(
            "Text generation client for {} (auth: {})",
            model_id,
            if token.is_some() { "token" } else { "none" }
        );

        Ok(Self {
            client,
            url: request_url(endpoint, model_id),
            model_id: model_id.to_string(),
            token: token.map(Zeroizing::new),
        })
    }
}

impl std::fmt::Debug for HttpTextGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTextGenerator")
            .field("url", &self.url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl TextGenerator for HttpTextGenerator {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = request_body(prompt);

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request
            .send()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        tracing::debug!("Generation response: status={}, {} bytes", status, text.len());
        parse_response(status, &text)
    }
}

fn request_url(endpoint: &str, model_id: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        model_id.trim_start_matches('/')
    )
}

fn request_body(prompt: &str) -> GenerationRequest<'_> {
    GenerationRequest {
        inputs: prompt,
        parameters: GenerationParameters {
            max_length: MAX_LENGTH,
            pad_token_id: PAD_TOKEN_ID,
        },
    }
}

/// Map a raw HTTP status and body to the first generated text.
fn parse_response(status: u16, body: &str) -> Result<String, GenerationError> {
    let parsed: Result<GenerationResponse, _> = serde_json::from_str(body);

    if !(200..300).contains(&status) {
        let message = match parsed {
            Ok(GenerationResponse::Failure { error }) => error,
            _ => body.chars().take(200).collect(),
        };
        return Err(GenerationError::Service { status, message });
    }

    match parsed {
        Ok(GenerationResponse::Candidates(candidates)) => candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or(GenerationError::EmptyResponse),
        Ok(GenerationResponse::Failure { error }) => {
            Err(GenerationError::Service { status, message: error })
        }
        Err(e) => Err(GenerationError::Malformed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_joins_cleanly() {
        assert_eq!(
            request_url("https://host/models/", "microsoft/DialoGPT-medium"),
            "https://host/models/microsoft/DialoGPT-medium"
        );
        assert_eq!(request_url("http://localhost:8080", "/m"), "http://localhost:8080/m");
    }

    #[test]
    fn test_request_body_carries_fixed_parameters() {
        let body = serde_json::to_value(request_body("hello there")).expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({
                "inputs": "hello there",
                "parameters": {"max_length": 100, "pad_token_id": 50256}
            })
        );
    }

    #[test]
    fn test_parse_first_candidate() {
        let body = r#"[{"generated_text": "hi there! how are you?"}, {"generated_text": "other"}]"#;
        assert_eq!(
            parse_response(200, body).expect("parse"),
            "hi there! how are you?"
        );
    }

    #[test]
    fn test_parse_empty_candidates() {
        assert_eq!(parse_response(200, "[]"), Err(GenerationError::EmptyResponse));
    }

    #[test]
    fn test_parse_service_error() {
        let body = r#"{"error": "Model is currently loading", "estimated_time": 20.0}"#;
        assert_eq!(
            parse_response(503, body),
            Err(GenerationError::Service {
                status: 503,
                message: "Model is currently loading".to_string()
            })
        );
    }

    #[test]
    fn test_parse_error_body_with_success_status() {
        assert!(matches!(
            parse_response(200, r#"{"error": "bad input"}"#),
            Err(GenerationError::Service { status: 200, .. })
        ));
    }

    #[test]
    fn test_parse_non_json_failure() {
        assert!(matches!(
            parse_response(502, "<html>Bad Gateway</html>"),
            Err(GenerationError::Service { status: 502, message }) if message.contains("Bad Gateway")
        ));
        assert!(matches!(
            parse_response(200, "not json"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let generator = HttpTextGenerator::new(
            "http://localhost:1",
            "m",
            Some("hf_secretsecretsecret".to_string()),
        )
        .expect("client");
        let debug = format!("{generator:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("has_token"));
        assert_eq!(generator.model_id(), "m");
    }
}
