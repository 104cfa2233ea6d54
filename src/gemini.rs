use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::chat::Role;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-2.5-flash";
const TEMPERATURE: f32 = 0.7;

/// Returned when the service answers but produces no text.
const EMPTY_REPLY: &str = "I'm sorry, I couldn't generate a response.";

/// The single user-facing error. Every underlying cause (network,
/// bad credential, malformed response, service error) collapses into
/// this string; detail goes to the log only.
pub const UNAVAILABLE_REPLY: &str = "I'm currently experiencing high traffic or a \
    connection issue. Please try again later or email me directly.";

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: SystemInstruction,
    generation_config: GenerationConfig,
    contents: Vec<Content>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Thin handle over the Gemini REST API, built once at startup with
/// the credential and the fixed system instruction. Clones share the
/// underlying connection pool, so the dispatch task can take one.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    system_instruction: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, system_instruction: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, system_instruction)
    }

    pub fn with_base_url(base_url: &str, api_key: &str, system_instruction: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            system_instruction: system_instruction.to_string(),
        }
    }

    /// The dispatch boundary. Never errors out: failures are logged
    /// and turned into the fixed apology string so the widget always
    /// gets a model entry back.
    pub async fn send_message(&self, message: &str, history: &[(Role, String)]) -> String {
        match self.generate(message, history).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!("assistant request failed: {err:#}");
                UNAVAILABLE_REPLY.to_string()
            }
        }
    }

    async fn generate(&self, message: &str, history: &[(Role, String)]) -> Result<String> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|(role, text)| Content {
                role: role.as_str().to_string(),
                parts: vec![Part { text: text.clone() }],
            })
            .collect();
        contents.push(Content {
            role: Role::User.as_str().to_string(),
            parts: vec![Part {
                text: message.to_string(),
            }],
        });

        let request = GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: self.system_instruction.clone(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
            contents,
        };

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, MODEL);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error {}: {}", status, body));
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.clone())
            .unwrap_or_default();

        if text.is_empty() {
            Ok(EMPTY_REPLY.to_string())
        } else {
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::ServerGuard) -> GeminiClient {
        GeminiClient::with_base_url(&server.url(), "test-key", "You are a resume assistant.")
    }

    #[tokio::test]
    async fn sends_history_instruction_and_temperature() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "systemInstruction": {
                    "parts": [{"text": "You are a resume assistant."}]
                },
                "generationConfig": {"temperature": 0.7},
                "contents": [
                    {"role": "model", "parts": [{"text": "Hello, ask me anything."}]},
                    {"role": "user", "parts": [{"text": "Earlier question"}]},
                    {"role": "user", "parts": [{"text": "What are your skills?"}]}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"I know React and TypeScript."}]}}]}"#,
            )
            .create_async()
            .await;

        let history = vec![
            (Role::Model, "Hello, ask me anything.".to_string()),
            (Role::User, "Earlier question".to_string()),
        ];
        let reply = client(&server)
            .send_message("What are your skills?", &history)
            .await;

        mock.assert_async().await;
        assert_eq!(reply, "I know React and TypeScript.");
    }

    #[tokio::test]
    async fn empty_candidates_fall_back_to_fixed_reply() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let reply = client(&server).send_message("Hello?", &[]).await;
        assert_eq!(reply, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn blank_text_falls_back_to_fixed_reply() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#)
            .create_async()
            .await;

        let reply = client(&server).send_message("Hello?", &[]).await;
        assert_eq!(reply, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn service_error_collapses_to_apology() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let reply = client(&server).send_message("Hello?", &[]).await;
        assert_eq!(reply, UNAVAILABLE_REPLY);
    }

    #[tokio::test]
    async fn connection_failure_collapses_to_apology() {
        // Nothing is listening here.
        let client =
            GeminiClient::with_base_url("http://127.0.0.1:1", "test-key", "instruction");
        let reply = client.send_message("Hello?", &[]).await;
        assert_eq!(reply, UNAVAILABLE_REPLY);
    }

    #[tokio::test]
    async fn malformed_body_collapses_to_apology() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let reply = client(&server).send_message("Hello?", &[]).await;
        assert_eq!(reply, UNAVAILABLE_REPLY);
    }
}
