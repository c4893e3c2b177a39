use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::error::AnalyzeError;
use crate::config::GeminiConfig;

pub const ANALYSIS_PROMPT: &str = "You are a food analysis expert. Analyze this food image and provide nutritional information. Return ONLY a JSON object in this exact format, with no additional text: { \"name\": \"food name\", \"calories\": number, \"macros\": { \"protein\": number, \"carbs\": number, \"fat\": number } }";

/// Multimodal model that describes a food photo as text.
#[async_trait]
pub trait NutritionAnalyzer: Send + Sync {
    /// Returns the model's raw text answer for the image.
    async fn describe(&self, image: &[u8], mime_type: &str) -> Result<String, AnalyzeError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(cfg: &GeminiConfig) -> anyhow::Result<Self> {
        if cfg.api_key.is_empty() {
            anyhow::bail!("Google AI API key cannot be empty");
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl NutritionAnalyzer for GeminiClient {
    async fn describe(&self, image: &[u8], mime_type: &str) -> Result<String, AnalyzeError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: STANDARD.encode(image),
                        },
                    },
                ],
            }],
        };

        debug!(model = %self.model, bytes = image.len(), %mime_type, "sending image to gemini");
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            error!(status = %status, body = %detail, "gemini request failed");
            return Err(AnalyzeError::UpstreamStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|_| AnalyzeError::InvalidResponse)?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(AnalyzeError::InvalidResponse)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> GeminiClient {
        GeminiClient::new(&GeminiConfig {
            api_key: "test-key".into(),
            model: "gemini-1.5-flash".into(),
            base_url: server.url(),
        })
        .expect("client")
    }

    const PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    #[tokio::test]
    async fn returns_first_candidate_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_query(Matcher::Missing)
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#""inline_data":\{"mime_type":"image/png","data":"AQID"\}"#.into()),
                Matcher::Regex("You are a food analysis expert".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"{\"name\":\"toast\"}"}],"role":"model"},"finishReason":"STOP"}]}"#,
            )
            .create_async()
            .await;

        let text = client_for(&server)
            .describe(&[1, 2, 3], "image/png")
            .await
            .expect("describe");
        assert_eq!(text, r#"{"name":"toast"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let err = client_for(&server)
            .describe(b"img", "image/jpeg")
            .await
            .unwrap_err();
        match err {
            AnalyzeError::UpstreamStatus { status, .. } => assert_eq!(status, 503),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_text_is_invalid_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[]}}]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .describe(b"img", "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidResponse));
    }

    #[tokio::test]
    async fn transport_errors_do_not_carry_the_key() {
        let client = GeminiClient::new(&GeminiConfig {
            api_key: "SECRET-GOOGLE-KEY".into(),
            model: "gemini-1.5-flash".into(),
            base_url: "http://127.0.0.1:9".into(),
        })
        .expect("client");

        let err = client.describe(b"img", "image/jpeg").await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Transport(_)), "{err:?}");
        assert!(!err.to_string().contains("SECRET-GOOGLE-KEY"), "{err}");
        assert!(!format!("{err:?}").contains("SECRET-GOOGLE-KEY"));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = GeminiClient::new(&GeminiConfig {
            api_key: String::new(),
            model: "m".into(),
            base_url: "http://localhost".into(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("API key"));
    }
}
