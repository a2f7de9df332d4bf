//! HttpAnalysisService - REST implementation of the analysis collaborator.
//!
//! Sends `POST {base_url}/analyze` with `{"text": ...}` and expects
//! `{"emotion": ..., "confidence": ...}` back.
//! Configuration priority: CLI flags > environment variables > ~/.config/reflect/config.toml

use async_trait::async_trait;
use reflect_core::analysis::{
    AnalysisError, AnalysisResult, AnalysisService, SERVICE_FAILURE_MESSAGE,
};
use reflect_core::config::ClientConfig;
use reflect_core::error::ReflectError;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

/// Analysis collaborator that talks to the emotion service over HTTP.
#[derive(Clone, Debug)]
pub struct HttpAnalysisService {
    client: Client,
    endpoint: Url,
}

impl HttpAnalysisService {
    /// Creates a service for the endpoint described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ReflectError> {
        let endpoint = Url::parse(&config.analyze_url()).map_err(|err| {
            ReflectError::config(format!(
                "Invalid analysis URL '{}': {err}",
                config.analyze_url()
            ))
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ReflectError::internal(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send_request(&self, body: &AnalyzeRequest<'_>) -> Result<AnalysisResult, AnalysisError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(endpoint = %self.endpoint, error = %err, "Analysis request failed");
                AnalysisError::transport(format!("Analysis request failed: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Analysis service rejected request");
            return Err(map_http_error(status, &body_text));
        }

        let body_text = response.text().await.map_err(|err| {
            AnalysisError::transport(format!("Failed to read analysis response: {err}"))
        })?;
        parse_success_body(&body_text)
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let request = AnalyzeRequest { text };
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

fn parse_success_body(body: &str) -> Result<AnalysisResult, AnalysisError> {
    serde_json::from_str::<AnalysisResult>(body)
        .map_err(|err| AnalysisError::malformed(err.to_string()))
}

fn map_http_error(status: StatusCode, body: &str) -> AnalysisError {
    let message = extract_error_message(body).unwrap_or_else(|| SERVICE_FAILURE_MESSAGE.to_string());
    AnalysisError::service(status.as_u16(), message)
}

/// Pulls a readable message out of an error body.
///
/// Looks at `message` first, then `detail`. `detail` may be a plain string,
/// an object with its own `message`, or a list of validation entries with
/// `msg` fields.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    non_empty_str(object.get("message")).or_else(|| match object.get("detail")? {
        Value::String(detail) => non_empty(detail),
        Value::Object(detail) => non_empty_str(detail.get("message")),
        Value::Array(entries) => entries
            .iter()
            .find_map(|entry| non_empty_str(entry.get("msg"))),
        _ => None,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).and_then(non_empty)
}

fn non_empty(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}
