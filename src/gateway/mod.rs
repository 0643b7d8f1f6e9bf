pub mod dto;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;
use crate::models::{CourseRecord, GenerateSummary, TaskViewModel};

/// Longest body excerpt carried by a non-JSON failure.
pub const SNIPPET_CHARS: usize = 160;

/// Backend calls used by the today's-tasks console. Every method resolves to
/// the envelope's `data` or a single descriptive error; nothing is retried.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_today_tasks(&self, map_api_key: Option<&str>) -> Result<Vec<TaskViewModel>, AppError>;
    async fn generate_today(&self) -> Result<GenerateSummary, AppError>;
    async fn mark_sent(&self, task_id: i64) -> Result<(), AppError>;
    async fn upsert_post(&self, course_id: i64, content: &str) -> Result<(), AppError>;
    async fn fetch_course(&self, course_id: i64) -> Result<CourseRecord, AppError>;
    async fn update_course(&self, course: &CourseRecord) -> Result<(), AppError>;
}

pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: Url) -> Result<Self, AppError> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::BadRequest(format!("invalid backend base url: {}", base_url)));
        }
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::BadRequest(format!("invalid backend base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;
        debug!("backend answered {} ({} bytes)", status, body.len());
        decode_envelope(status, content_type.as_deref(), &body)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn fetch_today_tasks(&self, map_api_key: Option<&str>) -> Result<Vec<TaskViewModel>, AppError> {
        let mut url = self.endpoint(&["api", "tasks", "today"])?;
        if let Some(key) = map_api_key {
            url.query_pairs_mut().append_pair("map_api_key", key);
        }
        self.send(self.client.get(url)).await
    }

    async fn generate_today(&self) -> Result<GenerateSummary, AppError> {
        let url = self.endpoint(&["api", "tasks", "generate_today"])?;
        self.send(self.client.post(url)).await
    }

    async fn mark_sent(&self, task_id: i64) -> Result<(), AppError> {
        let task_id = task_id.to_string();
        let url = self.endpoint(&["api", "tasks", task_id.as_str(), "mark_sent"])?;
        self.send::<IgnoredAny>(self.client.post(url)).await?;
        Ok(())
    }

    async fn upsert_post(&self, course_id: i64, content: &str) -> Result<(), AppError> {
        let url = self.endpoint(&["api", "tasks", "upsert_post"])?;
        let body = dto::UpsertPostRequest { course_id, content };
        self.send::<IgnoredAny>(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    async fn fetch_course(&self, course_id: i64) -> Result<CourseRecord, AppError> {
        let course_id = course_id.to_string();
        let url = self.endpoint(&["api", "course", course_id.as_str()])?;
        self.send(self.client.get(url)).await
    }

    async fn update_course(&self, course: &CourseRecord) -> Result<(), AppError> {
        let url = self.endpoint(&["api", "course", "update"])?;
        self.send::<IgnoredAny>(self.client.post(url).json(course)).await?;
        Ok(())
    }
}

/// Turn a raw backend response into the envelope's `data`.
///
/// A body that is not declared as JSON fails with the status and a short
/// excerpt. A non-OK status or `ok: false` fails with the server's `error`
/// message, or a generic one naming the status.
pub fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    content_type: Option<&str>,
    body: &str,
) -> Result<T, AppError> {
    let is_json = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("json"))
        .unwrap_or(false);
    if !is_json {
        return Err(AppError::NonJson {
            status: status.as_u16(),
            snippet: body_snippet(body),
        });
    }

    let fallback = || AppError::Api(format!("request failed (HTTP {})", status.as_u16()));
    let envelope: dto::Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => return Err(fallback()),
        Err(e) => return Err(AppError::Decode(e)),
    };

    if !status.is_success() || !envelope.ok {
        return Err(envelope
            .error
            .filter(|msg| !msg.trim().is_empty())
            .map(AppError::Api)
            .unwrap_or_else(fallback));
    }

    Ok(serde_json::from_value(envelope.data.unwrap_or(Value::Null))?)
}

pub fn body_snippet(body: &str) -> String {
    body.trim().chars().take(SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_error_page_is_reported_with_status_and_excerpt() {
        let body = format!("<html>{}</html>", "x".repeat(400));
        let err = decode_envelope::<Value>(StatusCode::INTERNAL_SERVER_ERROR, Some("text/html"), &body)
            .unwrap_err();
        match &err {
            AppError::NonJson { status, snippet } => {
                assert_eq!(*status, 500);
                assert_eq!(snippet.chars().count(), SNIPPET_CHARS);
                assert!(snippet.starts_with("<html>"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn snippet_never_splits_multibyte_chars() {
        let body = "错".repeat(200);
        assert_eq!(body_snippet(&body).chars().count(), SNIPPET_CHARS);
    }

    #[test]
    fn ok_false_uses_server_message() {
        let err = decode_envelope::<Value>(
            StatusCode::OK,
            Some("application/json"),
            r#"{"ok": false, "error": "course not found"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "course not found");
    }

    #[test]
    fn non_ok_status_without_message_falls_back() {
        let err = decode_envelope::<Value>(
            StatusCode::BAD_GATEWAY,
            Some("application/json; charset=utf-8"),
            r#"{"detail": "upstream"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "request failed (HTTP 502)");
    }

    #[test]
    fn missing_data_is_accepted_for_ignored_payloads() {
        decode_envelope::<IgnoredAny>(StatusCode::OK, Some("application/json"), r#"{"ok": true}"#)
            .expect("ok envelope without data");
    }

    #[test]
    fn data_is_decoded_into_target_type() {
        let summary: GenerateSummary = decode_envelope(
            StatusCode::OK,
            Some("application/json"),
            r#"{"ok": true, "data": {"generated": 2, "skipped": 1}}"#,
        )
        .unwrap();
        assert_eq!(summary, GenerateSummary { generated: 2, skipped: 1 });
    }
}
