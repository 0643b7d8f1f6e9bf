use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Common backend envelope: `{ ok, data?, error? }`.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpsertPostRequest<'a> {
    pub course_id: i64,
    pub content: &'a str,
}
