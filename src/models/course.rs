use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;

/// Course row as returned by `GET /api/course/{id}` and accepted by
/// `POST /api/course/update`. Columns this console does not edit are kept in
/// `extra` so a resubmitted record carries them back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_id: i64,
    #[serde(default)]
    pub session_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The inline course fields of one panel, as read back from the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseEdit {
    pub title: String,
    pub teacher: String,
    pub location: String,
    pub start_at: String,
    pub end_at: String,
}

impl CourseRecord {
    pub fn apply(&mut self, edit: CourseEdit) {
        self.title = edit.title;
        self.teacher = edit.teacher;
        self.location = edit.location;
        self.start_at = edit.start_at;
        self.end_at = edit.end_at;
    }
}
