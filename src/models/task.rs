use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Sent,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Sent => "sent",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoInfo {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
}

/// One entry of `GET /api/tasks/today`: a course scheduled for today or the
/// next few days, joined with its outreach task when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskViewModel {
    /// Absent until the backend materializes a task row for this course.
    #[serde(default)]
    pub task_id: Option<i64>,
    pub course_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_teacher: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TaskStatus,
    #[serde(default)]
    pub survey_link: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub survey_submitted_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enrollment_total_count: u64,
    #[serde(default)]
    pub geo: Option<GeoInfo>,
    #[serde(default)]
    pub map_url: Option<String>,
}

/// Editable inputs of a task panel. Every input is keyed by course id plus
/// one of these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Content,
    Title,
    Teacher,
    StartAt,
    EndAt,
    Location,
}

impl TaskField {
    pub const ALL: [TaskField; 6] = [
        TaskField::Content,
        TaskField::Title,
        TaskField::Teacher,
        TaskField::StartAt,
        TaskField::EndAt,
        TaskField::Location,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskField::Content => "content",
            TaskField::Title => "title",
            TaskField::Teacher => "teacher",
            TaskField::StartAt => "start_at",
            TaskField::EndAt => "end_at",
            TaskField::Location => "location",
        }
    }
}

impl TaskViewModel {
    pub fn field_value(&self, field: TaskField) -> &str {
        match field {
            TaskField::Content => &self.content,
            TaskField::Title => &self.course_title,
            TaskField::Teacher => &self.course_teacher,
            TaskField::StartAt => &self.start_at,
            TaskField::EndAt => &self.end_at,
            TaskField::Location => &self.course_location,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateSummary {
    #[serde(default)]
    pub generated: u64,
    #[serde(default)]
    pub skipped: u64,
}
