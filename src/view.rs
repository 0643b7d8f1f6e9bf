use crate::error::AppError;
use crate::models::{CourseEdit, TaskField};
use crate::render::{Element, Node};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: false }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_error: true }
    }
}

/// Named handles of the console page. The mounted task list is the live
/// document: operator edits are written into it and operations read field
/// values back out of it when they run.
#[derive(Debug, Default)]
pub struct ViewContext {
    task_list: Option<Node>,
    generate_result: Option<Notice>,
    alerts: Vec<String>,
}

impl ViewContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// `false` until the first mount, so an empty list can be told apart from
    /// one that was never fetched.
    pub fn is_loaded(&self) -> bool {
        self.task_list.is_some()
    }

    pub fn task_list(&self) -> Option<&Node> {
        self.task_list.as_ref()
    }

    /// Replaces the whole list area. Whatever was mounted last is what the
    /// operator sees.
    pub fn mount_task_list(&mut self, node: Node) {
        self.task_list = Some(node);
    }

    pub fn generate_result(&self) -> Option<&Notice> {
        self.generate_result.as_ref()
    }

    pub fn show_generate_result(&mut self, notice: Notice) {
        self.generate_result = Some(notice);
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Course ids of the mounted panels, in display order.
    pub fn course_ids(&self) -> Vec<i64> {
        let Some(list) = self.root() else {
            return Vec::new();
        };
        list.children
            .iter()
            .filter_map(Node::as_element)
            .filter(|e| is_panel(e))
            .filter_map(|e| e.get_attr("data-course-id")?.parse().ok())
            .collect()
    }

    pub fn task_id(&self, course_id: i64) -> Result<Option<i64>, AppError> {
        let key = course_id.to_string();
        let panel = self
            .root()
            .and_then(|list| list.find(&|e| is_panel(e) && e.get_attr("data-course-id") == Some(key.as_str())))
            .ok_or(AppError::NotFound)?;
        Ok(panel.get_attr("data-task-id").and_then(|id| id.parse().ok()))
    }

    pub fn field(&self, course_id: i64, field: TaskField) -> Option<String> {
        let key = course_id.to_string();
        let input = self.root()?.find(&|e| is_field(e, &key, field))?;
        Some(read_input(input))
    }

    pub fn set_field(&mut self, course_id: i64, field: TaskField, value: &str) -> Result<(), AppError> {
        let key = course_id.to_string();
        let input = self
            .task_list
            .as_mut()
            .and_then(Node::as_element_mut)
            .and_then(|list| list.find_mut(&|e| is_field(e, &key, field)))
            .ok_or(AppError::NotFound)?;
        write_input(input, value);
        Ok(())
    }

    pub fn course_edit(&self, course_id: i64) -> Result<CourseEdit, AppError> {
        let read = |field| self.field(course_id, field).ok_or(AppError::NotFound);
        Ok(CourseEdit {
            title: read(TaskField::Title)?,
            teacher: read(TaskField::Teacher)?,
            location: read(TaskField::Location)?,
            start_at: read(TaskField::StartAt)?,
            end_at: read(TaskField::EndAt)?,
        })
    }

    fn root(&self) -> Option<&Element> {
        self.task_list.as_ref().and_then(Node::as_element)
    }
}

fn is_panel(e: &Element) -> bool {
    e.tag == "section" && e.get_attr("data-course-id").is_some()
}

fn is_field(e: &Element, course_key: &str, field: TaskField) -> bool {
    e.get_attr("data-field") == Some(field.as_str()) && e.get_attr("data-course-id") == Some(course_key)
}

fn read_input(input: &Element) -> String {
    if input.tag == "textarea" {
        input.text_content()
    } else {
        input.get_attr("value").unwrap_or_default().to_string()
    }
}

fn write_input(input: &mut Element, value: &str) {
    if input.tag == "textarea" {
        input.children = vec![Node::Text(value.to_string())];
    } else {
        input.set_attr("value", value);
    }
}
