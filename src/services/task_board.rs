use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::AppError;
use crate::gateway::Gateway;
use crate::models::{CourseEdit, GenerateSummary, TaskField};
use crate::render::{self, Node, map_search_url, render_list_error, render_task_list};
use crate::view::{Notice, ViewContext};

/// Drives the today's-tasks panel: reads inline fields out of the mounted
/// view, sends them to the backend and redraws the whole list afterwards.
///
/// There is no per-course locking. Two operations fired back to back both
/// run, and the list shows whichever refresh finished last.
pub struct TaskBoard {
    gateway: Arc<dyn Gateway>,
    map_api_key: Option<String>,
    view: Mutex<ViewContext>,
}

impl TaskBoard {
    pub fn new(gateway: Arc<dyn Gateway>, map_api_key: Option<String>) -> Self {
        Self {
            gateway,
            map_api_key,
            view: Mutex::new(ViewContext::new()),
        }
    }

    /// Direct access to the mounted view, for inspection in tests and tools.
    pub fn with_view<R>(&self, f: impl FnOnce(&mut ViewContext) -> R) -> R {
        let mut view = self.view.lock();
        f(&mut *view)
    }

    pub fn is_loaded(&self) -> bool {
        self.view.lock().is_loaded()
    }

    /// Renders the console and drains pending alerts.
    pub fn render_page(&self, today: NaiveDate) -> Node {
        let mut view = self.view.lock();
        let alerts = view.take_alerts();
        render::render_page(today, &view, &alerts)
    }

    pub async fn refresh(&self) -> Result<(), AppError> {
        match self.gateway.fetch_today_tasks(self.map_api_key.as_deref()).await {
            Ok(tasks) => {
                info!("mounting {} task panels", tasks.len());
                self.view.lock().mount_task_list(render_task_list(&tasks));
                Ok(())
            }
            Err(e) => {
                warn!("failed to load today's tasks: {}", e);
                self.view.lock().mount_task_list(render_list_error(&e.to_string()));
                Err(e)
            }
        }
    }

    pub async fn generate_today(&self) -> Result<GenerateSummary, AppError> {
        let summary = match self.gateway.generate_today().await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("generate today failed: {}", e);
                self.view.lock().show_generate_result(Notice::error(e.to_string()));
                return Err(e);
            }
        };
        info!("generated {} tasks, skipped {}", summary.generated, summary.skipped);
        self.view.lock().show_generate_result(Notice::info(format!(
            "Generated {} tasks, skipped {}.",
            summary.generated, summary.skipped
        )));
        self.refresh().await?;
        Ok(summary)
    }

    /// Writes operator-submitted values into the mounted panel so the
    /// operation that follows reads them back like any other field.
    pub fn apply_edits(&self, course_id: i64, edits: &[(TaskField, String)]) -> Result<(), AppError> {
        let result = {
            let mut view = self.view.lock();
            edits
                .iter()
                .try_for_each(|(field, value)| view.set_field(course_id, *field, value))
        };
        self.report(result.map_err(|e| match e {
            AppError::NotFound => AppError::Validation(format!(
                "Course {} is no longer on the list; refresh and try again",
                course_id
            )),
            other => other,
        }))
    }

    pub async fn save_course_fields(&self, course_id: i64) -> Result<(), AppError> {
        let result = self.try_save_course_fields(course_id).await;
        self.report(result)
    }

    pub async fn save_task_content(&self, course_id: i64) -> Result<(), AppError> {
        let result = self.try_save_task_content(course_id).await;
        self.report(result)
    }

    /// Local only: appends a location block with a map-search link to the
    /// content field, unless that link is already in the text.
    pub fn append_map_to_content(&self, course_id: i64) -> Result<(), AppError> {
        let result = append_map(&mut self.view.lock(), course_id);
        self.report(result)
    }

    pub async fn mark_sent(&self, course_id: i64) -> Result<(), AppError> {
        let result = self.try_mark_sent(course_id).await;
        self.report(result)
    }

    async fn try_save_course_fields(&self, course_id: i64) -> Result<(), AppError> {
        let edit = self.view.lock().course_edit(course_id)?;
        let edit = CourseEdit {
            title: edit.title.trim().to_string(),
            teacher: edit.teacher.trim().to_string(),
            location: edit.location.trim().to_string(),
            start_at: edit.start_at.trim().to_string(),
            end_at: edit.end_at.trim().to_string(),
        };
        if edit.title.is_empty() {
            return Err(AppError::Validation("Course title is required".to_string()));
        }

        // The panel does not carry the session binding; start from the stored
        // record so update keeps it.
        let mut course = self.gateway.fetch_course(course_id).await?;
        course.apply(edit);
        self.gateway.update_course(&course).await?;
        info!("course {} updated", course_id);

        self.refresh().await
    }

    async fn try_save_task_content(&self, course_id: i64) -> Result<(), AppError> {
        let content = self
            .view
            .lock()
            .field(course_id, TaskField::Content)
            .ok_or(AppError::NotFound)?;
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Task content is required".to_string()));
        }

        self.gateway.upsert_post(course_id, content).await?;
        info!("task content saved for course {}", course_id);

        self.refresh().await
    }

    async fn try_mark_sent(&self, course_id: i64) -> Result<(), AppError> {
        let task_id = self.view.lock().task_id(course_id)?;
        let Some(task_id) = task_id else {
            return Err(AppError::Validation(
                "No task exists for this course yet; save its content or generate today's tasks first"
                    .to_string(),
            ));
        };

        self.gateway.mark_sent(task_id).await?;
        info!("task {} marked sent", task_id);

        self.refresh().await
    }

    fn report<T>(&self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(e) = &result {
            warn!("task operation failed: {}", e);
            self.view.lock().alert(e.to_string());
        }
        result
    }
}

fn append_map(view: &mut ViewContext, course_id: i64) -> Result<(), AppError> {
    let location = view
        .field(course_id, TaskField::Location)
        .ok_or(AppError::NotFound)?;
    let location = location.trim();
    if location.is_empty() {
        return Err(AppError::Validation(
            "Fill in the course location before adding a map link".to_string(),
        ));
    }

    let url = map_search_url(location)?;
    let content = view
        .field(course_id, TaskField::Content)
        .ok_or(AppError::NotFound)?;
    if content.contains(&url) {
        return Ok(());
    }
    view.set_field(course_id, TaskField::Content, &append_map_block(&content, location, &url))
}

pub fn append_map_block(content: &str, location: &str, url: &str) -> String {
    let mut out = content.trim_end().to_string();
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("Location: {}\nMap: {}", location, url));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_block_goes_on_its_own_lines() {
        let out = append_map_block("Class starts at 9.\n\n", "Room 301", "https://example.test/m");
        assert_eq!(out, "Class starts at 9.\nLocation: Room 301\nMap: https://example.test/m");
    }

    #[test]
    fn map_block_into_empty_content() {
        assert_eq!(
            append_map_block("", "Hall A", "https://example.test/m"),
            "Location: Hall A\nMap: https://example.test/m"
        );
    }
}
