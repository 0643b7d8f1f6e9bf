use reqwest::Url;

use super::{Element, Node, el};
use crate::error::AppError;
use crate::models::{TaskField, TaskStatus, TaskViewModel};

pub const TASK_LIST_ID: &str = "task-list";
const MAP_SEARCH_BASE: &str = "https://uri.amap.com/search";

/// Survey fill ratio as a percentage with one decimal, or `--` when nobody
/// is enrolled.
pub fn fill_ratio(submitted: u64, total: u64) -> String {
    if total == 0 {
        return "--".to_string();
    }
    format!("{:.1}%", submitted as f64 * 100.0 / total as f64)
}

pub fn map_search_url(location: &str) -> Result<String, AppError> {
    let url = Url::parse_with_params(MAP_SEARCH_BASE, &[("keyword", location.trim())])
        .map_err(|e| AppError::BadRequest(format!("Failed to build map url: {}", e)))?;
    Ok(url.to_string())
}

pub fn field_input_id(course_id: i64, field: TaskField) -> String {
    format!("task-{}-{}", field.as_str().replace('_', "-"), course_id)
}

pub fn action_path(course_id: i64, action: &str) -> String {
    format!("/tasks/{}/{}", course_id, action)
}

/// Renders the list area. Server order is kept as-is.
pub fn render_task_list(tasks: &[TaskViewModel]) -> Node {
    let list = el("div").attr("id", TASK_LIST_ID);
    if tasks.is_empty() {
        return list
            .child(el("p").class("empty").text("No tasks for today or the coming days."))
            .into();
    }
    list.children(tasks.iter().map(render_task)).into()
}

pub fn render_list_error(message: &str) -> Node {
    el("div")
        .attr("id", TASK_LIST_ID)
        .child(el("p").class("error").text(format!("Failed to load tasks: {}", message)))
        .into()
}

pub fn render_task(task: &TaskViewModel) -> Node {
    let mut panel = el("section")
        .class("task-panel")
        .attr("data-course-id", task.course_id.to_string());
    if let Some(task_id) = task.task_id {
        panel = panel.attr("data-task-id", task_id.to_string());
    }
    panel
        .child(render_summary(task))
        .child(render_editor(task))
        .into()
}

fn render_summary(task: &TaskViewModel) -> Element {
    let title = if task.course_title.is_empty() {
        "(untitled course)"
    } else {
        task.course_title.as_str()
    };

    let mut survey = el("p").class("survey").text(format!(
        "Survey: {}/{} ({})",
        task.survey_submitted_count,
        task.enrollment_total_count,
        fill_ratio(task.survey_submitted_count, task.enrollment_total_count),
    ));
    if let Some(link) = task.survey_link.as_deref().filter(|l| !l.is_empty()) {
        survey = survey
            .text(" ")
            .child(el("a").attr("href", link).attr("target", "_blank").text("survey link"));
    }

    el("div")
        .class("task-summary")
        .child(el("h3").text(title))
        .child(el("p").text(format!("Teacher: {}", task.course_teacher)))
        .child(el("p").text(format!("Time: {} ~ {}", task.start_at, task.end_at)))
        .child(el("p").text("Status: ").child(status_badge(task.status)))
        .child(survey)
        .child(render_geo(task))
}

fn status_badge(status: TaskStatus) -> Element {
    el("span")
        .class(&format!("status status-{}", status.label()))
        .text(status.label())
}

fn render_geo(task: &TaskViewModel) -> Element {
    let address = task
        .geo
        .as_ref()
        .and_then(|g| g.formatted_address.as_deref())
        .filter(|a| !a.is_empty());
    let map_url = task.map_url.as_deref().filter(|u| !u.is_empty());

    if address.is_none() && map_url.is_none() {
        return el("p")
            .class("geo degraded")
            .text("Map location unavailable; geocoding returned nothing for this course.");
    }

    let mut geo = el("p").class("geo").text(format!("Address: {}", address.unwrap_or("--")));
    if let Some(url) = map_url {
        geo = geo
            .text(" ")
            .child(el("a").attr("href", url).attr("target", "_blank").text("open map"));
    }
    geo
}

fn render_editor(task: &TaskViewModel) -> Element {
    let course_id = task.course_id;
    let mut mark_sent = action_button(course_id, "mark_sent", "Mark sent");
    if task.task_id.is_none() {
        mark_sent = mark_sent
            .attr("data-inert", "true")
            .attr("title", "No task has been generated for this course yet");
    }

    el("form")
        .class("task-edit")
        .attr("method", "post")
        .attr("action", action_path(course_id, "save_content"))
        .child(labelled("Content", field_input(task, TaskField::Content)))
        .child(labelled("Title", field_input(task, TaskField::Title)))
        .child(labelled("Teacher", field_input(task, TaskField::Teacher)))
        .child(labelled("Start", field_input(task, TaskField::StartAt)))
        .child(labelled("End", field_input(task, TaskField::EndAt)))
        .child(labelled("Location", field_input(task, TaskField::Location)))
        .child(
            el("div")
                .class("task-actions")
                .child(action_button(course_id, "save_course", "Save course"))
                .child(action_button(course_id, "save_content", "Save content"))
                .child(action_button(course_id, "append_map", "Add map to text"))
                .child(mark_sent),
        )
}

fn labelled(label: &str, input: Element) -> Element {
    el("label").text(label).child(input)
}

fn field_input(task: &TaskViewModel, field: TaskField) -> Element {
    let value = task.field_value(field);
    let input = match field {
        TaskField::Content => el("textarea").attr("rows", "6").text(value),
        _ => el("input").attr("type", "text").attr("value", value),
    };
    input
        .attr("id", field_input_id(task.course_id, field))
        .attr("name", field.as_str())
        .attr("data-course-id", task.course_id.to_string())
        .attr("data-field", field.as_str())
}

fn action_button(course_id: i64, action: &str, label: &str) -> Element {
    el("button")
        .attr("type", "submit")
        .attr("formaction", action_path(course_id, action))
        .attr("data-action", action)
        .text(label)
}
