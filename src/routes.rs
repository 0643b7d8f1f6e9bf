use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use chrono::Local;
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::models::TaskField;
use crate::state::AppState;

/// Panel inputs as posted by the browser. Only fields present in the form
/// are written back into the view.
#[derive(Debug, Default, Deserialize)]
pub struct PanelForm {
    pub content: Option<String>,
    pub title: Option<String>,
    pub teacher: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub location: Option<String>,
}

impl PanelForm {
    /// Browsers post textarea line breaks as CRLF; the view holds LF only.
    pub fn edits(mut self) -> Vec<(TaskField, String)> {
        TaskField::ALL
            .into_iter()
            .filter_map(|field| self.take(field).map(|v| (field, normalize_newlines(&v))))
            .collect()
    }

    fn take(&mut self, field: TaskField) -> Option<String> {
        match field {
            TaskField::Content => self.content.take(),
            TaskField::Title => self.title.take(),
            TaskField::Teacher => self.teacher.take(),
            TaskField::StartAt => self.start_at.take(),
            TaskField::EndAt => self.end_at.take(),
            TaskField::Location => self.location.take(),
        }
    }
}

fn normalize_newlines(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}

#[derive(Debug, Clone, Copy)]
enum PanelAction {
    SaveCourse,
    SaveContent,
    AppendMap,
    MarkSent,
}

impl PanelAction {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "save_course" => Some(Self::SaveCourse),
            "save_content" => Some(Self::SaveContent),
            "append_map" => Some(Self::AppendMap),
            "mark_sent" => Some(Self::MarkSent),
            _ => None,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(index))
        .route("/tasks/refresh", post(refresh))
        .route("/tasks/generate_today", post(generate_today))
        .route("/tasks/{course_id}/{action}", post(panel_action))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn index(State(state): State<AppState>) -> Html<String> {
    if !state.board.is_loaded() {
        if let Err(e) = state.board.refresh().await {
            debug!("initial load failed: {}", e);
        }
    }
    Html(state.board.render_page(Local::now().date_naive()).to_document())
}

async fn refresh(State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.board.refresh().await {
        debug!("refresh failed: {}", e);
    }
    Redirect::to("/")
}

async fn generate_today(State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.board.generate_today().await {
        debug!("generate today failed: {}", e);
    }
    Redirect::to("/")
}

async fn panel_action(
    State(state): State<AppState>,
    Path((course_id, action)): Path<(i64, String)>,
    Form(form): Form<PanelForm>,
) -> Result<Redirect, AppError> {
    let action = PanelAction::parse(&action).ok_or(AppError::NotFound)?;
    let board = &state.board;

    if board.apply_edits(course_id, &form.edits()).is_err() {
        return Ok(Redirect::to("/"));
    }

    let outcome = match action {
        PanelAction::SaveCourse => board.save_course_fields(course_id).await,
        PanelAction::SaveContent => board.save_task_content(course_id).await,
        PanelAction::AppendMap => board.append_map_to_content(course_id),
        PanelAction::MarkSent => board.mark_sent(course_id).await,
    };
    if let Err(e) = outcome {
        debug!("{:?} on course {} failed: {}", action, course_id, e);
    }

    Ok(Redirect::to("/"))
}
