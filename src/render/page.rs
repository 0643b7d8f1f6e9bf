use chrono::NaiveDate;

use super::{Element, Node, el};
use crate::view::{Notice, ViewContext};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;max-width:960px}\
.task-panel{border:1px solid #ccc;border-radius:6px;padding:1rem;margin:1rem 0}\
.task-edit label{display:block;margin:.4rem 0}\
.task-edit textarea,.task-edit input{width:100%;box-sizing:border-box}\
.error{color:#b00020}.degraded{color:#8a6d3b}\
.status-sent{color:#2e7d32}.status-pending{color:#ef6c00}\
button[data-inert]{opacity:.5}";

/// Full console document. `alerts` are drained by the caller so each is shown
/// once.
pub fn render_page(today: NaiveDate, view: &ViewContext, alerts: &[String]) -> Node {
    let head = el("head")
        .child(el("meta").attr("charset", "utf-8"))
        .child(el("title").text("Today's tasks"))
        .child(el("style").text(STYLE));

    let mut body = el("body")
        .child(el("h1").text(format!("Tasks for {}", today.format("%Y-%m-%d"))))
        .child(
            el("div")
                .class("toolbar")
                .child(post_button("/tasks/refresh", "Refresh"))
                .child(post_button("/tasks/generate_today", "Generate today's tasks")),
        );

    if !alerts.is_empty() {
        body = body.child(
            el("div")
                .attr("id", "alerts")
                .attr("role", "alert")
                .children(alerts.iter().map(|a| Node::from(el("p").class("error").text(a.as_str())))),
        );
    }

    if let Some(notice) = view.generate_result() {
        body = body.child(notice_block("generate-result", notice));
    }

    body = match view.task_list() {
        Some(list) => body.child(list.clone()),
        None => body.child(
            el("div")
                .attr("id", "task-list")
                .child(el("p").class("loading").text("Task list not loaded yet.")),
        ),
    };

    el("html").attr("lang", "en").child(head).child(body).into()
}

fn post_button(action: &str, label: &str) -> Element {
    el("form")
        .attr("method", "post")
        .attr("action", action)
        .attr("style", "display:inline")
        .child(el("button").attr("type", "submit").text(label))
}

fn notice_block(id: &str, notice: &Notice) -> Element {
    let class = if notice.is_error { "result error" } else { "result" };
    el("div").attr("id", id).class(class).text(notice.message.as_str())
}
