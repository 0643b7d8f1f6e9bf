#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use frontend::error::AppError;
use frontend::gateway::Gateway;
use frontend::models::{CourseRecord, GenerateSummary, TaskStatus, TaskViewModel};
use parking_lot::Mutex;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchToday(Option<String>),
    Generate,
    MarkSent(i64),
    UpsertPost(i64, String),
    FetchCourse(i64),
    UpdateCourse(CourseRecord),
}

/// In-memory backend that records every call and keeps the task list in
/// step with the writes it accepts.
#[derive(Default)]
pub struct FakeGateway {
    pub tasks: Mutex<Vec<TaskViewModel>>,
    pub courses: Mutex<HashMap<i64, CourseRecord>>,
    pub calls: Mutex<Vec<Call>>,
    pub fail_with: Mutex<Option<String>>,
    next_task_id: AtomicI64,
}

impl FakeGateway {
    pub fn with_tasks(tasks: Vec<TaskViewModel>) -> Self {
        let courses = tasks
            .iter()
            .map(|t| (t.course_id, course_record_for(t)))
            .collect();
        Self {
            tasks: Mutex::new(tasks),
            courses: Mutex::new(courses),
            next_task_id: AtomicI64::new(1000),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn fail_next_calls(&self, message: &str) {
        *self.fail_with.lock() = Some(message.to_string());
    }

    fn record(&self, call: Call) -> Result<(), AppError> {
        self.calls.lock().push(call);
        match self.fail_with.lock().clone() {
            Some(msg) => Err(AppError::Api(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn fetch_today_tasks(&self, map_api_key: Option<&str>) -> Result<Vec<TaskViewModel>, AppError> {
        self.record(Call::FetchToday(map_api_key.map(str::to_string)))?;
        Ok(self.tasks.lock().clone())
    }

    async fn generate_today(&self) -> Result<GenerateSummary, AppError> {
        self.record(Call::Generate)?;
        let mut generated = 0;
        let mut skipped = 0;
        for task in self.tasks.lock().iter_mut() {
            if task.task_id.is_some() {
                skipped += 1;
            } else {
                task.task_id = Some(self.next_task_id.fetch_add(1, Ordering::SeqCst));
                generated += 1;
            }
        }
        Ok(GenerateSummary { generated, skipped })
    }

    async fn mark_sent(&self, task_id: i64) -> Result<(), AppError> {
        self.record(Call::MarkSent(task_id))?;
        let mut tasks = self.tasks.lock();
        let task = tasks
            .iter_mut()
            .find(|t| t.task_id == Some(task_id))
            .ok_or_else(|| AppError::Api("task not found".to_string()))?;
        task.status = TaskStatus::Sent;
        Ok(())
    }

    async fn upsert_post(&self, course_id: i64, content: &str) -> Result<(), AppError> {
        self.record(Call::UpsertPost(course_id, content.to_string()))?;
        let mut tasks = self.tasks.lock();
        let task = tasks
            .iter_mut()
            .find(|t| t.course_id == course_id)
            .ok_or_else(|| AppError::Api("course not found".to_string()))?;
        if task.task_id.is_none() {
            task.task_id = Some(self.next_task_id.fetch_add(1, Ordering::SeqCst));
        }
        task.content = content.to_string();
        Ok(())
    }

    async fn fetch_course(&self, course_id: i64) -> Result<CourseRecord, AppError> {
        self.record(Call::FetchCourse(course_id))?;
        self.courses
            .lock()
            .get(&course_id)
            .cloned()
            .ok_or_else(|| AppError::Api("course not found".to_string()))
    }

    async fn update_course(&self, course: &CourseRecord) -> Result<(), AppError> {
        self.record(Call::UpdateCourse(course.clone()))?;
        self.courses.lock().insert(course.course_id, course.clone());
        if let Some(task) = self.tasks.lock().iter_mut().find(|t| t.course_id == course.course_id) {
            task.course_title = course.title.clone();
            task.course_teacher = course.teacher.clone();
            task.course_location = course.location.clone();
            task.start_at = course.start_at.clone();
            task.end_at = course.end_at.clone();
        }
        Ok(())
    }
}

pub fn task(course_id: i64, task_id: Option<i64>) -> TaskViewModel {
    TaskViewModel {
        task_id,
        course_id,
        course_title: format!("Course {}", course_id),
        course_teacher: "Ms. Zhang".to_string(),
        course_location: "Training Center Room 301".to_string(),
        start_at: "2026-10-16 09:00".to_string(),
        end_at: "2026-10-16 11:30".to_string(),
        content: String::new(),
        status: TaskStatus::Pending,
        survey_link: None,
        survey_submitted_count: 0,
        enrollment_total_count: 0,
        geo: None,
        map_url: None,
    }
}

pub fn course_record_for(task: &TaskViewModel) -> CourseRecord {
    let mut extra = Map::new();
    extra.insert("goal".to_string(), Value::String("safety refresher".to_string()));
    CourseRecord {
        course_id: task.course_id,
        session_id: Some(7),
        title: task.course_title.clone(),
        teacher: task.course_teacher.clone(),
        location: task.course_location.clone(),
        start_at: task.start_at.clone(),
        end_at: task.end_at.clone(),
        extra,
    }
}
