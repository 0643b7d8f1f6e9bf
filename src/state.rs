use std::sync::Arc;

use crate::services::TaskBoard;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<TaskBoard>,
}
