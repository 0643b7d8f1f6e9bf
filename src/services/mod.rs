pub mod task_board;

pub use task_board::TaskBoard;
