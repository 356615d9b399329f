// handlers/tasks - Task pages and the done toggle
//
// Tasks are addressed by their own id; ownership always resolves through
// the parent list.

pub mod delete;
pub mod edit;
pub mod toggle;

pub use delete::get as delete_confirm;
pub use delete::post as destroy;
pub use edit::get as edit_form;
pub use edit::post as update;
pub use toggle::post as toggle;

use serde::Serialize;

use crate::database::models::{List, Task};

#[derive(Debug, Serialize)]
pub struct TaskContext {
    pub task: Task,
    pub list: List,
    pub action: String,
}
