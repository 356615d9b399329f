// handlers/lists - List pages
//
// Each GET/POST pair shares one path; axum's MethodRouter picks the handler
// by method, so every function here stands alone and is tested alone.

pub mod collection;
pub mod create;
pub mod delete;
pub mod detail;
pub mod edit;
pub mod sort;

pub use collection::get as index;
pub use create::get as new_form;
pub use create::post as create;
pub use delete::get as delete_confirm;
pub use delete::post as destroy;
pub use detail::get as show;
pub use detail::post as create_task;
pub use edit::get as edit_form;
pub use edit::post as update;
pub use sort::get as sort_form;
pub use sort::post as update_sort;

use serde::Serialize;

use crate::database::models::List;

/// Canonical "view / add to this list" URL
pub fn detail_url(id: i64) -> String {
    format!("/{}/", id)
}

/// Context for pages about a single list
#[derive(Debug, Serialize)]
pub struct ListContext {
    pub list: List,
    pub action: String,
}
