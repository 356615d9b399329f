pub mod frontend_options;
pub mod list;
pub mod task;

pub use frontend_options::FrontendOptions;
pub use list::{List, ListRow, NewList, SortCriterion};
pub use task::{Task, TaskFields, TaskWithList};
