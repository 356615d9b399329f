//! Submitted-field validation for lists, tasks and sort preferences.
//!
//! A form is bound from the urlencoded body, echoed back on failure so the
//! page can be re-rendered with what the user typed, and cleaned into the
//! typed fields the store accepts. Ownership fields are never read from a
//! submission.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::collections::HashMap;

use crate::database::models::{List, SortCriterion, Task, TaskFields};
use crate::error::{ApiError, FieldErrors};

pub type FormData = HashMap<String, String>;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

const REQUIRED: &str = "This field is required.";

pub trait RecordForm: Serialize + Sized {
    type Output;

    /// Capture the submitted values, unvalidated
    fn bind(data: &FormData) -> Self;

    fn clean(&self) -> Result<Self::Output, FieldErrors>;
}

fn required_text(value: &str, field: &str, max_chars: usize, errors: &mut FieldErrors) -> String {
    let trimmed = value.trim();
    let count = trimmed.chars().count();
    if count == 0 {
        errors.insert(field.to_string(), REQUIRED.to_string());
    } else if count > max_chars {
        errors.insert(
            field.to_string(),
            format!("Ensure this value has at most {} characters (it has {}).", max_chars, count),
        );
    }
    trimmed.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListForm {
    pub title: String,
}

impl ListForm {
    pub fn from_list(list: &List) -> Self {
        Self {
            title: list.title.clone(),
        }
    }
}

impl RecordForm for ListForm {
    type Output = String;

    fn bind(data: &FormData) -> Self {
        Self {
            title: data.get("title").cloned().unwrap_or_default(),
        }
    }

    fn clean(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = required_text(&self.title, "title", TITLE_MAX_CHARS, &mut errors);
        if errors.is_empty() {
            Ok(title)
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskForm {
    pub description: String,
    pub done: bool,
    #[serde(skip)]
    done_invalid: Option<String>,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            description: task.description.clone(),
            done: task.done,
            done_invalid: None,
        }
    }
}

/// Checkbox semantics: absent means unchecked
fn parse_checkbox(raw: Option<&String>) -> Result<bool, String> {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "on" | "true" | "1" | "yes" => Ok(true),
            "" | "off" | "false" | "0" | "no" => Ok(false),
            _ => Err(v),
        },
    }
}

impl RecordForm for TaskForm {
    type Output = TaskFields;

    fn bind(data: &FormData) -> Self {
        let (done, done_invalid) = match parse_checkbox(data.get("done")) {
            Ok(done) => (done, None),
            Err(raw) => (false, Some(raw)),
        };
        Self {
            description: data.get("description").cloned().unwrap_or_default(),
            done,
            done_invalid,
        }
    }

    fn clean(&self) -> Result<TaskFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let description = required_text(&self.description, "description", DESCRIPTION_MAX_CHARS, &mut errors);
        if let Some(raw) = &self.done_invalid {
            errors.insert("done".to_string(), format!("'{}' is not a valid checkbox value.", raw));
        }
        if errors.is_empty() {
            Ok(TaskFields {
                description,
                done: self.done,
            })
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortChoice {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortForm {
    pub sort_criterion: String,
    pub choices: Vec<SortChoice>,
}

impl SortForm {
    fn with_value(sort_criterion: String) -> Self {
        Self {
            sort_criterion,
            choices: SortCriterion::ALL
                .iter()
                .map(|c| SortChoice {
                    value: c.as_str(),
                    label: c.label(),
                })
                .collect(),
        }
    }

    pub fn from_list(list: &List) -> Self {
        Self::with_value(list.sort_criterion.as_str().to_string())
    }
}

impl RecordForm for SortForm {
    type Output = SortCriterion;

    fn bind(data: &FormData) -> Self {
        Self::with_value(data.get("sort_criterion").cloned().unwrap_or_default())
    }

    fn clean(&self) -> Result<SortCriterion, FieldErrors> {
        if self.sort_criterion.trim().is_empty() {
            let mut errors = FieldErrors::new();
            errors.insert("sort_criterion".to_string(), REQUIRED.to_string());
            return Err(errors);
        }
        self.sort_criterion.parse().map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.insert(
                "sort_criterion".to_string(),
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    self.sort_criterion
                ),
            );
            errors
        })
    }
}

/// Page context plus the form it carries
#[derive(Debug, Serialize)]
pub struct FormPage<C: Serialize, F: Serialize> {
    #[serde(flatten)]
    pub context: C,
    pub form: F,
    pub errors: FieldErrors,
}

impl<C: Serialize, F: Serialize> FormPage<C, F> {
    pub fn new(context: C, form: F) -> Self {
        Self {
            context,
            form,
            errors: FieldErrors::new(),
        }
    }

    pub fn with_errors(context: C, form: F, errors: FieldErrors) -> Self {
        Self { context, form, errors }
    }

    /// Re-render after failed validation: 422, error envelope, page under `data`
    pub fn rejected(self) -> Response {
        let mut body = ApiError::validation_error("Please correct the errors below", self.errors.clone()).to_json();
        match serde_json::to_value(&self) {
            Ok(page) => body["data"] = page,
            Err(e) => tracing::error!("Failed to serialize rejected form: {}", e),
        }
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}
