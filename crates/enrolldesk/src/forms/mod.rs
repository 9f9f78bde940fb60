//! Record forms and their save workflows.
//!
//! Saves are multi-step where the API demands it (a person record before
//! its role record); each form carries a saving latch so a submit cannot
//! be issued twice concurrently.

pub mod agent;
pub mod course;
pub mod enrollment;
pub mod payment;
pub mod student;

pub use agent::{AgentForm, AgentWorkflow};
pub use course::{CourseForm, CourseWorkflow, InstitutionPicker, PickedInstitution};
pub use enrollment::{EnrollmentForm, EnrollmentWorkflow};
pub use payment::{PaymentForm, ScheduleAction, ScheduleBoard};
pub use student::{RoleSelection, StudentForm, StudentWorkflow};

use serde_json::Value;
use thiserror::Error;

use crate::api::ApiError;

/// Failure modes of a form save.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Rejected before any network call.
    #[error("{0}")]
    Validation(String),
    /// The server refused the write as a duplicate; the message is
    /// user-presentable.
    #[error("{0}")]
    Conflict(String),
    /// A creation step succeeded but returned no usable id, so dependent
    /// steps cannot run.
    #[error("creation did not return a valid id")]
    MissingId,
    #[error("a save is already in progress")]
    InProgress,
    #[error("could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for SaveError {
    fn from(err: ApiError) -> Self {
        SaveError::Api(err)
    }
}

/// Turn a 409 into a presentable [`SaveError::Conflict`]; any other API
/// failure passes through untranslated.
pub(crate) fn translate_conflict(err: ApiError, fallback: &str) -> SaveError {
    if err.is_conflict() {
        SaveError::Conflict(err.conflict_message(fallback))
    } else {
        SaveError::Api(err)
    }
}

/// Pull the integer `id` out of a creation response.
pub(crate) fn created_id(response: &Value) -> Result<i64, SaveError> {
    response
        .get("id")
        .and_then(Value::as_i64)
        .ok_or(SaveError::MissingId)
}
