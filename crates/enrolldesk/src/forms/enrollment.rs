//! Enrollment of a student into a course at one of its offering
//! institutions.

use std::sync::Arc;

use chrono::Utc;
use serde_json::to_value;
use tracing::info;

use super::{translate_conflict, SaveError};
use crate::api::{decode, ApiClient, ApiError};
use crate::catalog::Catalogs;
use crate::domain::{CourseInstitution, Enrollment, EnrollmentPayload};

const ENROLLMENT_CONFLICT: &str = "This student is already enrolled in the course.";

/// Save sequencing for enrollments.
pub struct EnrollmentWorkflow<C: ?Sized> {
    client: Arc<C>,
}

impl<C> EnrollmentWorkflow<C>
where
    C: ApiClient + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Enrollment>, ApiError> {
        decode(self.client.fetch("/enrollment").await?)
    }

    pub async fn create(&self, payload: &EnrollmentPayload) -> Result<(), SaveError> {
        self.client
            .create("/enrollment", to_value(payload)?)
            .await
            .map_err(|err| translate_conflict(err, ENROLLMENT_CONFLICT))?;
        info!(
            id_student = payload.id_student,
            id_course = payload.id_course,
            "enrollment created"
        );
        Ok(())
    }
}

/// Form state for creating an enrollment. The institution choice is
/// derived from the selected course's offers and resets whenever the
/// course changes.
pub struct EnrollmentForm<C: ?Sized> {
    workflow: EnrollmentWorkflow<C>,
    pub catalogs: Catalogs,
    student: Option<i64>,
    agent: Option<i64>,
    course: Option<i64>,
    institution: Option<i64>,
    enrollment_fee: String,
    final_rights: String,
    saving: bool,
}

impl<C> EnrollmentForm<C>
where
    C: ApiClient + ?Sized,
{
    pub fn new(client: Arc<C>, catalogs: Catalogs) -> Self {
        Self {
            workflow: EnrollmentWorkflow::new(client),
            catalogs,
            student: None,
            agent: None,
            course: None,
            institution: None,
            enrollment_fee: String::new(),
            final_rights: String::new(),
            saving: false,
        }
    }

    pub fn student(&self) -> Option<i64> {
        self.student
    }

    pub fn agent(&self) -> Option<i64> {
        self.agent
    }

    pub fn course(&self) -> Option<i64> {
        self.course
    }

    pub fn institution(&self) -> Option<i64> {
        self.institution
    }

    pub fn set_student(&mut self, id: Option<i64>) {
        self.student = id;
    }

    pub fn set_agent(&mut self, id: Option<i64>) {
        self.agent = id;
    }

    /// Changing the course invalidates the institution pick, since the
    /// offer list it came from no longer applies.
    pub fn set_course(&mut self, id: Option<i64>) {
        if self.course != id {
            self.institution = None;
        }
        self.course = id;
    }

    pub fn set_institution(&mut self, id: Option<i64>) {
        self.institution = id;
    }

    pub fn set_enrollment_fee(&mut self, text: &str) {
        self.enrollment_fee = text.to_string();
    }

    pub fn set_final_rights(&mut self, text: &str) {
        self.final_rights = text.to_string();
    }

    /// The offers of the selected course; empty until a course is picked.
    pub fn available_institutions(&self) -> &[CourseInstitution] {
        self.course
            .and_then(|id| {
                self.catalogs
                    .courses
                    .iter()
                    .find(|course| course.id == id)
            })
            .map(|course| course.institutions.as_slice())
            .unwrap_or(&[])
    }

    fn amount(text: &str, label: &str) -> Result<f64, SaveError> {
        text.trim()
            .parse::<f64>()
            .map_err(|_| SaveError::Validation(format!("{label} must be a number.")))
    }

    fn payload(&self) -> Result<EnrollmentPayload, SaveError> {
        let id_student = self
            .student
            .ok_or_else(|| SaveError::Validation("Select a student.".to_string()))?;
        let id_agent = self
            .agent
            .ok_or_else(|| SaveError::Validation("Select an agent.".to_string()))?;
        let id_course = self
            .course
            .ok_or_else(|| SaveError::Validation("Select a course.".to_string()))?;
        let id_institution = self
            .institution
            .ok_or_else(|| SaveError::Validation("Select an institution.".to_string()))?;
        Ok(EnrollmentPayload {
            enrollment_date: Utc::now(),
            id_student,
            id_agent,
            id_course,
            id_institution,
            enrollment_fee_amount: Self::amount(&self.enrollment_fee, "Enrollment fee")?,
            final_rights_amount: Self::amount(&self.final_rights, "Final rights")?,
        })
    }

    pub async fn submit(&mut self) -> Result<(), SaveError> {
        if self.saving {
            return Err(SaveError::InProgress);
        }
        let payload = self.payload()?;

        self.saving = true;
        let result = self.workflow.create(&payload).await;
        self.saving = false;
        result
    }
}
