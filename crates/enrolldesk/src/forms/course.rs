//! Course records and the multi-select institution picker.

use std::sync::Arc;

use serde_json::to_value;
use tracing::info;

use super::{translate_conflict, SaveError};
use crate::api::{decode, ApiClient, ApiError};
use crate::catalog::Catalogs;
use crate::domain::{
    Course, CourseInstitutionPayload, CoursePayload, InstitutionRef,
};

const COURSE_CONFLICT: &str = "A course with this name already exists.";

/// One picked institution with its per-offer terms, kept as raw text
/// until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedInstitution {
    pub id: i64,
    pub price: String,
    pub duration: String,
}

/// Multi-select over institutions, preserving selection order. Each pick
/// carries its own price and duration.
#[derive(Debug, Clone, Default)]
pub struct InstitutionPicker {
    rows: Vec<PickedInstitution>,
}

impl InstitutionPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[PickedInstitution] {
        &self.rows
    }

    pub fn is_picked(&self, id: i64) -> bool {
        self.rows.iter().any(|row| row.id == id)
    }

    /// Picking appends at the end; unpicking drops the row and its terms.
    /// Re-picking starts from blank terms.
    pub fn toggle(&mut self, id: i64) {
        if self.is_picked(id) {
            self.rows.retain(|row| row.id != id);
        } else {
            self.rows.push(PickedInstitution {
                id,
                price: String::new(),
                duration: String::new(),
            });
        }
    }

    /// Price input accepts digits and at most one decimal point; anything
    /// else leaves the field unchanged.
    pub fn set_price(&mut self, id: i64, text: &str) {
        if !text.is_empty() {
            let one_dot = text.matches('.').count() <= 1;
            if !one_dot || !text.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
                return;
            }
        }
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == id) {
            row.price = text.to_string();
        }
    }

    /// Duration input accepts digits only.
    pub fn set_duration(&mut self, id: i64, text: &str) {
        if !text.chars().all(|ch| ch.is_ascii_digit()) {
            return;
        }
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == id) {
            row.duration = text.to_string();
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Wire payloads in pick order. Blank or half-typed terms degrade to
    /// zero rather than blocking the save.
    fn payloads(&self) -> Vec<CourseInstitutionPayload> {
        self.rows
            .iter()
            .map(|row| CourseInstitutionPayload {
                institution: InstitutionRef { id: row.id },
                price: row.price.parse::<f64>().unwrap_or(0.0),
                duration_in_months: row.duration.parse::<u32>().unwrap_or(0),
            })
            .collect()
    }
}

/// Save and delete sequencing for course records.
pub struct CourseWorkflow<C: ?Sized> {
    client: Arc<C>,
}

impl<C> CourseWorkflow<C>
where
    C: ApiClient + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Course>, ApiError> {
        decode(self.client.fetch("/courses").await?)
    }

    pub async fn create(&self, payload: &CoursePayload) -> Result<(), SaveError> {
        self.client
            .create("/courses", to_value(payload)?)
            .await
            .map_err(|err| translate_conflict(err, COURSE_CONFLICT))?;
        info!(name = %payload.name, "course created");
        Ok(())
    }

    pub async fn update(&self, course_id: i64, payload: &CoursePayload) -> Result<(), SaveError> {
        self.client
            .update(&format!("/courses/{course_id}"), to_value(payload)?)
            .await
            .map_err(|err| translate_conflict(err, COURSE_CONFLICT))?;
        Ok(())
    }

    pub async fn delete(&self, course_id: i64) -> Result<(), ApiError> {
        self.client.remove(&format!("/courses/{course_id}")).await?;
        Ok(())
    }
}

/// Form state for creating or editing a course.
pub struct CourseForm<C: ?Sized> {
    workflow: CourseWorkflow<C>,
    pub catalogs: Catalogs,
    pub picker: InstitutionPicker,
    name: String,
    course_type: Option<i64>,
    modality: Option<i64>,
    editing: Option<i64>,
    saving: bool,
}

impl<C> CourseForm<C>
where
    C: ApiClient + ?Sized,
{
    pub fn new(client: Arc<C>, catalogs: Catalogs) -> Self {
        Self {
            workflow: CourseWorkflow::new(client),
            catalogs,
            picker: InstitutionPicker::new(),
            name: String::new(),
            course_type: None,
            modality: None,
            editing: None,
            saving: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_course_type(&mut self, id: Option<i64>) {
        self.course_type = id;
    }

    pub fn set_modality(&mut self, id: Option<i64>) {
        self.modality = id;
    }

    /// Load an existing course for editing, including its offers.
    pub fn edit(&mut self, course: &Course) {
        self.editing = Some(course.id);
        self.name = course.name.clone();
        self.course_type = Some(course.course_type.id);
        self.modality = Some(course.modality.id);
        self.picker.clear();
        for offer in &course.institutions {
            self.picker.toggle(offer.institution.id);
            self.picker
                .set_price(offer.institution.id, &offer.price.to_string());
            self.picker
                .set_duration(offer.institution.id, &offer.duration_in_months.to_string());
        }
    }

    fn payload(&self) -> Result<CoursePayload, SaveError> {
        if self.name.trim().is_empty() {
            return Err(SaveError::Validation("Enter a course name.".to_string()));
        }
        let id_course_type = self
            .course_type
            .ok_or_else(|| SaveError::Validation("Select a course type.".to_string()))?;
        let id_modality = self
            .modality
            .ok_or_else(|| SaveError::Validation("Select a modality.".to_string()))?;
        if self.picker.rows().is_empty() {
            return Err(SaveError::Validation(
                "Select at least one institution.".to_string(),
            ));
        }
        Ok(CoursePayload {
            name: self.name.trim().to_string(),
            id_course_type,
            id_modality,
            institutions: self.picker.payloads(),
        })
    }

    pub async fn submit(&mut self) -> Result<(), SaveError> {
        if self.saving {
            return Err(SaveError::InProgress);
        }
        let payload = self.payload()?;

        self.saving = true;
        let result = match self.editing {
            Some(course_id) => self.workflow.update(course_id, &payload).await,
            None => self.workflow.create(&payload).await,
        };
        self.saving = false;
        result
    }
}
