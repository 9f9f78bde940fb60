//! Student records: a person plus a student role row carrying profession,
//! institution and academic rank.

use std::sync::Arc;
use std::time::Duration;

use serde_json::to_value;
use tracing::info;

use super::{created_id, translate_conflict, SaveError};
use crate::api::{decode, ApiClient, ApiError};
use crate::catalog::Catalogs;
use crate::domain::{PersonPayload, Student, StudentPayload};
use crate::lookup::DocumentLookup;
use crate::typeahead::TypeaheadSelect;

const PERSON_CONFLICT: &str = "A person with this document already exists.";
const STUDENT_CONFLICT: &str = "This person is already registered as a student.";

/// Save and delete sequencing for student records.
pub struct StudentWorkflow<C: ?Sized> {
    client: Arc<C>,
}

impl<C> StudentWorkflow<C>
where
    C: ApiClient + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Student>, ApiError> {
        decode(self.client.fetch("/students").await?)
    }

    /// Create a student. An already-resolved person skips the person
    /// create; otherwise the person goes first and its id feeds the role
    /// row.
    pub async fn create(
        &self,
        resolved_person: Option<i64>,
        person: &PersonPayload,
        role: RoleSelection,
    ) -> Result<(), SaveError> {
        let id_person = match resolved_person {
            Some(id) => id,
            None => {
                let response = self
                    .client
                    .create("/person", to_value(person)?)
                    .await
                    .map_err(|err| translate_conflict(err, PERSON_CONFLICT))?;
                created_id(&response)?
            }
        };

        let payload = StudentPayload {
            id_profession: role.profession,
            id_institution: role.institution,
            id_academic_rank: role.academic_rank,
            id_person,
        };
        self.client
            .create("/students", to_value(payload)?)
            .await
            .map_err(|err| translate_conflict(err, STUDENT_CONFLICT))?;
        info!(id_person, "student created");
        Ok(())
    }

    /// Person first, then the role row. A failed person update leaves the
    /// role row untouched.
    pub async fn update(
        &self,
        student_id: i64,
        person_id: i64,
        person: &PersonPayload,
        role: RoleSelection,
    ) -> Result<(), SaveError> {
        self.client
            .update(&format!("/person/{person_id}"), to_value(person)?)
            .await
            .map_err(|err| translate_conflict(err, PERSON_CONFLICT))?;

        let payload = StudentPayload {
            id_profession: role.profession,
            id_institution: role.institution,
            id_academic_rank: role.academic_rank,
            id_person: person_id,
        };
        self.client
            .update(&format!("/students/{student_id}"), to_value(payload)?)
            .await?;
        Ok(())
    }

    /// Role row first, then the person; short-circuits on failure.
    pub async fn delete(&self, student_id: i64, person_id: i64) -> Result<(), ApiError> {
        self.client
            .remove(&format!("/students/{student_id}"))
            .await?;
        self.client.remove(&format!("/person/{person_id}")).await?;
        info!(student_id, person_id, "student deleted");
        Ok(())
    }
}

/// The three role-specific foreign keys of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSelection {
    pub profession: i64,
    pub institution: i64,
    pub academic_rank: i64,
}

/// Form state for creating a student.
pub struct StudentForm<C: ?Sized> {
    workflow: StudentWorkflow<C>,
    pub catalogs: Catalogs,
    lookup: DocumentLookup<C>,
    pub institution: TypeaheadSelect,
    document_number: String,
    document_type: Option<i64>,
    profession: Option<i64>,
    academic_rank: Option<i64>,
    saving: bool,
}

impl<C> StudentForm<C>
where
    C: ApiClient + ?Sized + 'static,
{
    /// Profession and academic rank default to the first catalog entry,
    /// matching what the selects would show; the institution starts empty
    /// and is chosen through the typeahead.
    pub fn new(client: Arc<C>, catalogs: Catalogs, debounce: Duration) -> Self {
        let institution = TypeaheadSelect::new(
            catalogs
                .institutions
                .iter()
                .map(|institution| (institution.id, institution.name.clone())),
        );
        let profession = catalogs.professions.first().map(|entry| entry.id);
        let academic_rank = catalogs.academic_ranks.first().map(|entry| entry.id);
        Self {
            workflow: StudentWorkflow::new(Arc::clone(&client)),
            catalogs,
            lookup: DocumentLookup::new(client, debounce),
            institution,
            document_number: String::new(),
            document_type: None,
            profession,
            academic_rank,
            saving: false,
        }
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn document_type(&self) -> Option<i64> {
        self.document_type
    }

    pub fn profession(&self) -> Option<i64> {
        self.profession
    }

    pub fn academic_rank(&self) -> Option<i64> {
        self.academic_rank
    }

    pub fn lookup(&self) -> &DocumentLookup<C> {
        &self.lookup
    }

    pub fn set_document_number(&mut self, number: &str) {
        self.document_number = number.trim().to_string();
        self.lookup
            .input_changed(&self.document_number, self.document_type);
    }

    pub fn set_document_type(&mut self, id: Option<i64>) {
        self.document_type = id;
        self.lookup
            .input_changed(&self.document_number, self.document_type);
    }

    pub fn set_profession(&mut self, id: i64) {
        self.profession = Some(id);
    }

    pub fn set_academic_rank(&mut self, id: i64) {
        self.academic_rank = Some(id);
    }

    /// Await the pending lookup, if any.
    pub async fn settled(&mut self) {
        self.lookup.settled().await;
    }

    fn person_payload(&self) -> Result<PersonPayload, SaveError> {
        let Some(id_document_type) = self.document_type else {
            return Err(SaveError::Validation(
                "Select a document type.".to_string(),
            ));
        };
        if self.document_number.is_empty() {
            return Err(SaveError::Validation(
                "Enter a document number.".to_string(),
            ));
        }
        let payload = self.lookup.read(|machine| {
            let fields = machine.fields();
            PersonPayload {
                first_name: fields.first_name.clone(),
                last_name: fields.last_name.clone(),
                email: fields.email.clone(),
                phone: fields.phone.clone(),
                address: fields.address.clone(),
                document_number: self.document_number.clone(),
                id_document_type,
            }
        });
        if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
            return Err(SaveError::Validation(
                "First and last name are required.".to_string(),
            ));
        }
        Ok(payload)
    }

    fn role_selection(&self) -> Result<RoleSelection, SaveError> {
        let profession = self
            .profession
            .ok_or_else(|| SaveError::Validation("Select a profession.".to_string()))?;
        let institution = self
            .institution
            .selected()
            .ok_or_else(|| SaveError::Validation("Select an institution.".to_string()))?;
        let academic_rank = self
            .academic_rank
            .ok_or_else(|| SaveError::Validation("Select an academic rank.".to_string()))?;
        Ok(RoleSelection {
            profession,
            institution,
            academic_rank,
        })
    }

    pub async fn submit(&mut self) -> Result<(), SaveError> {
        if self.saving {
            return Err(SaveError::InProgress);
        }
        let person = self.person_payload()?;
        let role = self.role_selection()?;
        let resolved = self.lookup.read(|machine| machine.person_id());

        self.saving = true;
        let result = self.workflow.create(resolved, &person, role).await;
        self.saving = false;
        result
    }
}
