//! Agent records: a person plus an agent role row pointing at it.

use std::sync::Arc;
use std::time::Duration;

use serde_json::to_value;
use tracing::info;

use super::{created_id, translate_conflict, SaveError};
use crate::api::{decode, ApiClient, ApiError};
use crate::catalog::Catalogs;
use crate::domain::{Agent, AgentPayload, PersonPayload};
use crate::lookup::DocumentLookup;

const PERSON_CONFLICT: &str = "A person with this document already exists.";
const AGENT_CONFLICT: &str = "This person is already registered as an agent.";

/// Save and delete sequencing for agent records.
pub struct AgentWorkflow<C: ?Sized> {
    client: Arc<C>,
}

impl<C> AgentWorkflow<C>
where
    C: ApiClient + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Agent>, ApiError> {
        decode(self.client.fetch("/agents").await?)
    }

    /// Create an agent. When the document already resolved to a person,
    /// only the role row is created; otherwise the person is created first
    /// and the returned id feeds the role row.
    pub async fn create(
        &self,
        resolved_person: Option<i64>,
        person: &PersonPayload,
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

        self.client
            .create("/agents", to_value(AgentPayload { id_person })?)
            .await
            .map_err(|err| translate_conflict(err, AGENT_CONFLICT))?;
        info!(id_person, "agent created");
        Ok(())
    }

    /// Editing an agent only touches the underlying person record.
    pub async fn update(&self, person_id: i64, person: &PersonPayload) -> Result<(), SaveError> {
        self.client
            .update(&format!("/person/{person_id}"), to_value(person)?)
            .await
            .map_err(|err| translate_conflict(err, PERSON_CONFLICT))?;
        Ok(())
    }

    /// Role row first, then the person. The person delete is skipped when
    /// the role delete fails.
    pub async fn delete(&self, agent_id: i64, person_id: i64) -> Result<(), ApiError> {
        self.client.remove(&format!("/agents/{agent_id}")).await?;
        self.client.remove(&format!("/person/{person_id}")).await?;
        info!(agent_id, person_id, "agent deleted");
        Ok(())
    }
}

/// Form state for creating an agent, driven by the document lookup.
pub struct AgentForm<C: ?Sized> {
    workflow: AgentWorkflow<C>,
    pub catalogs: Catalogs,
    lookup: DocumentLookup<C>,
    document_number: String,
    document_type: Option<i64>,
    saving: bool,
}

impl<C> AgentForm<C>
where
    C: ApiClient + ?Sized + 'static,
{
    pub fn new(client: Arc<C>, catalogs: Catalogs, debounce: Duration) -> Self {
        Self {
            workflow: AgentWorkflow::new(Arc::clone(&client)),
            catalogs,
            lookup: DocumentLookup::new(client, debounce),
            document_number: String::new(),
            document_type: None,
            saving: false,
        }
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn document_type(&self) -> Option<i64> {
        self.document_type
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

    pub async fn submit(&mut self) -> Result<(), SaveError> {
        if self.saving {
            return Err(SaveError::InProgress);
        }
        let person = self.person_payload()?;
        let resolved = self.lookup.read(|machine| machine.person_id());

        self.saving = true;
        let result = self.workflow.create(resolved, &person).await;
        self.saving = false;
        result
    }
}
