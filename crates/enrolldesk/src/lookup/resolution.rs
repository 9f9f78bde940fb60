use crate::domain::Person;

/// Editable personal-data fields of a person form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Lifecycle of "does a person with this document already exist".
///
/// `Found` and `NotFound` are stable until the watched document tuple
/// changes again, at which point the machine re-enters `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    Initial,
    Loading,
    Found,
    NotFound,
}

/// Result of one settled lookup.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    Found(Person),
    NotFound,
    TransientError(String),
}

/// Gates personal-data entry on the lookup outcome and retains the
/// resolved person id for save time.
#[derive(Debug)]
pub struct ResolutionMachine {
    status: ResolutionStatus,
    fields: PersonFields,
    person_id: Option<i64>,
    resolved_document_type: Option<i64>,
    error: Option<String>,
}

impl Default for ResolutionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionMachine {
    pub fn new() -> Self {
        Self {
            status: ResolutionStatus::Initial,
            fields: PersonFields::default(),
            person_id: None,
            resolved_document_type: None,
            error: None,
        }
    }

    pub fn status(&self) -> ResolutionStatus {
        self.status
    }

    /// Inline, retryable message from the last transient failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn person_id(&self) -> Option<i64> {
        self.person_id
    }

    /// Document type of a found person, used to align the form's select
    /// with the record on file.
    pub fn resolved_document_type(&self) -> Option<i64> {
        self.resolved_document_type
    }

    pub fn fields(&self) -> &PersonFields {
        &self.fields
    }

    /// Personal data is only editable when the document resolved to no
    /// existing person.
    pub fn fields_mut(&mut self) -> Option<&mut PersonFields> {
        match self.status {
            ResolutionStatus::NotFound => Some(&mut self.fields),
            _ => None,
        }
    }

    pub fn personal_fields_enabled(&self) -> bool {
        self.status == ResolutionStatus::NotFound
    }

    /// Role-specific fields (profession, institution, rank) are only
    /// meaningful once identity status is known.
    pub fn role_fields_enabled(&self) -> bool {
        matches!(
            self.status,
            ResolutionStatus::Found | ResolutionStatus::NotFound
        )
    }

    /// The watched tuple changed and a lookup has been scheduled.
    pub fn begin_lookup(&mut self) {
        self.status = ResolutionStatus::Loading;
        self.error = None;
    }

    /// The watched tuple was emptied before the timer fired: withdraw a
    /// pending "searching" indicator. Settled outcomes are kept.
    pub fn cancel_lookup(&mut self) {
        if self.status == ResolutionStatus::Loading {
            self.status = ResolutionStatus::Initial;
        }
    }

    pub fn settle(&mut self, outcome: LookupOutcome) {
        match outcome {
            LookupOutcome::Found(person) => {
                self.fields = PersonFields {
                    first_name: person.first_name,
                    last_name: person.last_name,
                    email: person.email,
                    phone: person.phone,
                    address: person.address,
                };
                self.person_id = Some(person.id);
                self.resolved_document_type = Some(person.document_type.id);
                self.status = ResolutionStatus::Found;
                self.error = None;
            }
            LookupOutcome::NotFound => {
                self.fields = PersonFields::default();
                self.person_id = None;
                self.resolved_document_type = None;
                self.status = ResolutionStatus::NotFound;
                self.error = None;
            }
            // Transient failures fall back to Initial with an inline
            // message; re-triggering the input retries.
            LookupOutcome::TransientError(message) => {
                self.person_id = None;
                self.status = ResolutionStatus::Initial;
                self.error = Some(message);
            }
        }
    }

}
