//! Wire records exchanged with the remote API.
//!
//! Every record here is a cache of server state, valid only until the next
//! reload; nothing is authoritative on the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentType {
    pub id: i64,
    pub description: String,
}

/// Generic row of a simple lookup table. Some catalogs label rows with
/// `description`, others with `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogEntry {
    pub fn label(&self) -> &str {
        self.description
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_type: Option<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub document_number: String,
    pub document_type: DocumentType,
    #[serde(default)]
    pub active: bool,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub person: Person,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<CatalogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<Institution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_rank: Option<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: i64,
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInstitution {
    pub institution: Institution,
    pub price: f64,
    pub duration_in_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub course_type: CatalogEntry,
    pub modality: CatalogEntry,
    /// A course is offered at one or more institutions, each with its own
    /// price and duration.
    pub institutions: Vec<CourseInstitution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub enrollment_date: DateTime<Utc>,
    pub student: Student,
    pub agent: Agent,
    pub course: Course,
    pub institution: Institution,
    pub enrollment_fee_amount: f64,
    pub final_rights_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentStatus {
    pub id: i64,
    pub status: String,
}

/// One installment of an enrollment's payment schedule. Status transitions
/// are server-driven; the client only reacts to the current status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: i64,
    pub enrollment_id: i64,
    pub concept_type: CatalogEntry,
    pub installment_amount: f64,
    pub installment_due_date: DateTime<Utc>,
    pub installment_status: InstallmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub payment_date: DateTime<Utc>,
    pub payment_type: CatalogEntry,
    pub id_payment_schedule: i64,
}

// Write payloads. The API addresses references by `id...` foreign keys
// rather than nested records.

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub document_number: String,
    pub id_document_type: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPayload {
    pub id_person: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub id_profession: i64,
    pub id_institution: i64,
    pub id_academic_rank: i64,
    pub id_person: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionRef {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInstitutionPayload {
    pub institution: InstitutionRef,
    pub price: f64,
    pub duration_in_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub name: String,
    pub id_course_type: i64,
    pub id_modality: i64,
    pub institutions: Vec<CourseInstitutionPayload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPayload {
    pub enrollment_date: DateTime<Utc>,
    pub id_student: i64,
    pub id_agent: i64,
    pub id_course: i64,
    pub id_institution: i64,
    pub enrollment_fee_amount: f64,
    pub final_rights_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub payment_date: DateTime<Utc>,
    pub id_payment_type: i64,
    pub id_payment_schedule: i64,
}
