//! Read-only catalog cache, loaded once per form session and shared by
//! reference. Nothing here is mutated after load; edits go through
//! [`admin`] and become visible on the next reload.

pub mod admin;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{decode, ApiClient, ApiError};
use crate::domain::{Agent, CatalogEntry, Course, DocumentType, Institution, Student};

async fn fetch_list<T, C>(client: &C, path: &str) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    C: ApiClient + ?Sized,
{
    decode(client.fetch(path).await?)
}

/// Catalogs needed by the record forms. Each loader fills only the
/// sections its form uses; the rest stay empty.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub document_types: Vec<DocumentType>,
    pub professions: Vec<CatalogEntry>,
    pub institutions: Vec<Institution>,
    pub academic_ranks: Vec<CatalogEntry>,
    pub course_types: Vec<CatalogEntry>,
    pub modalities: Vec<CatalogEntry>,
    pub payment_types: Vec<CatalogEntry>,
    pub courses: Vec<Course>,
    pub students: Vec<Student>,
    pub agents: Vec<Agent>,
}

impl Catalogs {
    /// Agent forms only identify people; document types are enough.
    pub async fn for_agent_form<C: ApiClient + ?Sized>(client: &C) -> Result<Self, ApiError> {
        let document_types = fetch_list(client, "/document-type").await?;
        debug!(count = document_types.len(), "loaded document types");
        Ok(Self {
            document_types,
            ..Self::default()
        })
    }

    pub async fn for_student_form<C: ApiClient + ?Sized>(client: &C) -> Result<Self, ApiError> {
        let (document_types, professions, institutions, academic_ranks) = tokio::try_join!(
            fetch_list(client, "/document-type"),
            fetch_list(client, "/profession"),
            fetch_list(client, "/institution"),
            fetch_list(client, "/academic-rank"),
        )?;
        debug!(
            document_types = document_types.len(),
            professions = professions.len(),
            institutions = institutions.len(),
            academic_ranks = academic_ranks.len(),
            "loaded student form catalogs"
        );
        Ok(Self {
            document_types,
            professions,
            institutions,
            academic_ranks,
            ..Self::default()
        })
    }

    pub async fn for_course_form<C: ApiClient + ?Sized>(client: &C) -> Result<Self, ApiError> {
        let (course_types, modalities, institutions) = tokio::try_join!(
            fetch_list(client, "/course-type"),
            fetch_list(client, "/modality"),
            fetch_list(client, "/institution"),
        )?;
        Ok(Self {
            course_types,
            modalities,
            institutions,
            ..Self::default()
        })
    }

    /// The enrollment form picks from full course records so the
    /// institution choice can be narrowed to the selected course's offers.
    pub async fn for_enrollment_form<C: ApiClient + ?Sized>(client: &C) -> Result<Self, ApiError> {
        let (students, agents, courses) = tokio::try_join!(
            fetch_list(client, "/students"),
            fetch_list(client, "/agents"),
            fetch_list(client, "/courses"),
        )?;
        Ok(Self {
            students,
            agents,
            courses,
            ..Self::default()
        })
    }

    pub async fn for_payment_form<C: ApiClient + ?Sized>(client: &C) -> Result<Self, ApiError> {
        let payment_types = fetch_list(client, "/payment-type").await?;
        Ok(Self {
            payment_types,
            ..Self::default()
        })
    }
}
