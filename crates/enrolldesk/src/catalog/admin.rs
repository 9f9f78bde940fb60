//! Generic maintenance of the simple lookup tables.
//!
//! One engine serves every catalog; the per-catalog shape lives in the
//! static [`CatalogSpec`] table and a field is either free text or a
//! reference into another catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::api::{decode, ApiClient, ApiError};
use crate::domain::CatalogEntry;
use crate::forms::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    Text {
        name: &'static str,
        label: &'static str,
        required: bool,
    },
    /// A foreign key into another catalog, offered as a select whose
    /// options are fetched from `options_path`.
    Select {
        name: &'static str,
        label: &'static str,
        options_path: &'static str,
        required: bool,
    },
}

impl FieldSpec {
    pub fn name(&self) -> &'static str {
        match self {
            FieldSpec::Text { name, .. } | FieldSpec::Select { name, .. } => name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldSpec::Text { label, .. } | FieldSpec::Select { label, .. } => label,
        }
    }

    pub fn required(&self) -> bool {
        match self {
            FieldSpec::Text { required, .. } | FieldSpec::Select { required, .. } => *required,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
}

const DESCRIPTION: &[FieldSpec] = &[FieldSpec::Text {
    name: "description",
    label: "Description",
    required: true,
}];

const NAME: &[FieldSpec] = &[FieldSpec::Text {
    name: "name",
    label: "Name",
    required: true,
}];

/// The catalogs the console administers. Institutions additionally carry
/// a reference to their institution type.
pub const CATALOG_SPECS: &[CatalogSpec] = &[
    CatalogSpec {
        key: "academicRank",
        title: "Academic Rank",
        path: "/academic-rank",
        fields: DESCRIPTION,
    },
    CatalogSpec {
        key: "conceptType",
        title: "Concept Type",
        path: "/concept-type",
        fields: DESCRIPTION,
    },
    CatalogSpec {
        key: "courseType",
        title: "Course Type",
        path: "/course-type",
        fields: DESCRIPTION,
    },
    CatalogSpec {
        key: "documentType",
        title: "Document Type",
        path: "/document-type",
        fields: DESCRIPTION,
    },
    CatalogSpec {
        key: "installmentStatus",
        title: "Installment Status",
        path: "/installment-status",
        fields: &[FieldSpec::Text {
            name: "status",
            label: "Status",
            required: true,
        }],
    },
    CatalogSpec {
        key: "institutionType",
        title: "Institution Type",
        path: "/institution-type",
        fields: DESCRIPTION,
    },
    CatalogSpec {
        key: "institution",
        title: "Institution",
        path: "/institution",
        fields: &[
            FieldSpec::Text {
                name: "name",
                label: "Name",
                required: true,
            },
            FieldSpec::Select {
                name: "idInstitutionType",
                label: "Institution Type",
                options_path: "/institution-type",
                required: true,
            },
        ],
    },
    CatalogSpec {
        key: "modality",
        title: "Modality",
        path: "/modality",
        fields: DESCRIPTION,
    },
    CatalogSpec {
        key: "paymentType",
        title: "Payment Type",
        path: "/payment-type",
        fields: DESCRIPTION,
    },
    CatalogSpec {
        key: "profession",
        title: "Profession",
        path: "/profession",
        fields: NAME,
    },
];

pub fn spec_for(key: &str) -> Option<&'static CatalogSpec> {
    CATALOG_SPECS.iter().find(|spec| spec.key == key)
}

/// Build the write payload for a catalog item from raw form values.
///
/// Select values are parsed to integer ids; required fields are rejected
/// before any network call.
pub fn build_payload(
    spec: &CatalogSpec,
    values: &BTreeMap<String, String>,
) -> Result<Value, SaveError> {
    let mut payload = Map::new();
    for field in spec.fields {
        let raw = values
            .get(field.name())
            .map(|value| value.trim())
            .unwrap_or("");
        if raw.is_empty() {
            if field.required() {
                return Err(SaveError::Validation(format!(
                    "{} is required",
                    field.label()
                )));
            }
            continue;
        }
        let value = match field {
            FieldSpec::Text { .. } => Value::String(raw.to_string()),
            FieldSpec::Select { .. } => {
                let id = raw.parse::<i64>().map_err(|_| {
                    SaveError::Validation(format!("{} must reference an option", field.label()))
                })?;
                Value::from(id)
            }
        };
        payload.insert(field.name().to_string(), value);
    }
    Ok(Value::Object(payload))
}

/// Catalog CRUD against the remote API.
pub struct CatalogAdmin<C> {
    client: Arc<C>,
}

impl<C: ApiClient> CatalogAdmin<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn list(&self, spec: &CatalogSpec) -> Result<Vec<Value>, ApiError> {
        decode(self.client.fetch(spec.path).await?)
    }

    /// Options for every select field of the catalog, keyed by field name.
    pub async fn options_for(
        &self,
        spec: &CatalogSpec,
    ) -> Result<BTreeMap<&'static str, Vec<CatalogEntry>>, ApiError> {
        let mut options = BTreeMap::new();
        for field in spec.fields {
            if let FieldSpec::Select {
                name, options_path, ..
            } = field
            {
                let entries = decode(self.client.fetch(options_path).await?)?;
                options.insert(*name, entries);
            }
        }
        Ok(options)
    }

    /// Create when `id` is absent, update otherwise.
    pub async fn save(
        &self,
        spec: &CatalogSpec,
        id: Option<i64>,
        values: &BTreeMap<String, String>,
    ) -> Result<(), SaveError> {
        let payload = build_payload(spec, values)?;
        match id {
            Some(id) => {
                self.client
                    .update(&format!("{}/{id}", spec.path), payload)
                    .await?;
            }
            None => {
                self.client.create(spec.path, payload).await?;
            }
        }
        info!(catalog = spec.key, ?id, "catalog item saved");
        Ok(())
    }

    pub async fn delete(&self, spec: &CatalogSpec, id: i64) -> Result<(), ApiError> {
        self.client.remove(&format!("{}/{id}", spec.path)).await?;
        Ok(())
    }
}
