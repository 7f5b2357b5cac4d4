//! Brand - garment brands accepted for cleaning

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::record::{Draft, EntityKind, Record};
use crate::core::validation::{required, FieldError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: u64,
    pub name: String,
    #[serde(default = "crate::entities::default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandDraft {
    pub name: String,
}

impl Draft for BrandDraft {
    const FIELDS: &'static [&'static str] = &["name"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.to_string(),
            _ => return Err(FieldError::unknown_field(field)),
        }
        Ok(())
    }

    fn get(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, "name", &self.name);
        errors.into_result(Self { name })
    }
}

impl Record for Brand {
    const KIND: EntityKind = EntityKind::Brand;
    type Draft = BrandDraft;

    record_accessors!();

    fn create(id: u64, draft: BrandDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: BrandDraft) {
        self.name = draft.name;
    }

    fn imported(id: u64, name: String, now: DateTime<Utc>) -> Self {
        Self::create(id, BrandDraft { name }, now)
    }

    fn to_draft(&self) -> BrandDraft {
        BrandDraft {
            name: self.name.clone(),
        }
    }
}
