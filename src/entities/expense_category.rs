//! Expense category - buckets for cash-shift expenses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::record::{Draft, EntityKind, Record};
use crate::core::validation::{optional, required, FieldError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "crate::entities::default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseCategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

impl Draft for ExpenseCategoryDraft {
    const FIELDS: &'static [&'static str] = &["name", "description"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.to_string(),
            "description" => self.description = Some(value.to_string()),
            _ => return Err(FieldError::unknown_field(field)),
        }
        Ok(())
    }

    fn get(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "description" => self.description.clone(),
            _ => None,
        }
    }

    fn validate(&self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, "name", &self.name);
        errors.into_result(Self {
            name,
            description: optional(&self.description),
        })
    }
}

impl Record for ExpenseCategory {
    const KIND: EntityKind = EntityKind::ExpenseCategory;
    type Draft = ExpenseCategoryDraft;

    record_accessors!();

    fn create(id: u64, draft: ExpenseCategoryDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: ExpenseCategoryDraft) {
        self.name = draft.name;
        self.description = draft.description;
    }

    fn imported(id: u64, name: String, now: DateTime<Utc>) -> Self {
        Self::create(
            id,
            ExpenseCategoryDraft {
                name,
                description: None,
            },
            now,
        )
    }

    fn to_draft(&self) -> ExpenseCategoryDraft {
        ExpenseCategoryDraft {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}
