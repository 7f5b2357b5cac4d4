//! Measurement unit - units used on price lists (piece, kg, m²)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::record::{Draft, EntityKind, Record};
use crate::core::validation::{required, FieldError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementUnit {
    pub id: u64,
    pub name: String,
    /// Abbreviation printed on receipts
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default = "crate::entities::default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementUnitDraft {
    pub name: String,
    pub short_name: String,
}

impl Draft for MeasurementUnitDraft {
    const FIELDS: &'static [&'static str] = &["name", "shortName"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.to_string(),
            "shortName" => self.short_name = value.to_string(),
            _ => return Err(FieldError::unknown_field(field)),
        }
        Ok(())
    }

    fn get(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "shortName" => Some(self.short_name.clone()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, "name", &self.name);
        let short_name = required(&mut errors, "shortName", &self.short_name);
        errors.into_result(Self { name, short_name })
    }
}

impl Record for MeasurementUnit {
    const KIND: EntityKind = EntityKind::MeasurementUnit;
    type Draft = MeasurementUnitDraft;

    record_accessors!();

    fn create(id: u64, draft: MeasurementUnitDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            short_name: Some(draft.short_name).filter(|s| !s.is_empty()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: MeasurementUnitDraft) {
        self.name = draft.name;
        self.short_name = Some(draft.short_name).filter(|s| !s.is_empty());
    }

    fn imported(id: u64, name: String, now: DateTime<Utc>) -> Self {
        Self::create(
            id,
            MeasurementUnitDraft {
                name,
                short_name: String::new(),
            },
            now,
        )
    }

    fn to_draft(&self) -> MeasurementUnitDraft {
        MeasurementUnitDraft {
            name: self.name.clone(),
            short_name: self.short_name.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_is_required_on_forms() {
        let draft = MeasurementUnitDraft {
            name: "Kilogram".into(),
            short_name: " ".into(),
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get("shortName"), Some("is required"));
        assert_eq!(errors.get("name"), None);
    }
}
