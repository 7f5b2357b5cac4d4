//! Color - garment colors with a swatch hex code

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::record::{Draft, EntityKind, Record};
use crate::core::validation::{required, FieldError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: u64,
    pub name: String,
    /// `#RRGGBB`, upper case. Imported colors have none until edited.
    #[serde(default)]
    pub hex_code: Option<String>,
    #[serde(default = "crate::entities::default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorDraft {
    pub name: String,
    pub hex_code: String,
}

/// Normalize `#rgb` / `#rrggbb` to `#RRGGBB`
pub fn normalize_hex(value: &str) -> Option<String> {
    let digits = value.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let full = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return None,
    };
    Some(format!("#{}", full.to_uppercase()))
}

impl Draft for ColorDraft {
    const FIELDS: &'static [&'static str] = &["name", "hexCode"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.to_string(),
            "hexCode" => self.hex_code = value.to_string(),
            _ => return Err(FieldError::unknown_field(field)),
        }
        Ok(())
    }

    fn get(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "hexCode" => Some(self.hex_code.clone()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, "name", &self.name);
        let hex = required(&mut errors, "hexCode", &self.hex_code);
        let hex_code = if hex.is_empty() {
            hex
        } else {
            normalize_hex(&hex).unwrap_or_else(|| {
                errors.add(FieldError::new("hexCode", "must look like #RRGGBB"));
                hex
            })
        };
        errors.into_result(Self { name, hex_code })
    }
}

impl Record for Color {
    const KIND: EntityKind = EntityKind::Color;
    type Draft = ColorDraft;

    record_accessors!();

    fn create(id: u64, draft: ColorDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            hex_code: Some(draft.hex_code).filter(|h| !h.is_empty()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: ColorDraft) {
        self.name = draft.name;
        self.hex_code = Some(draft.hex_code).filter(|h| !h.is_empty());
    }

    fn imported(id: u64, name: String, now: DateTime<Utc>) -> Self {
        Self::create(
            id,
            ColorDraft {
                name,
                hex_code: String::new(),
            },
            now,
        )
    }

    fn to_draft(&self) -> ColorDraft {
        ColorDraft {
            name: self.name.clone(),
            hex_code: self.hex_code.clone().unwrap_or_default(),
        }
    }
}
