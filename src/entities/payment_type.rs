//! Payment type - ways a receipt can be paid at the counter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::record::{Draft, EntityKind, Record};
use crate::core::validation::{required, FieldError, ValidationErrors};

/// How the money actually moves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
    Online,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Transfer => write!(f, "transfer"),
            PaymentMethod::Online => write!(f, "online"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "transfer" => Ok(PaymentMethod::Transfer),
            "online" => Ok(PaymentMethod::Online),
            _ => Err(format!(
                "Invalid payment method: {}. Use cash, card, transfer, or online",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentType {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default = "crate::entities::default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentTypeDraft {
    pub name: String,
    pub payment_method: Option<PaymentMethod>,
}

impl Draft for PaymentTypeDraft {
    const FIELDS: &'static [&'static str] = &["name", "paymentMethod"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.to_string(),
            "paymentMethod" => {
                let method = value
                    .parse()
                    .map_err(|e: String| FieldError::new(field, e))?;
                self.payment_method = Some(method);
            }
            _ => return Err(FieldError::unknown_field(field)),
        }
        Ok(())
    }

    fn get(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "paymentMethod" => self.payment_method.map(|m| m.to_string()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, "name", &self.name);
        if self.payment_method.is_none() {
            errors.add(FieldError::new("paymentMethod", "is required"));
        }
        errors.into_result(Self {
            name,
            payment_method: self.payment_method,
        })
    }
}

impl Record for PaymentType {
    const KIND: EntityKind = EntityKind::PaymentType;
    type Draft = PaymentTypeDraft;

    record_accessors!();

    fn create(id: u64, draft: PaymentTypeDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            payment_method: draft.payment_method.unwrap_or_default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: PaymentTypeDraft) {
        self.name = draft.name;
        if let Some(method) = draft.payment_method {
            self.payment_method = method;
        }
    }

    fn imported(id: u64, name: String, now: DateTime<Utc>) -> Self {
        Self::create(
            id,
            PaymentTypeDraft {
                name,
                payment_method: None,
            },
            now,
        )
    }

    fn to_draft(&self) -> PaymentTypeDraft {
        PaymentTypeDraft {
            name: self.name.clone(),
            payment_method: Some(self.payment_method),
        }
    }
}
