//! Record trait - common interface for all catalog entries

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{de::DeserializeOwned, Serialize};

use crate::core::validation::{FieldError, ValidationErrors};

/// Common trait for all catalog records
///
/// A record kind is written once as a plain struct and gets the whole CRUD,
/// import and export machinery through this trait.
pub trait Record: Serialize + DeserializeOwned + Clone + std::fmt::Debug {
    /// The catalog this record belongs to
    const KIND: EntityKind;

    /// User-editable fields, as filled in by the add/edit form
    type Draft: Draft;

    /// Get the record's unique ID
    fn id(&self) -> u64;

    /// Get the record's display name
    fn name(&self) -> &str;

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last modification timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    fn set_updated_at(&mut self, at: DateTime<Utc>);

    /// Build a fresh, active record from a validated draft
    fn create(id: u64, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Overwrite the editable fields with a validated draft
    fn apply(&mut self, draft: Self::Draft);

    /// Build a record from an imported row: only the name is known
    fn imported(id: u64, name: String, now: DateTime<Utc>) -> Self;

    /// Current editable fields, used to pre-populate the edit form
    fn to_draft(&self) -> Self::Draft;
}

/// The editable part of a record, filled field by field from a form
pub trait Draft: Default + Clone + std::fmt::Debug {
    /// Form field names, in display order
    const FIELDS: &'static [&'static str];

    /// Set a field from user input
    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError>;

    /// Current value of a field, if it has one
    fn get(&self, field: &str) -> Option<String>;

    /// Check required fields and return the normalized (trimmed) draft
    fn validate(&self) -> Result<Self, ValidationErrors>;
}

/// The catalogs managed by the admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum EntityKind {
    Brand,
    Size,
    Color,
    PaymentType,
    ExpenseCategory,
    MeasurementUnit,
    Warehouse,
    Point,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Brand,
        EntityKind::Size,
        EntityKind::Color,
        EntityKind::PaymentType,
        EntityKind::ExpenseCategory,
        EntityKind::MeasurementUnit,
        EntityKind::Warehouse,
        EntityKind::Point,
    ];

    /// Machine name, also used for seed and export file names
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Brand => "brand",
            EntityKind::Size => "size",
            EntityKind::Color => "color",
            EntityKind::PaymentType => "payment_type",
            EntityKind::ExpenseCategory => "expense_category",
            EntityKind::MeasurementUnit => "measurement_unit",
            EntityKind::Warehouse => "warehouse",
            EntityKind::Point => "point",
        }
    }

    /// Human label for messages ("Brand", "Payment type")
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Brand => "Brand",
            EntityKind::Size => "Size",
            EntityKind::Color => "Color",
            EntityKind::PaymentType => "Payment type",
            EntityKind::ExpenseCategory => "Expense category",
            EntityKind::MeasurementUnit => "Measurement unit",
            EntityKind::Warehouse => "Warehouse",
            EntityKind::Point => "Point",
        }
    }

    /// Plural form used in counts ("3 brands")
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Brand => "brands",
            EntityKind::Size => "sizes",
            EntityKind::Color => "colors",
            EntityKind::PaymentType => "payment types",
            EntityKind::ExpenseCategory => "expense categories",
            EntityKind::MeasurementUnit => "measurement units",
            EntityKind::Warehouse => "warehouses",
            EntityKind::Point => "points",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "brand" | "brands" => Ok(EntityKind::Brand),
            "size" | "sizes" => Ok(EntityKind::Size),
            "color" | "colors" => Ok(EntityKind::Color),
            "payment_type" | "payment_types" => Ok(EntityKind::PaymentType),
            "expense_category" | "expense_categories" => Ok(EntityKind::ExpenseCategory),
            "measurement_unit" | "measurement_units" | "unit" => Ok(EntityKind::MeasurementUnit),
            "warehouse" | "warehouses" => Ok(EntityKind::Warehouse),
            "point" | "points" => Ok(EntityKind::Point),
            _ => Err(format!("Unknown catalog: {}", s)),
        }
    }
}
