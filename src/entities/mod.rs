//! Catalog record types
//!
//! The admin panel manages the following catalogs:
//!
//! **Goods:**
//! - [`Brand`] - Garment brands
//! - [`Size`] - Garment sizes
//! - [`Color`] - Garment colors with hex swatches
//! - [`MeasurementUnit`] - Units used on price lists
//!
//! **Money:**
//! - [`PaymentType`] - Ways a receipt can be paid
//! - [`ExpenseCategory`] - Buckets for cash-shift expenses
//!
//! **Sites:**
//! - [`Warehouse`] - Storage sites
//! - [`Point`] - Reception points

/// The bookkeeping half of [`Record`](crate::core::Record), identical for
/// every catalog struct with `id`, `name`, `is_active`, `created_at` and
/// `updated_at` fields.
macro_rules! record_accessors {
    () => {
        fn id(&self) -> u64 {
            self.id
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn is_active(&self) -> bool {
            self.is_active
        }

        fn set_active(&mut self, active: bool) {
            self.is_active = active;
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }

        fn set_updated_at(&mut self, at: DateTime<Utc>) {
            self.updated_at = at;
        }
    };
}

pub mod brand;
pub mod color;
pub mod expense_category;
pub mod measurement_unit;
pub mod payment_type;
pub mod point;
pub mod size;
pub mod warehouse;

pub use brand::Brand;
pub use color::Color;
pub use expense_category::ExpenseCategory;
pub use measurement_unit::MeasurementUnit;
pub use payment_type::PaymentType;
pub use point::Point;
pub use size::Size;
pub use warehouse::Warehouse;

pub(crate) fn default_active() -> bool {
    true
}
