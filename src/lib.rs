//! DCA: dry-cleaning admin
//!
//! The catalog tables of a dry-cleaning CRM (brands, sizes, colors, payment
//! types, expense categories, measurement units, warehouses and reception
//! points) as in-memory tables with CRUD, modal dialogs, CSV import and
//! CSV/Excel export.

pub mod cli;
pub mod core;
pub mod entities;
