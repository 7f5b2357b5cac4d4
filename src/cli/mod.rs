//! CLI module - argument parsing and command dispatch

/// Run `$body` with `$R` bound to the record type of `$kind`
///
/// Commands are written once, generic over [`Record`](crate::core::Record);
/// this picks the concrete type from the kind given on the command line.
macro_rules! with_record_type {
    ($kind:expr, $R:ident => $body:expr) => {
        match $kind {
            $crate::core::EntityKind::Brand => {
                type $R = $crate::entities::Brand;
                $body
            }
            $crate::core::EntityKind::Size => {
                type $R = $crate::entities::Size;
                $body
            }
            $crate::core::EntityKind::Color => {
                type $R = $crate::entities::Color;
                $body
            }
            $crate::core::EntityKind::PaymentType => {
                type $R = $crate::entities::PaymentType;
                $body
            }
            $crate::core::EntityKind::ExpenseCategory => {
                type $R = $crate::entities::ExpenseCategory;
                $body
            }
            $crate::core::EntityKind::MeasurementUnit => {
                type $R = $crate::entities::MeasurementUnit;
                $body
            }
            $crate::core::EntityKind::Warehouse => {
                type $R = $crate::entities::Warehouse;
                $body
            }
            $crate::core::EntityKind::Point => {
                type $R = $crate::entities::Point;
                $body
            }
        }
    };
}

pub mod args;
pub mod commands;
pub mod helpers;
pub mod table;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
