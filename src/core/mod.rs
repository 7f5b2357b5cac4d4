//! Core module - catalog state, its collaborators and file formats

pub mod clock;
pub mod config;
pub mod controller;
pub mod export;
pub mod geocode;
pub mod import;
pub mod modal;
pub mod notify;
pub mod record;
pub mod seed;
pub mod stats;
pub mod store;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use controller::CrudController;
pub use export::{ExportError, ExportFormat};
pub use geocode::{Coordinates, Geocoder, HttpGeocoder, StubGeocoder};
pub use import::{ImportError, ImportPipeline, ImportSummary};
pub use modal::{ModalCoordinator, ModalError, ModalState, Submitted};
pub use notify::{Notification, NotificationCenter, NotificationKind, Notifier};
pub use record::{Draft, EntityKind, Record};
pub use stats::{RandomStatistics, Stats, StatisticsProvider};
pub use store::{EntityStore, StoreError};
pub use validation::{FieldError, ValidationErrors};
