//! CLI command implementations

pub mod completions;
pub mod config;
pub mod export;
pub mod geocode;
pub mod import;
pub mod list;
pub mod shell;
pub mod stats;

use miette::Result;
use std::rc::Rc;

use crate::core::{
    seed, Clock, Config, CrudController, EntityKind, NotificationCenter, Record, SystemClock,
};

/// Accepts singular, plural and dashed names ("brands", "payment-type")
pub(crate) fn parse_kind(s: &str) -> std::result::Result<EntityKind, String> {
    s.parse()
}

/// Row filters shared by `list` and `export`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only active records
    #[arg(long)]
    pub active_only: bool,

    /// Only records whose name contains this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        if self.active_only && !record.is_active() {
            return false;
        }
        match &self.search {
            Some(needle) => record
                .name()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.active_only && self.search.is_none()
    }
}

/// A seeded table with its notification center
pub struct Mounted<R: Record> {
    pub controller: CrudController<R>,
    pub center: Rc<NotificationCenter>,
}

/// Mount the seed data of `R` on the wall clock
pub fn mount<R: Record>(config: &Config) -> Result<Mounted<R>> {
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let center = Rc::new(NotificationCenter::new(
        clock.clone(),
        config.notification_timeout(),
    ));
    let store = seed::store::<R>().map_err(|e| miette::miette!("{}", e))?;
    let controller = CrudController::new(store, clock, center.clone());
    Ok(Mounted { controller, center })
}
