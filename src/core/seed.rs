//! Built-in mock data each catalog table starts with

use rust_embed::Embed;
use thiserror::Error;

use crate::core::record::{EntityKind, Record};
use crate::core::store::{EntityStore, StoreError};

#[derive(Embed)]
#[folder = "seeds/"]
struct EmbeddedSeeds;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("no seed data for {0}")]
    Missing(EntityKind),

    #[error("seed data for {kind} is not valid UTF-8")]
    Encoding { kind: EntityKind },

    #[error("seed data for {kind} is malformed: {source}")]
    Parse {
        kind: EntityKind,
        #[source]
        source: serde_yml::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn file_name(kind: EntityKind) -> String {
    format!("{}.yaml", kind.as_str())
}

/// Raw seed records of one kind, in file order
pub fn records<R: Record>() -> Result<Vec<R>, SeedError> {
    let file = EmbeddedSeeds::get(&file_name(R::KIND)).ok_or(SeedError::Missing(R::KIND))?;
    let text =
        std::str::from_utf8(&file.data).map_err(|_| SeedError::Encoding { kind: R::KIND })?;
    serde_yml::from_str(text).map_err(|source| SeedError::Parse {
        kind: R::KIND,
        source,
    })
}

/// A store mounted with the seed records of its kind
pub fn store<R: Record>() -> Result<EntityStore<R>, SeedError> {
    let records = records::<R>()?;
    tracing::debug!(kind = %R::KIND, count = records.len(), "seed loaded");
    Ok(EntityStore::seeded(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::*;

    fn assert_seeds<R: Record>() {
        let store = store::<R>().unwrap_or_else(|e| panic!("{}: {}", R::KIND, e));
        assert!(!store.is_empty(), "{} has no seeds", R::KIND);
        for record in store.list() {
            assert!(!record.name().trim().is_empty());
            assert!(record.created_at() <= record.updated_at());
        }
    }

    #[test]
    fn test_every_kind_has_valid_seeds() {
        assert_seeds::<Brand>();
        assert_seeds::<Size>();
        assert_seeds::<Color>();
        assert_seeds::<PaymentType>();
        assert_seeds::<ExpenseCategory>();
        assert_seeds::<MeasurementUnit>();
        assert_seeds::<Warehouse>();
        assert_seeds::<Point>();
    }

    #[test]
    fn test_brand_seeds() {
        let brands = records::<Brand>().unwrap();
        let names: Vec<(u64, &str)> = brands.iter().map(|b| (b.id, b.name.as_str())).collect();
        assert_eq!(names, vec![(1, "Guchi"), (2, "Prada"), (3, "Gloria Jeans")]);
        assert!(brands.iter().all(|b| b.is_active));
    }

    #[test]
    fn test_seed_files_cover_all_kinds() {
        for kind in EntityKind::ALL {
            assert!(
                EmbeddedSeeds::get(&file_name(kind)).is_some(),
                "missing seeds/{}",
                file_name(kind)
            );
        }
    }

    #[test]
    fn test_point_seed_nulls() {
        let points = records::<Point>().unwrap();
        let abay = points.iter().find(|p| p.id == 3).unwrap();
        assert_eq!(abay.coordinates(), None);
        assert!(!abay.is_active);
    }
}
