//! Warehouse - storage sites where garments wait between points and the plant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::geocode::Coordinates;
use crate::core::record::{Draft, EntityKind, Record};
use crate::core::validation::{
    parse_coordinate, parse_id, required, required_id, FieldError, ValidationErrors,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city_id: Option<u64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "crate::entities::default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Warehouse {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::from_parts(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseDraft {
    pub name: String,
    pub address: String,
    pub city_id: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Draft for WarehouseDraft {
    const FIELDS: &'static [&'static str] = &["name", "address", "cityId", "latitude", "longitude"];

    fn set(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.to_string(),
            "address" => self.address = value.to_string(),
            "cityId" => self.city_id = parse_id(field, value)?,
            "latitude" => self.latitude = parse_coordinate(field, value, 90.0)?,
            "longitude" => self.longitude = parse_coordinate(field, value, 180.0)?,
            _ => return Err(FieldError::unknown_field(field)),
        }
        Ok(())
    }

    fn get(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "address" => Some(self.address.clone()),
            "cityId" => self.city_id.map(|id| id.to_string()),
            "latitude" => self.latitude.map(|v| v.to_string()),
            "longitude" => self.longitude.map(|v| v.to_string()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, "name", &self.name);
        let address = required(&mut errors, "address", &self.address);
        let city_id = required_id(&mut errors, "cityId", self.city_id);
        if self.latitude.is_some() != self.longitude.is_some() {
            errors.add(FieldError::new(
                "longitude",
                "latitude and longitude must be set together",
            ));
        }
        errors.into_result(Self {
            name,
            address,
            city_id: Some(city_id),
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

impl Record for Warehouse {
    const KIND: EntityKind = EntityKind::Warehouse;
    type Draft = WarehouseDraft;

    record_accessors!();

    fn create(id: u64, draft: WarehouseDraft, now: DateTime<Utc>) -> Self {
        let mut warehouse = Self {
            id,
            name: String::new(),
            address: None,
            city_id: None,
            latitude: None,
            longitude: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        warehouse.apply(draft);
        warehouse
    }

    fn apply(&mut self, draft: WarehouseDraft) {
        self.name = draft.name;
        self.address = Some(draft.address).filter(|a| !a.is_empty());
        self.city_id = draft.city_id;
        self.latitude = draft.latitude;
        self.longitude = draft.longitude;
    }

    fn imported(id: u64, name: String, now: DateTime<Utc>) -> Self {
        Self::create(
            id,
            WarehouseDraft {
                name,
                ..Default::default()
            },
            now,
        )
    }

    fn to_draft(&self) -> WarehouseDraft {
        WarehouseDraft {
            name: self.name.clone(),
            address: self.address.clone().unwrap_or_default(),
            city_id: self.city_id,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_requires_address_and_city() {
        let mut draft = WarehouseDraft::default();
        draft.set("name", "Central").unwrap();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get("address"), Some("is required"));
        assert_eq!(errors.get("cityId"), Some("is required"));
    }

    #[test]
    fn test_half_a_coordinate_is_rejected() {
        let mut draft = WarehouseDraft::default();
        draft.set("name", "Central").unwrap();
        draft.set("address", "Abay Ave 10").unwrap();
        draft.set("cityId", "1").unwrap();
        draft.set("latitude", "43.25").unwrap();
        assert!(draft.validate().unwrap_err().get("longitude").is_some());

        draft.set("longitude", "76.92").unwrap();
        let valid = draft.validate().unwrap();
        assert_eq!(valid.city_id, Some(1));
    }
}
