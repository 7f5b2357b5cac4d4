//! Geocoding for points and warehouses
//!
//! Forward geocoding is a stub: it returns the configured city center with a
//! small random jitter so markers do not stack on the map. Reverse geocoding
//! asks a Nominatim-compatible HTTP endpoint.
//!
//! Neither direction returns `Err`. Failures come back in the `error` field
//! of the result and callers must check it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::time::Duration;

/// Almaty city center, the default map origin
pub const DEFAULT_ORIGIN: Coordinates = Coordinates {
    latitude: 43.238949,
    longitude: 76.889709,
};

/// Maximum stub offset in degrees, each axis
pub const DEFAULT_JITTER: f64 = 0.05;

pub const DEFAULT_REVERSE_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Both parts or nothing
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Some(Self {
            latitude: latitude?,
            longitude: longitude?,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub coordinates: Option<Coordinates>,
    pub error: Option<String>,
}

impl GeocodeResult {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            coordinates: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReverseGeocodeResult {
    pub address: Option<String>,
    pub error: Option<String>,
}

impl ReverseGeocodeResult {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            address: None,
            error: Some(message.into()),
        }
    }
}

pub trait Geocoder {
    /// Address to coordinates
    fn geocode(&self, address: &str) -> GeocodeResult;

    /// Coordinates to a human-readable address
    fn reverse(&self, coordinates: Coordinates) -> ReverseGeocodeResult;
}

/// Jittered-constant forward geocoder
#[derive(Debug)]
pub struct StubGeocoder {
    origin: Coordinates,
    jitter: f64,
    rng: RefCell<StdRng>,
}

impl StubGeocoder {
    pub fn new(origin: Coordinates, jitter: f64) -> Self {
        Self {
            origin,
            jitter,
            rng: RefCell::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible jitter, for tests
    pub fn with_seed(origin: Coordinates, jitter: f64, seed: u64) -> Self {
        Self {
            origin,
            jitter,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StubGeocoder {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN, DEFAULT_JITTER)
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, address: &str) -> GeocodeResult {
        if address.trim().is_empty() {
            return GeocodeResult::failed("address is empty");
        }

        let mut rng = self.rng.borrow_mut();
        let (dlat, dlon) = if self.jitter > 0.0 {
            (
                rng.random_range(-self.jitter..=self.jitter),
                rng.random_range(-self.jitter..=self.jitter),
            )
        } else {
            (0.0, 0.0)
        };
        tracing::debug!(address, "stub geocode");
        GeocodeResult {
            coordinates: Some(Coordinates {
                latitude: self.origin.latitude + dlat,
                longitude: self.origin.longitude + dlon,
            }),
            error: None,
        }
    }

    fn reverse(&self, _coordinates: Coordinates) -> ReverseGeocodeResult {
        ReverseGeocodeResult::failed("reverse geocoding is not available offline")
    }
}

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    display_name: Option<String>,
    error: Option<String>,
}

/// Stub forward lookups plus real reverse lookups over HTTP
pub struct HttpGeocoder {
    client: reqwest::blocking::Client,
    base_url: String,
    forward: StubGeocoder,
}

impl HttpGeocoder {
    /// The user agent is mandatory: public Nominatim rejects anonymous clients
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            forward: StubGeocoder::default(),
        })
    }

    fn fetch_reverse(&self, coordinates: Coordinates) -> Result<NominatimReverse, reqwest::Error> {
        self.client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "json".to_string()),
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
            ])
            .send()?
            .error_for_status()?
            .json()
    }
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, address: &str) -> GeocodeResult {
        self.forward.geocode(address)
    }

    fn reverse(&self, coordinates: Coordinates) -> ReverseGeocodeResult {
        match self.fetch_reverse(coordinates) {
            Ok(NominatimReverse {
                display_name: Some(address),
                ..
            }) => ReverseGeocodeResult {
                address: Some(address),
                error: None,
            },
            Ok(NominatimReverse { error, .. }) => ReverseGeocodeResult::failed(
                error.unwrap_or_else(|| "address not found".to_string()),
            ),
            Err(e) => {
                tracing::warn!("reverse geocoding failed: {}", e);
                ReverseGeocodeResult::failed(e.to_string())
            }
        }
    }
}
