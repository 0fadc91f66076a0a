use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One earthquake as returned by `/api/sismos_filtrados`.
///
/// The backend speaks Spanish on the wire; field names are mapped here once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeEvent {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "lugar")]
    pub place: String,
    #[serde(rename = "magnitud")]
    pub magnitude: f64,
    #[serde(rename = "profundidad")]
    pub depth_km: f64,
    /// Already display-formatted by the server (`YYYY-MM-DD HH:MM:SS`).
    #[serde(rename = "fecha")]
    pub date: String,
}

impl EarthquakeEvent {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Popup body: place, magnitude, depth, date.
    pub fn popup(&self) -> PopupContent {
        PopupContent {
            title: self.place.clone(),
            lines: [
                format!("Magnitude: {}", self.magnitude),
                format!("Depth: {} km", self.depth_km),
                format!("Date: {}", self.date),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub lines: [String; 3],
}

/// Body the backend sends alongside a non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Why a refresh could not produce an event list.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    Network(String),
    Server { status: u16, message: String },
    Status(u16),
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(e) => write!(f, "network error: {}", e),
            FetchError::Server { status, message } => {
                write!(f, "server error {}: {}", status, message)
            }
            FetchError::Status(status) => write!(f, "unexpected HTTP status {}", status),
            FetchError::Decode(e) => write!(f, "malformed response: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}
