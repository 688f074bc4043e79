use serde::{Deserialize, Serialize};

/// A latitude/longitude pair from the geocoding service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A venue as first seen in the game list, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawLocation {
    pub location_id: u32,
    pub stadium: String,
    pub city: String,
    pub state: String,
    pub stadium_capacity: String,
    pub coordinates: Option<Coordinates>,
}

/// A normalized venue row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub location_id: u32,
    pub stadium: String,
    pub city: String,
    pub state: String,
    pub stadium_capacity: u32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
