use std::collections::HashMap;

use tracing::debug;

use super::parse_count;
use crate::model::{Location, RawLocation};

/// Stadium capacity, or 0 when the text holds no number.
pub fn normalize_capacity(raw: &str) -> u32 {
    let capacity = parse_count(raw).unwrap_or_default();
    debug!(raw, capacity, "normalized capacity");
    capacity
}

/// Split `"City, ST"` at its first comma. A location without a comma is all
/// city.
pub fn split_location(location: &str) -> (String, String) {
    match location.split_once(',') {
        Some((city, state)) => (city.trim().to_string(), state.trim().to_string()),
        None => (location.trim().to_string(), String::new()),
    }
}

/// Location id registered for `stadium`.
pub fn lookup_location(stadium: &str, locations: &HashMap<String, u32>) -> Option<u32> {
    let id = locations.get(stadium.trim_end()).copied();
    if id.is_none() && !stadium.trim().is_empty() {
        debug!(stadium, "stadium has no location id");
    }
    id
}

/// Stadium name to location id over already registered locations; the first
/// location of a stadium wins.
pub fn stadium_lookup(locations: &[RawLocation]) -> HashMap<String, u32> {
    let mut lookup = HashMap::new();
    for location in locations {
        lookup
            .entry(location.stadium.trim_end().to_string())
            .or_insert(location.location_id);
    }
    lookup
}

/// Outcome of [`LocationRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registered {
    /// First sighting; the caller owns building the location row.
    New(u32),
    Existing(u32),
}

/// Hands out sequential location ids, one per distinct (stadium, city, state).
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    ids: HashMap<(String, String, String), u32>,
    next_id: u32,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register a venue, returning `None` for a blank stadium name.
    pub fn register(&mut self, stadium: &str, city: &str, state: &str) -> Option<Registered> {
        let stadium = stadium.trim_end();
        if stadium.trim().is_empty() {
            return None;
        }
        let key = (stadium.to_string(), city.to_string(), state.to_string());
        if let Some(id) = self.ids.get(&key) {
            return Some(Registered::Existing(*id));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(key, id);
        debug!(stadium, city, state, id, "registered location");
        Some(Registered::New(id))
    }
}

impl Default for LocationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub fn normalize_location(raw: &RawLocation) -> Location {
    debug!(location_id = raw.location_id, stadium = %raw.stadium, "normalizing location");
    Location {
        location_id: raw.location_id,
        stadium: raw.stadium.trim_end().to_string(),
        city: raw.city.clone(),
        state: raw.state.clone(),
        stadium_capacity: normalize_capacity(&raw.stadium_capacity),
        latitude: raw.coordinates.map(|c| c.latitude),
        longitude: raw.coordinates.map(|c| c.longitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    #[test]
    fn test_capacity() {
        assert_eq!(normalize_capacity("Capacity: 101,821"), 101821);
        assert_eq!(normalize_capacity(""), 0);
        assert_eq!(normalize_capacity("Capacity:"), 0);
    }

    #[test]
    fn test_split_location() {
        assert_eq!(
            split_location("Tuscaloosa, AL"),
            ("Tuscaloosa".to_string(), "AL".to_string())
        );
        assert_eq!(
            split_location("London, England, UK"),
            ("London".to_string(), "England, UK".to_string())
        );
        assert_eq!(split_location("Dublin"), ("Dublin".to_string(), String::new()));
        assert_eq!(split_location(""), (String::new(), String::new()));
    }

    #[test]
    fn test_registry_reuses_ids_per_venue() {
        let mut registry = LocationRegistry::new();

        assert_eq!(
            registry.register("Stadium A", "Athens", "GA"),
            Some(Registered::New(1))
        );
        assert_eq!(
            registry.register("Stadium B", "Austin", "TX"),
            Some(Registered::New(2))
        );
        assert_eq!(
            registry.register("Stadium A ", "Athens", "GA"),
            Some(Registered::Existing(1))
        );
        assert_eq!(registry.register("", "Athens", "GA"), None);
        assert_eq!(registry.register("   ", "", ""), None);
        assert_eq!(
            registry.register("Stadium C", "Auburn", "AL"),
            Some(Registered::New(3))
        );
    }

    #[test]
    fn test_registry_same_stadium_in_two_cities() {
        let mut registry = LocationRegistry::new();
        registry.register("Memorial Stadium", "Lincoln", "NE");
        assert_eq!(
            registry.register("Memorial Stadium", "Clemson", "SC"),
            Some(Registered::New(2))
        );
        assert_eq!(
            registry.register("Memorial Stadium", "Lincoln", "NE"),
            Some(Registered::Existing(1))
        );
    }

    #[test]
    fn test_stadium_lookup_first_wins() {
        let location = |location_id: u32, stadium: &str| RawLocation {
            location_id,
            stadium: stadium.to_string(),
            city: String::new(),
            state: String::new(),
            stadium_capacity: String::new(),
            coordinates: None,
        };
        let lookup = stadium_lookup(&[
            location(1, "Stadium A "),
            location(2, "Stadium B"),
            location(3, "Stadium A"),
        ]);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup_location("Stadium A", &lookup), Some(1));
        assert_eq!(lookup_location("Stadium B", &lookup), Some(2));
        assert_eq!(lookup_location("Stadium C", &lookup), None);
        assert_eq!(lookup_location("", &lookup), None);
    }

    #[test]
    fn test_normalize_location() {
        let raw = RawLocation {
            location_id: 1,
            stadium: "Bryant-Denny Stadium ".to_string(),
            city: "Tuscaloosa".to_string(),
            state: "AL".to_string(),
            stadium_capacity: "Capacity: 100,077".to_string(),
            coordinates: Some(Coordinates {
                latitude: 33.2083,
                longitude: -87.5504,
            }),
        };

        let location = normalize_location(&raw);
        assert_eq!(location.stadium, "Bryant-Denny Stadium");
        assert_eq!(location.stadium_capacity, 100077);
        assert_eq!(location.latitude, Some(33.2083));
        assert_eq!(location.longitude, Some(-87.5504));

        let location = normalize_location(&RawLocation {
            coordinates: None,
            stadium_capacity: String::new(),
            ..raw
        });
        assert_eq!(location.stadium_capacity, 0);
        assert_eq!(location.latitude, None);
    }
}
