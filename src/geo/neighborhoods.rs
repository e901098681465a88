use super::point::Coordinate;

/// A predefined pickup area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood {
    pub id: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl Neighborhood {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

pub const NEIGHBORHOODS: &[Neighborhood] = &[
    Neighborhood { id: "hamdallaye", name: "Hamdallaye", latitude: 12.6337, longitude: -8.0059 },
    Neighborhood { id: "aci2000", name: "ACI 2000", latitude: 12.6201, longitude: -8.0264 },
    Neighborhood { id: "badalabougou", name: "Badalabougou", latitude: 12.6333, longitude: -7.9833 },
    Neighborhood { id: "sogoniko", name: "Sogoniko", latitude: 12.5987, longitude: -8.0099 },
    Neighborhood { id: "lafiabougou", name: "Lafiabougou", latitude: 12.6743, longitude: -8.0098 },
    Neighborhood { id: "kalaban", name: "Kalaban Coura", latitude: 12.5658, longitude: -7.9896 },
    Neighborhood { id: "niamakoro", name: "Niamakoro", latitude: 12.5854, longitude: -7.9502 },
];

/// Neighborhoods whose name contains `query`, ignoring case. A blank query
/// returns all of them.
pub fn filter_neighborhoods(query: &str) -> Vec<&'static Neighborhood> {
    let query = query.trim().to_lowercase();
    NEIGHBORHOODS
        .iter()
        .filter(|n| query.is_empty() || n.name.to_lowercase().contains(&query))
        .collect()
}

pub fn find_neighborhood(id: &str) -> Option<&'static Neighborhood> {
    NEIGHBORHOODS.iter().find(|n| n.id == id)
}
