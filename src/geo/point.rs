use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;
const MIN_REGION_DELTA: f64 = 0.05;
const REGION_PADDING: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A geocoded trip endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
    pub address: String,
}

impl RoutePoint {
    pub fn new(at: Coordinate, address: impl Into<String>) -> Self {
        Self {
            latitude: at.latitude,
            longitude: at.longitude,
            label: format_point_label(at.latitude, at.longitude),
            address: address.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Visible map area: center plus span in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Bamako, where the service operates.
pub const DEFAULT_REGION: MapRegion = MapRegion {
    latitude: 12.6392,
    longitude: -8.0029,
    latitude_delta: 0.12,
    longitude_delta: 0.12,
};

pub fn format_point_label(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.5}, {longitude:.5}")
}

/// Region centered between two points with some padding around them.
pub fn region_between(a: Coordinate, b: Coordinate) -> MapRegion {
    MapRegion {
        latitude: (a.latitude + b.latitude) / 2.0,
        longitude: (a.longitude + b.longitude) / 2.0,
        latitude_delta: MIN_REGION_DELTA.max((b.latitude - a.latitude).abs() * REGION_PADDING),
        longitude_delta: MIN_REGION_DELTA.max((b.longitude - a.longitude).abs() * REGION_PADDING),
    }
}

/// Region covering every point, or the default region when there are none.
pub fn region_for_points(points: &[Coordinate]) -> MapRegion {
    let Some(first) = points.first() else {
        return DEFAULT_REGION;
    };

    let (mut min, mut max) = (*first, *first);
    for p in &points[1..] {
        min.latitude = min.latitude.min(p.latitude);
        min.longitude = min.longitude.min(p.longitude);
        max.latitude = max.latitude.max(p.latitude);
        max.longitude = max.longitude.max(p.longitude);
    }
    region_between(min, max)
}

/// Great-circle distance in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_five_decimals() {
        assert_eq!(format_point_label(12.6337, -8.0059), "12.63370, -8.00590");
        let point = RoutePoint::new(Coordinate::new(12.5, -7.95), "Sogoniko");
        assert_eq!(point.label, "12.50000, -7.95000");
        assert_eq!(point.coordinate(), Coordinate::new(12.5, -7.95));
    }

    #[test]
    fn close_points_get_the_minimum_span() {
        let region = region_between(Coordinate::new(12.62, -8.01), Coordinate::new(12.63, -8.0));
        assert!((region.latitude - 12.625).abs() < 1e-9);
        assert_eq!(region.latitude_delta, 0.05);
        assert_eq!(region.longitude_delta, 0.05);
    }

    #[test]
    fn distant_points_are_padded() {
        let region = region_between(Coordinate::new(12.6337, -8.0059), Coordinate::new(12.5334, -7.9499));
        assert!((region.latitude_delta - 0.1003 * 1.5).abs() < 1e-9);
        assert!((region.longitude_delta - 0.056 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn empty_point_set_uses_default_region() {
        assert_eq!(region_for_points(&[]), DEFAULT_REGION);
    }

    #[test]
    fn bounding_box_center() {
        let region = region_for_points(&[
            Coordinate::new(12.7, -8.1),
            Coordinate::new(12.5, -7.9),
            Coordinate::new(12.6, -8.0),
        ]);
        assert!((region.latitude - 12.6).abs() < 1e-9);
        assert!((region.longitude + 8.0).abs() < 1e-9);
        assert!((region.latitude_delta - 0.3).abs() < 1e-9);
    }

    #[test]
    fn haversine_is_plausible() {
        let hamdallaye = Coordinate::new(12.6337, -8.0059);
        let airport = Coordinate::new(12.5334, -7.9499);
        let d = haversine_km(hamdallaye, airport);
        assert!(d > 12.0 && d < 13.5, "got {d}");
        assert_eq!(haversine_km(airport, airport), 0.0);
    }
}
