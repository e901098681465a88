use std::sync::Arc;
use tracing::debug;

use crate::geo::{
    filter_neighborhoods, Coordinate, Geocoder, MapRegion, Neighborhood, RoutePoint,
    RouteProvider, RouteSummary,
};

/// Zoom applied when a neighborhood is picked.
const NEIGHBORHOOD_ZOOM_DELTA: f64 = 0.03;

/// Which trip endpoint the map picker edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointField {
    Departure,
    Arrival,
}

/// Map picker of the trip search screen.
///
/// While the picker is open, taps, the current location or a neighborhood
/// produce a pending point. Nothing is committed until [`RoutePicker::confirm`].
pub struct RoutePicker {
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn RouteProvider>,
    active_field: Option<PointField>,
    pending: Option<RoutePoint>,
    neighborhood_query: String,
    departure: Option<RoutePoint>,
    arrival: Option<RoutePoint>,
    route: RouteSummary,
    focus: Option<MapRegion>,
}

impl std::fmt::Debug for RoutePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePicker")
            .field("active_field", &self.active_field)
            .field("pending", &self.pending)
            .field("departure", &self.departure)
            .field("arrival", &self.arrival)
            .field("route_points", &self.route.coordinates.len())
            .finish()
    }
}

impl RoutePicker {
    pub fn new(geocoder: Arc<dyn Geocoder>, router: Arc<dyn RouteProvider>) -> Self {
        Self {
            geocoder,
            router,
            active_field: None,
            pending: None,
            neighborhood_query: String::new(),
            departure: None,
            arrival: None,
            route: RouteSummary::empty(),
            focus: None,
        }
    }

    pub fn active_field(&self) -> Option<PointField> {
        self.active_field
    }

    pub fn pending_point(&self) -> Option<&RoutePoint> {
        self.pending.as_ref()
    }

    pub fn departure(&self) -> Option<&RoutePoint> {
        self.departure.as_ref()
    }

    pub fn arrival(&self) -> Option<&RoutePoint> {
        self.arrival.as_ref()
    }

    pub fn route(&self) -> &RouteSummary {
        &self.route
    }

    /// Region the map should animate to after a neighborhood pick.
    pub fn focus_region(&self) -> Option<MapRegion> {
        self.focus
    }

    pub fn neighborhood_query(&self) -> &str {
        &self.neighborhood_query
    }

    pub fn set_neighborhood_query(&mut self, query: impl Into<String>) {
        self.neighborhood_query = query.into();
    }

    pub fn neighborhoods(&self) -> Vec<&'static Neighborhood> {
        filter_neighborhoods(&self.neighborhood_query)
    }

    /// Opens the picker on `field`, starting from its committed value.
    pub fn open_picker(&mut self, field: PointField) {
        self.active_field = Some(field);
        self.pending = match field {
            PointField::Departure => self.departure.clone(),
            PointField::Arrival => self.arrival.clone(),
        };
        self.neighborhood_query.clear();
        self.focus = None;
    }

    /// Map tap or current location. `None` when the picker is closed.
    pub async fn select_coordinate(&mut self, at: Coordinate) -> Option<&RoutePoint> {
        self.active_field?;
        let address = self.geocoder.reverse(at).await;
        self.set_pending(RoutePoint::new(at, address)).await
    }

    pub async fn select_neighborhood(
        &mut self,
        neighborhood: &Neighborhood,
    ) -> Option<&RoutePoint> {
        self.active_field?;
        let at = neighborhood.coordinate();
        let address = self.geocoder.reverse(at).await;
        self.focus = Some(MapRegion {
            latitude: at.latitude,
            longitude: at.longitude,
            latitude_delta: NEIGHBORHOOD_ZOOM_DELTA,
            longitude_delta: NEIGHBORHOOD_ZOOM_DELTA,
        });
        self.set_pending(RoutePoint::new(at, address)).await
    }

    async fn set_pending(&mut self, point: RoutePoint) -> Option<&RoutePoint> {
        // Preview against the other committed endpoint
        let preview = match self.active_field? {
            PointField::Departure => self.arrival.clone().map(|arrival| (point.clone(), arrival)),
            PointField::Arrival => self.departure.clone().map(|departure| (departure, point.clone())),
        };
        self.pending = Some(point);
        if let Some((from, to)) = preview {
            self.calculate_route(&from, &to).await;
        }
        self.pending.as_ref()
    }

    /// Commits the pending point and closes the picker. Returns `false` when
    /// there was nothing to commit.
    pub async fn confirm(&mut self) -> bool {
        let (Some(field), Some(point)) = (self.active_field, self.pending.take()) else {
            return false;
        };
        debug!(?field, address = %point.address, "Route point confirmed");
        match field {
            PointField::Departure => self.departure = Some(point),
            PointField::Arrival => self.arrival = Some(point),
        }
        self.recalculate().await;
        self.active_field = None;
        self.neighborhood_query.clear();
        true
    }

    /// Discards the pending point and restores the committed route.
    pub async fn close_picker(&mut self) {
        self.active_field = None;
        self.pending = None;
        self.neighborhood_query.clear();
        self.recalculate().await;
    }

    pub fn reset(&mut self) {
        self.active_field = None;
        self.pending = None;
        self.neighborhood_query.clear();
        self.departure = None;
        self.arrival = None;
        self.route = RouteSummary::empty();
        self.focus = None;
    }

    async fn recalculate(&mut self) {
        if let (Some(from), Some(to)) = (self.departure.clone(), self.arrival.clone()) {
            self.calculate_route(&from, &to).await;
        }
    }

    async fn calculate_route(&mut self, from: &RoutePoint, to: &RoutePoint) {
        self.route = self
            .router
            .driving_route(from.coordinate(), to.coordinate())
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::geocoding::MockGeocoder;
    use crate::geo::routing::MockRouteProvider;
    use crate::geo::{find_neighborhood, ADDRESS_UNAVAILABLE};

    fn summary(distance_km: f64) -> RouteSummary {
        RouteSummary {
            coordinates: vec![Coordinate::new(12.63, -8.0), Coordinate::new(12.53, -7.95)],
            distance_km,
            duration_min: 20,
        }
    }

    fn geocoder() -> MockGeocoder {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_reverse()
            .returning(|at| format!("Rue {:.2}", at.latitude));
        geocoder
    }

    #[tokio::test]
    async fn taps_are_ignored_while_closed() {
        let mut geocoder = MockGeocoder::new();
        geocoder.expect_reverse().never();
        let mut router = MockRouteProvider::new();
        router.expect_driving_route().never();

        let mut picker = RoutePicker::new(Arc::new(geocoder), Arc::new(router));
        assert!(picker.select_coordinate(Coordinate::new(12.6, -8.0)).await.is_none());
        assert!(!picker.confirm().await);
    }

    #[tokio::test]
    async fn first_endpoint_does_not_route() {
        let mut router = MockRouteProvider::new();
        router.expect_driving_route().never();
        let mut picker = RoutePicker::new(Arc::new(geocoder()), Arc::new(router));

        picker.open_picker(PointField::Departure);
        let point = picker
            .select_coordinate(Coordinate::new(12.6337, -8.0059))
            .await
            .unwrap();
        assert_eq!(point.label, "12.63370, -8.00590");
        assert_eq!(point.address, "Rue 12.63");

        assert!(picker.confirm().await);
        assert!(picker.departure().is_some());
        assert!(picker.active_field().is_none());
        assert!(picker.route().is_empty());
    }

    #[tokio::test]
    async fn both_endpoints_route_on_confirm() {
        let mut router = MockRouteProvider::new();
        // preview on the arrival tap, then the confirmed route
        router
            .expect_driving_route()
            .times(2)
            .returning(|_, _| summary(10.0));
        let mut picker = RoutePicker::new(Arc::new(geocoder()), Arc::new(router));

        picker.open_picker(PointField::Departure);
        picker.select_coordinate(Coordinate::new(12.6337, -8.0059)).await;
        picker.confirm().await;

        picker.open_picker(PointField::Arrival);
        let niamakoro = find_neighborhood("niamakoro").unwrap();
        picker.select_neighborhood(niamakoro).await;
        assert_eq!(picker.focus_region().unwrap().latitude_delta, 0.03);
        assert!(picker.confirm().await);

        assert_eq!(picker.arrival().unwrap().latitude, niamakoro.latitude);
        assert_eq!(picker.route().estimated_price(), 3750);
    }

    #[tokio::test]
    async fn closing_discards_the_pending_point() {
        let mut router = MockRouteProvider::new();
        router.expect_driving_route().returning(|_, _| summary(5.0));
        let mut picker = RoutePicker::new(Arc::new(geocoder()), Arc::new(router));

        picker.open_picker(PointField::Departure);
        picker.select_coordinate(Coordinate::new(12.6, -8.0)).await;
        picker.confirm().await;

        picker.open_picker(PointField::Departure);
        assert_eq!(picker.pending_point(), picker.departure());
        picker.select_coordinate(Coordinate::new(12.7, -8.1)).await;
        picker.close_picker().await;

        assert!(picker.pending_point().is_none());
        assert_eq!(picker.departure().unwrap().latitude, 12.6);
    }

    #[tokio::test]
    async fn geocoder_fallback_is_kept_as_address() {
        let mut geocoder = MockGeocoder::new();
        geocoder
            .expect_reverse()
            .returning(|_| ADDRESS_UNAVAILABLE.to_string());
        let mut picker = RoutePicker::new(Arc::new(geocoder), Arc::new(MockRouteProvider::new()));

        picker.open_picker(PointField::Arrival);
        let point = picker.select_coordinate(Coordinate::new(12.6, -8.0)).await.unwrap();
        assert_eq!(point.address, ADDRESS_UNAVAILABLE);
    }

    #[tokio::test]
    async fn neighborhood_filter_and_reset() {
        let mut router = MockRouteProvider::new();
        router.expect_driving_route().returning(|_, _| summary(2.0));
        let mut picker = RoutePicker::new(Arc::new(geocoder()), Arc::new(router));

        picker.set_neighborhood_query("KALA");
        assert_eq!(picker.neighborhoods().len(), 1);

        picker.open_picker(PointField::Departure);
        assert_eq!(picker.neighborhood_query(), "");
        picker.select_coordinate(Coordinate::new(12.6, -8.0)).await;
        picker.confirm().await;
        picker.open_picker(PointField::Arrival);
        picker.select_coordinate(Coordinate::new(12.5, -7.9)).await;
        picker.confirm().await;
        assert!(!picker.route().is_empty());

        picker.reset();
        assert!(picker.departure().is_none());
        assert!(picker.arrival().is_none());
        assert!(picker.route().is_empty());
    }
}
