//! Geocoding, routing and place search against mocked HTTP providers
//!
//! Every provider degrades to a neutral value on failure, so most tests
//! check both the happy path and the fallback.

use ilicoo::config::{IlicooConfig, MapsConfig};
use ilicoo::geo::{
    Coordinate, Geocoder, NominatimGeocoder, OsrmRouter, PlacesClient, RouteProvider,
    ADDRESS_UNAVAILABLE,
};
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn maps_config(server: &MockServer) -> MapsConfig {
    let mut maps = IlicooConfig::default().maps;
    maps.nominatim_url = server.uri();
    maps.osrm_url = server.uri();
    maps.places_url = server.uri();
    maps.google_maps_api_key = Some("test-key".to_string());
    maps.geocoding_requests_per_second = 50;
    maps.search_debounce_ms = 50;
    maps.timeout_seconds = 5;
    maps
}

const HAMDALLAYE: Coordinate = Coordinate::new(12.6337, -8.0059);
const NIAMAKORO: Coordinate = Coordinate::new(12.5854, -7.9502);

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reverse_geocoding_returns_display_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("format", "jsonv2"))
            .and(query_param("lat", "12.6337"))
            .and(query_param("lon", "-8.0059"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "display_name": "Hamdallaye ACI, Commune IV, Bamako, Mali"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&maps_config(&server)).unwrap();
        let address = geocoder.reverse(HAMDALLAYE).await;
        assert_eq!(address, "Hamdallaye ACI, Commune IV, Bamako, Mali");
    }

    #[tokio::test]
    async fn test_reverse_geocoding_failure_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&maps_config(&server)).unwrap();
        assert_eq!(geocoder.reverse(HAMDALLAYE).await, ADDRESS_UNAVAILABLE);
        assert!(geocoder.try_reverse(HAMDALLAYE).await.is_err());
    }

    #[tokio::test]
    async fn test_reverse_geocoding_without_name_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": "Unable to geocode"
            })))
            .mount(&server)
            .await;

        let geocoder = NominatimGeocoder::new(&maps_config(&server)).unwrap();
        assert_eq!(geocoder.reverse(NIAMAKORO).await, ADDRESS_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_driving_route_is_converted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/driving/-8\.0059,12\.6337;-7\.9502,12\.5854$"))
            .and(query_param("overview", "full"))
            .and(query_param("geometries", "geojson"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "Ok",
                "routes": [{
                    "distance": 9876.0,
                    "duration": 1250.0,
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[-8.0059, 12.6337], [-7.98, 12.61], [-7.9502, 12.5854]]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let router = OsrmRouter::new(&maps_config(&server)).unwrap();
        let route = router.driving_route(HAMDALLAYE, NIAMAKORO).await;

        assert_eq!(route.coordinates.len(), 3);
        assert_eq!(route.coordinates[0], HAMDALLAYE);
        assert_eq!(route.distance_km, 9.88);
        assert_eq!(route.duration_min, 21);
        assert_eq!(route.estimated_price(), 3711);
    }

    #[tokio::test]
    async fn test_routing_failure_gives_empty_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/driving/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "NoRoute",
                "routes": []
            })))
            .mount(&server)
            .await;

        let router = OsrmRouter::new(&maps_config(&server)).unwrap();
        let route = router.driving_route(HAMDALLAYE, NIAMAKORO).await;
        assert!(route.is_empty());
        assert_eq!(route.distance_km, 0.0);
        assert_eq!(route.estimated_price(), 1500);
    }

    #[tokio::test]
    async fn test_autocomplete_is_restricted_to_the_country() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/autocomplete/json"))
            .and(query_param("input", "Hamdallaye"))
            .and(query_param("key", "test-key"))
            .and(query_param("components", "country:ml"))
            .and(query_param("language", "fr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "predictions": [{
                    "place_id": "abc123",
                    "description": "Hamdallaye ACI 2000, Bamako, Mali",
                    "structured_formatting": {
                        "main_text": "Hamdallaye ACI 2000",
                        "secondary_text": "Bamako, Mali"
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let places = PlacesClient::new(&maps_config(&server)).unwrap();
        let predictions = places.autocomplete("Hamdallaye").await;
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].place_id, "abc123");
        assert_eq!(predictions[0].structured_formatting.secondary_text, "Bamako, Mali");
    }

    #[tokio::test]
    async fn test_autocomplete_error_status_gives_no_predictions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/autocomplete/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid."
            })))
            .mount(&server)
            .await;

        let places = PlacesClient::new(&maps_config(&server)).unwrap();
        assert!(places.autocomplete("Bamako").await.is_empty());
    }

    #[tokio::test]
    async fn test_short_input_never_hits_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let places = PlacesClient::new(&maps_config(&server)).unwrap();
        assert!(places.autocomplete("B").await.is_empty());
        assert_eq!(places.search(" ").await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_debounced_search_keeps_only_the_latest_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/autocomplete/json"))
            .and(query_param("input", "Bamako"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "predictions": [{
                    "place_id": "bko",
                    "description": "Bamako, Mali",
                    "structured_formatting": { "main_text": "Bamako" }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let places = PlacesClient::new(&maps_config(&server)).unwrap();
        let (first, second) = tokio::join!(places.search("Bam"), async {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            places.search("Bamako").await
        });

        assert_eq!(first, None);
        let second = second.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].structured_formatting.secondary_text, "");
    }

    #[tokio::test]
    async fn test_place_details_resolve_a_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/details/json"))
            .and(query_param("place_id", "abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "result": {
                    "name": "Hamdallaye ACI 2000",
                    "formatted_address": "Hamdallaye ACI 2000, Bamako, Mali",
                    "geometry": { "location": { "lat": 12.6337, "lng": -8.0059 } }
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/details/json"))
            .and(query_param("place_id", "missing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "NOT_FOUND"
            })))
            .mount(&server)
            .await;

        let places = PlacesClient::new(&maps_config(&server)).unwrap();
        let details = places.details("abc123").await.unwrap();
        assert_eq!(details.coordinate(), HAMDALLAYE);
        assert!(places.details("missing").await.is_none());
    }
}
