use chrono::{TimeZone, Utc};
use daybreak::common::constants::{MESSAGE_LOCATING, MESSAGE_UNAVAILABLE};
use daybreak::core::Core;
use daybreak::core::countdown::{EventKind, compute_next_event};
use daybreak::geo::geocode::{Address, LookupError};
use daybreak::geo::geolocation::{FixedLocator, NetworkLocator};
use daybreak::geo::{
    GeolocationError, Geolocator, NominatimClient, PlaceNameResolver, Position,
    build_http_client, resolve_place_name,
};
use daybreak::state::{AppState, Session};
use daybreak::testing::{FixedSolarCalculator, RecordingSurface, StaticResolver};
use daybreak::time::FixedClock;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn london() -> Position {
    Position::new(51.5, -0.12).unwrap()
}

fn noon() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap())
}

/// Serve one canned HTTP response on a local port.
///
/// Returns the base URL and a handle resolving to the request line received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{addr}/reverse"), handle)
}

fn client() -> reqwest::Client {
    build_http_client(Duration::from_secs(5)).unwrap()
}

#[test]
fn test_london_midday_counts_down_to_sunset() {
    let calc = FixedSolarCalculator::new((8, 0), (16, 0));
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

    let countdown = compute_next_event(now, &london(), &calc);

    assert!(countdown.is_day);
    assert_eq!(countdown.next.kind, EventKind::Sunset);
    assert_eq!(
        countdown.next.instant,
        Utc.with_ymd_and_hms(2024, 3, 10, 16, 0, 0).unwrap()
    );
    assert_eq!(countdown.text(), "04:00:00");
}

#[tokio::test(start_paused = true)]
async fn test_full_session_renders_place_and_countdown() {
    let calc = FixedSolarCalculator::new((8, 0), (16, 0));
    let session = Session::new(calc, Arc::new(noon()));
    let surface = RecordingSurface::new();
    let mut core = Core::new(session, surface.clone());

    let resolver = StaticResolver::answering(Address {
        state: Some("England".to_string()),
        country: Some("United Kingdom".to_string()),
        ..Default::default()
    });
    let shutdown = tokio::time::sleep(Duration::from_millis(2500));

    let state = core
        .run(&FixedLocator::new(london()), Some(resolver), shutdown)
        .await
        .unwrap();
    assert_eq!(state, AppState::Running);

    let recording = surface.recording();
    assert_eq!(recording.statuses, vec![MESSAGE_LOCATING.to_string()]);

    let last = recording.frames.last().unwrap();
    assert_eq!(last.place_name, "England");
    assert_eq!(last.countdown_text, "04:00:00");
    assert_eq!(last.event_label, "Until Sunset");
    assert!(last.is_day);
}

#[tokio::test(start_paused = true)]
async fn test_failed_lookup_shows_coordinates() {
    let calc = FixedSolarCalculator::new((8, 0), (16, 0));
    let session = Session::new(calc, Arc::new(noon()));
    let surface = RecordingSurface::new();
    let mut core = Core::new(session, surface.clone());

    let resolver = StaticResolver::failing(LookupError::Status(503));
    let shutdown = tokio::time::sleep(Duration::from_millis(1500));

    core.run(&FixedLocator::new(london()), Some(resolver), shutdown)
        .await
        .unwrap();

    let recording = surface.recording();
    assert_eq!(recording.frames.last().unwrap().place_name, "51.50°, -0.12°");
}

#[tokio::test]
async fn test_network_permission_denied_stops_session() {
    let calc = FixedSolarCalculator::new((8, 0), (16, 0));
    let session = Session::new(calc, Arc::new(noon()));
    let surface = RecordingSurface::new();
    let mut core = Core::new(session, surface.clone());

    // Never contacted: permission is checked first
    let locator = NetworkLocator::new(client(), "http://127.0.0.1:9/", false);
    let state = core
        .run(&locator, None::<StaticResolver>, std::future::pending())
        .await
        .unwrap();

    assert_eq!(state, AppState::LocationDenied);
    let recording = surface.recording();
    assert_eq!(recording.statuses.last().unwrap(), MESSAGE_UNAVAILABLE);
    assert!(recording.frames.is_empty());
}

#[tokio::test]
async fn test_nominatim_lookup_over_http() {
    let (url, request) = serve_once(
        "200 OK",
        r#"{"place_id":1,"address":{"state":"X","country":"Y"}}"#,
    )
    .await;

    let resolver = NominatimClient::new(client(), url);
    let name = resolve_place_name(&resolver, london()).await;
    assert_eq!(name, "X");

    let request_line = request.await.unwrap();
    assert!(request_line.starts_with("GET /reverse?"));
    assert!(request_line.contains("format=json"));
    assert!(request_line.contains("lat=51.5"));
    assert!(request_line.contains("lon=-0.12"));
}

#[tokio::test]
async fn test_nominatim_server_error_falls_back() {
    let (url, _request) = serve_once("500 Internal Server Error", "{}").await;

    let resolver = NominatimClient::new(client(), url);
    assert!(matches!(
        resolver.lookup(london()).await,
        Err(LookupError::Status(500))
    ));
}

#[tokio::test]
async fn test_nominatim_malformed_body_falls_back() {
    let (url, _request) = serve_once("200 OK", "not json at all").await;

    let resolver = NominatimClient::new(client(), url);
    let name = resolve_place_name(&resolver, london()).await;
    assert_eq!(name, "51.50°, -0.12°");
}

#[tokio::test]
async fn test_nominatim_unreachable_falls_back() {
    // Bind and drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let resolver = NominatimClient::new(client(), format!("http://{addr}/reverse"));
    let name = resolve_place_name(&resolver, london()).await;
    assert_eq!(name, "51.50°, -0.12°");
}

#[tokio::test]
async fn test_network_location_over_http() {
    let (url, _request) = serve_once(
        "200 OK",
        r#"{"status":"success","lat":-33.8688,"lon":151.2093}"#,
    )
    .await;

    let locator = NetworkLocator::new(client(), url, true);
    let position = locator.current_position().await.unwrap();
    assert_eq!(position, Position::new(-33.8688, 151.2093).unwrap());
}

#[tokio::test]
async fn test_network_location_failure_status() {
    let (url, _request) = serve_once(
        "200 OK",
        r#"{"status":"fail","message":"reserved range"}"#,
    )
    .await;

    let locator = NetworkLocator::new(client(), url, true);
    assert_eq!(
        locator.current_position().await,
        Err(GeolocationError::PositionUnavailable(
            "reserved range".to_string()
        ))
    );
}
