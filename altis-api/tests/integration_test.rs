use std::collections::HashMap;
use std::sync::Arc;

use altis_api::{app, AppState};
use altis_core::manifest::{AirplaneId, Flight, FlightId, ManifestEntry};
use altis_core::{FlightRepository, RepositoryError, Seat, SeatAllocator};
use altis_shared::Masked;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

#[derive(Clone, Copy)]
enum Failure {
    Unavailable,
    Query,
}

#[derive(Default)]
struct InMemoryFlightRepository {
    flights: HashMap<FlightId, Flight>,
    manifests: HashMap<FlightId, Vec<ManifestEntry>>,
    seats: HashMap<AirplaneId, Vec<Seat>>,
    failure: Option<Failure>,
}

impl InMemoryFlightRepository {
    fn check(&self) -> Result<(), RepositoryError> {
        match self.failure {
            Some(Failure::Unavailable) => Err(RepositoryError::Unavailable("connection refused".into())),
            Some(Failure::Query) => Err(RepositoryError::Query("column \"dni\" does not exist".into())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FlightRepository for InMemoryFlightRepository {
    async fn get_flight(&self, flight_id: FlightId) -> Result<Option<Flight>, RepositoryError> {
        self.check()?;
        Ok(self.flights.get(&flight_id).cloned())
    }

    async fn list_manifest(&self, flight_id: FlightId) -> Result<Vec<ManifestEntry>, RepositoryError> {
        self.check()?;
        Ok(self.manifests.get(&flight_id).cloned().unwrap_or_default())
    }

    async fn list_seats(&self, airplane_id: AirplaneId) -> Result<Vec<Seat>, RepositoryError> {
        self.check()?;
        Ok(self.seats.get(&airplane_id).cloned().unwrap_or_default())
    }
}

fn boarding_pass(boarding_pass_id: i64, purchase_id: i64, age: i32, seat_type_id: i64) -> ManifestEntry {
    ManifestEntry {
        passenger_id: 900 + boarding_pass_id,
        dni: Masked(format!("{}", 40000000 + boarding_pass_id)),
        name: format!("Passenger {}", boarding_pass_id),
        age,
        country: "Perú".to_string(),
        boarding_pass_id,
        purchase_id,
        seat_type_id,
        seat_id: None,
    }
}

fn seeded_repository() -> InMemoryFlightRepository {
    let mut repo = InMemoryFlightRepository::default();

    repo.flights.insert(
        1,
        Flight {
            flight_id: 1,
            takeoff_date_time: Utc.timestamp_opt(1688207580, 0).unwrap(),
            takeoff_airport: "Aeropuerto Internacional Arturo Merino Benitez, Chile".to_string(),
            landing_date_time: Utc.timestamp_opt(1688221980, 0).unwrap(),
            landing_airport: "Aeropuerto Internacional Jorge Chávez, Perú".to_string(),
            airplane_id: 7,
        },
    );
    repo.manifests.insert(
        1,
        vec![
            boarding_pass(1, 50, 36, 2),
            boarding_pass(2, 60, 52, 2),
            boarding_pass(3, 50, 9, 2),
            boarding_pass(4, 70, 28, 3),
        ],
    );
    repo.seats.insert(
        7,
        vec![
            Seat::new(101, 1, 1, 2),
            Seat::new(102, 1, 2, 2),
            Seat::new(103, 2, 1, 2),
            Seat::new(104, 5, 5, 1),
        ],
    );

    repo
}

fn state_with(repo: InMemoryFlightRepository) -> AppState {
    AppState::new(Arc::new(repo), SeatAllocator::default())
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
    let response = app(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_passengers_receive_seats() {
    let (status, body) = get(state_with(seeded_repository()), "/flights/1/passengers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);

    let data = &body["data"];
    assert_eq!(data["flightId"], 1);
    assert_eq!(data["takeoffDateTime"], 1688207580);
    assert_eq!(data["landingDateTime"], 1688221980);
    assert_eq!(data["airplaneId"], 7);

    let passengers = data["passengers"].as_array().unwrap();
    assert_eq!(passengers.len(), 4);

    // Purchase 50 is seen first: its adult takes 101, the child sits on row 1 at 102.
    // Purchase 60 gets what is left, purchase 70 asks for a type with no seats.
    let seat_ids: Vec<&Value> = passengers.iter().map(|p| &p["seatId"]).collect();
    assert_eq!(seat_ids, vec![&Value::from(101), &Value::from(103), &Value::from(102), &Value::Null]);

    assert_eq!(passengers[0]["boardingPassId"], 1);
    assert_eq!(passengers[0]["purchaseId"], 50);
    assert_eq!(passengers[0]["seatTypeId"], 2);
    assert_eq!(passengers[0]["dni"], "40000001");
    assert_eq!(passengers[0]["country"], "Perú");
}

#[tokio::test]
async fn test_unknown_flight_is_not_found() {
    let (status, body) = get(state_with(seeded_repository()), "/flights/99/passengers").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "code": 404, "data": {} }));
}

#[tokio::test]
async fn test_flight_without_boarding_passes_is_not_found() {
    let mut repo = seeded_repository();
    repo.manifests.clear();

    let (status, body) = get(state_with(repo), "/flights/1/passengers").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "code": 404, "data": {} }));
}

#[tokio::test]
async fn test_stored_boarding_pass_seat_does_not_jump_the_queue() {
    let mut repo = seeded_repository();
    let mut late = boarding_pass(2, 60, 44, 1);
    late.seat_id = Some(104);
    repo.manifests.insert(1, vec![boarding_pass(1, 50, 36, 1), late]);

    let (status, body) = get(state_with(repo), "/flights/1/passengers").await;

    assert_eq!(status, StatusCode::OK);
    let passengers = body["data"]["passengers"].as_array().unwrap();
    assert_eq!(passengers[0]["seatId"], 104);
    assert!(passengers[1]["seatId"].is_null());
}

#[tokio::test]
async fn test_unreachable_database_is_reported() {
    let mut repo = seeded_repository();
    repo.failure = Some(Failure::Unavailable);

    let (status, body) = get(state_with(repo), "/flights/1/passengers").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "code": 400, "errors": "could not connect to db" }));
}

#[tokio::test]
async fn test_query_failure_is_internal_error() {
    let mut repo = seeded_repository();
    repo.failure = Some(Failure::Query);

    let (status, body) = get(state_with(repo), "/flights/1/passengers").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert_eq!(body["errors"], "internal server error");
}

#[tokio::test]
async fn test_negative_age_is_internal_error() {
    let mut repo = seeded_repository();
    repo.manifests.insert(1, vec![boarding_pass(1, 50, -3, 2)]);

    let (status, _) = get(state_with(repo), "/flights/1/passengers").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_non_numeric_flight_id_is_rejected() {
    let (status, _) = get(state_with(seeded_repository()), "/flights/abc/passengers").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_each_request_starts_from_a_fresh_inventory() {
    let state = state_with(seeded_repository());

    let (_, first) = get(state.clone(), "/flights/1/passengers").await;
    let (_, second) = get(state, "/flights/1/passengers").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(state_with(InMemoryFlightRepository::default()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
