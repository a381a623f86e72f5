use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use altis_core::manifest::{seat_manifest, FlightId, FlightManifest};
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub data: T,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/flights/{flight_id}/passengers", get(get_flight_passengers))
}

/// GET /flights/:id/passengers
/// Flight details and boarding passes, each with an assigned seat when one was found.
async fn get_flight_passengers(
    State(state): State<AppState>,
    Path(flight_id): Path<FlightId>,
) -> Result<Json<ApiResponse<FlightManifest>>, AppError> {
    let flight = state
        .flight_repo
        .get_flight(flight_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Flight {} not found", flight_id)))?;

    let entries = state.flight_repo.list_manifest(flight_id).await?;
    if entries.is_empty() {
        return Err(AppError::NotFoundError(format!("Flight {} has no boarding passes", flight_id)));
    }

    let seats = state.flight_repo.list_seats(flight.airplane_id).await?;

    // Fresh inventory per request; nothing carries over between calls.
    let (manifest, summary) = seat_manifest(&state.allocator, flight, entries, seats)?;

    info!(
        flight_id,
        passengers = summary.passengers,
        assigned = summary.assigned,
        unassigned = summary.unassigned,
        "Seats assigned"
    );

    Ok(Json(ApiResponse { code: 200, data: manifest }))
}
