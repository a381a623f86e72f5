use async_trait::async_trait;

use crate::manifest::{AirplaneId, Flight, FlightId, ManifestEntry};
use crate::seat::Seat;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
    #[error("Query failed: {0}")]
    Query(String),
}

/// Read access to flights, their boarding passes and airplane seat maps.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn get_flight(&self, flight_id: FlightId) -> Result<Option<Flight>, RepositoryError>;

    /// Boarding passes of the flight, ordered by boarding pass id.
    async fn list_manifest(&self, flight_id: FlightId) -> Result<Vec<ManifestEntry>, RepositoryError>;

    /// Seats of the airplane ordered by row then column, all unoccupied.
    async fn list_seats(&self, airplane_id: AirplaneId) -> Result<Vec<Seat>, RepositoryError>;
}
