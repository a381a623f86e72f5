use std::sync::Arc;
use altis_core::{FlightRepository, SeatAllocator};

#[derive(Clone)]
pub struct AppState {
    pub flight_repo: Arc<dyn FlightRepository>,
    pub allocator: Arc<SeatAllocator>,
}

impl AppState {
    pub fn new(flight_repo: Arc<dyn FlightRepository>, allocator: SeatAllocator) -> Self {
        Self {
            flight_repo,
            allocator: Arc::new(allocator),
        }
    }
}
