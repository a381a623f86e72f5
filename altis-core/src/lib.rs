pub mod seat;
pub mod passenger;
pub mod allocation;
pub mod manifest;
pub mod repository;

pub use allocation::{assign_seats, AllocationPolicy, AllocationSummary, SeatAllocator};
pub use manifest::{Flight, FlightManifest, ManifestEntry};
pub use passenger::{group_by_purchase, Passenger, PurchaseGroup};
pub use repository::{FlightRepository, RepositoryError};
pub use seat::{InventoryError, Seat, SeatInventory};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
