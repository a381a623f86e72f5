use altis_shared::Masked;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::allocation::{AllocationSummary, SeatAllocator};
use crate::passenger::{Passenger, PassengerId, PurchaseId};
use crate::seat::{Seat, SeatId, SeatInventory, SeatTypeId};
use crate::{CoreError, CoreResult};

pub type FlightId = i64;
pub type AirplaneId = i64;
pub type BoardingPassId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub flight_id: FlightId,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub takeoff_date_time: DateTime<Utc>,
    pub takeoff_airport: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub landing_date_time: DateTime<Utc>,
    pub landing_airport: String,
    pub airplane_id: AirplaneId,
}

/// One boarding pass on a flight, joined with its passenger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub passenger_id: PassengerId,
    pub dni: Masked<String>,
    pub name: String,
    pub age: i32,
    pub country: String,
    pub boarding_pass_id: BoardingPassId,
    pub purchase_id: PurchaseId,
    pub seat_type_id: SeatTypeId,
    pub seat_id: Option<SeatId>,
}

impl TryFrom<&ManifestEntry> for Passenger {
    type Error = CoreError;

    fn try_from(entry: &ManifestEntry) -> Result<Self, Self::Error> {
        let age = u32::try_from(entry.age).map_err(|_| {
            CoreError::ValidationError(format!(
                "boarding pass {} has negative passenger age {}",
                entry.boarding_pass_id, entry.age
            ))
        })?;

        Ok(Passenger {
            passenger_id: entry.passenger_id,
            purchase_id: entry.purchase_id,
            age,
            seat_type_id: entry.seat_type_id,
            seat_id: None,
        })
    }
}

/// Flight details with every boarding pass and its final seat.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightManifest {
    #[serde(flatten)]
    pub flight: Flight,
    pub passengers: Vec<ManifestEntry>,
}

/// Copies each allocated seat onto the manifest entry at the same position.
pub fn assemble(flight: Flight, mut entries: Vec<ManifestEntry>, allocated: &[Passenger]) -> CoreResult<FlightManifest> {
    if entries.len() != allocated.len() {
        return Err(CoreError::InternalError(format!(
            "manifest has {} entries but {} passengers were allocated",
            entries.len(),
            allocated.len()
        )));
    }

    for (entry, passenger) in entries.iter_mut().zip(allocated) {
        if entry.passenger_id != passenger.passenger_id {
            return Err(CoreError::InternalError(format!(
                "boarding pass {} belongs to passenger {}, allocation is for passenger {}",
                entry.boarding_pass_id, entry.passenger_id, passenger.passenger_id
            )));
        }
        entry.seat_id = passenger.seat_id;
    }

    Ok(FlightManifest { flight, passengers: entries })
}

/// Seats a flight's manifest against a fresh inventory built from `seats`.
pub fn seat_manifest(
    allocator: &SeatAllocator,
    flight: Flight,
    entries: Vec<ManifestEntry>,
    seats: Vec<Seat>,
) -> CoreResult<(FlightManifest, AllocationSummary)> {
    let mut passengers = entries
        .iter()
        .map(Passenger::try_from)
        .collect::<CoreResult<Vec<_>>>()?;

    let mut inventory = SeatInventory::new(seats);
    let summary = allocator.allocate(&mut passengers, &mut inventory);

    let manifest = assemble(flight, entries, &passengers)?;
    Ok((manifest, summary))
}
