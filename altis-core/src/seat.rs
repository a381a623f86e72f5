use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type SeatId = i64;
pub type SeatTypeId = i64;

/// A physical seat on an airplane, as loaded from the seat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub row: i32,
    pub column: i32,
    pub seat_type_id: SeatTypeId,
    #[serde(default)]
    pub occupied: bool,
}

impl Seat {
    pub fn new(id: SeatId, row: i32, column: i32, seat_type_id: SeatTypeId) -> Self {
        Self {
            id,
            row,
            column,
            seat_type_id,
            occupied: false,
        }
    }

    /// Shares a row or a column with `other`. Distance is not considered.
    pub fn is_adjacent_to(&self, other: &Seat) -> bool {
        self.row == other.row || self.column == other.column
    }

    fn is_free_for(&self, seat_type_id: SeatTypeId) -> bool {
        !self.occupied && self.seat_type_id == seat_type_id
    }
}

/// Occupancy tracking for the seats of one airplane.
///
/// An inventory lives for a single allocation call: it is built from a fresh snapshot,
/// borrowed mutably by the allocator, then dropped. Seats are kept in (row, column)
/// order, which is the tie-break for every "first available" lookup.
#[derive(Debug, Clone)]
pub struct SeatInventory {
    seats: Vec<Seat>,
    index: HashMap<SeatId, usize>,
}

impl SeatInventory {
    pub fn new(mut seats: Vec<Seat>) -> Self {
        // Stable, so seats sharing a position keep their snapshot order.
        seats.sort_by_key(|seat| (seat.row, seat.column));

        let mut index = HashMap::with_capacity(seats.len());
        let mut unique = Vec::with_capacity(seats.len());
        for seat in seats {
            if index.contains_key(&seat.id) {
                tracing::warn!(seat_id = seat.id, "Duplicate seat in snapshot, ignoring");
                continue;
            }
            index.insert(seat.id, unique.len());
            unique.push(seat);
        }

        Self {
            seats: unique,
            index,
        }
    }

    pub fn get(&self, seat_id: SeatId) -> Option<&Seat> {
        self.index.get(&seat_id).map(|&i| &self.seats[i])
    }

    /// First free seat of the given type.
    pub fn find_available(&self, seat_type_id: SeatTypeId) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.is_free_for(seat_type_id))
    }

    /// First free seat of the given type sharing a row or column with `reference`.
    pub fn find_available_adjacent(&self, seat_type_id: SeatTypeId, reference: &Seat) -> Option<&Seat> {
        self.seats
            .iter()
            .find(|seat| seat.is_free_for(seat_type_id) && seat.is_adjacent_to(reference))
    }

    pub fn mark_occupied(&mut self, seat_id: SeatId) -> Result<(), InventoryError> {
        let i = *self.index.get(&seat_id).ok_or(InventoryError::NotFound(seat_id))?;
        let seat = &mut self.seats[i];

        if seat.occupied {
            return Err(InventoryError::AlreadyOccupied(seat_id));
        }

        seat.occupied = true;
        Ok(())
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn available_count(&self) -> usize {
        self.seats.iter().filter(|seat| !seat.occupied).count()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Seat not found: {0}")]
    NotFound(SeatId),

    #[error("Seat already occupied: {0}")]
    AlreadyOccupied(SeatId),
}
