use serde::{Deserialize, Serialize};

use crate::passenger::{group_by_purchase, Passenger, PurchaseGroup};
use crate::seat::{Seat, SeatId, SeatInventory};

/// Seating rules applied by [`SeatAllocator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Passengers at or above this age are seated before the minors of their group.
    #[serde(default = "default_adult_age")]
    pub adult_age: u32,
    /// Retry adults left without a seat once the group's minors are placed.
    #[serde(default = "default_reconcile_adults")]
    pub reconcile_adults: bool,
}

fn default_adult_age() -> u32 { 18 }
fn default_reconcile_adults() -> bool { true }

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            adult_age: default_adult_age(),
            reconcile_adults: default_reconcile_adults(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AllocationSummary {
    pub passengers: usize,
    pub assigned: usize,
    pub unassigned: usize,
}

/// Single-pass seat allocator.
///
/// Purchase groups are seated in order of first appearance. Inside a group adults go
/// first, each taking the first free seat of their type; minors then look for a seat
/// sharing a row or column with an adult of the group and fall back to any free seat of
/// their type. Seats are never released during a pass.
#[derive(Debug, Clone, Default)]
pub struct SeatAllocator {
    policy: AllocationPolicy,
}

impl SeatAllocator {
    pub fn new(policy: AllocationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    /// Seats `passengers` against `inventory`, writing each outcome to `seat_id`.
    ///
    /// Any seat already set on a passenger is discarded first. A passenger left with
    /// `seat_id == None` had no eligible seat; that is not an error.
    pub fn allocate(&self, passengers: &mut [Passenger], inventory: &mut SeatInventory) -> AllocationSummary {
        for passenger in passengers.iter_mut() {
            passenger.seat_id = None;
        }

        for group in group_by_purchase(passengers) {
            self.allocate_group(&group, passengers, inventory);
        }

        let assigned = passengers.iter().filter(|p| p.is_seated()).count();
        let summary = AllocationSummary {
            passengers: passengers.len(),
            assigned,
            unassigned: passengers.len() - assigned,
        };

        tracing::debug!(
            passengers = summary.passengers,
            assigned = summary.assigned,
            unassigned = summary.unassigned,
            seats_left = inventory.available_count(),
            "Seat allocation finished"
        );

        summary
    }

    fn allocate_group(&self, group: &PurchaseGroup, passengers: &mut [Passenger], inventory: &mut SeatInventory) {
        let (adults, minors) = group.partition_by_age(passengers, self.policy.adult_age);

        for &i in &adults {
            seat_first_available(&mut passengers[i], inventory);
        }

        for &i in &minors {
            let seat_type_id = passengers[i].seat_type_id;
            let found = adults
                .iter()
                .filter_map(|&a| passengers[a].seat_id)
                .filter_map(|seat_id| inventory.get(seat_id))
                .find_map(|guardian_seat| inventory.find_available_adjacent(seat_type_id, guardian_seat))
                .or_else(|| inventory.find_available(seat_type_id))
                .map(|seat| seat.id);

            if let Some(seat_id) = found {
                occupy(&mut passengers[i], seat_id, inventory);
            }
        }

        if self.policy.reconcile_adults {
            for &i in &adults {
                if !passengers[i].is_seated() {
                    seat_first_available(&mut passengers[i], inventory);
                }
            }
        }

        tracing::trace!(
            purchase_id = group.purchase_id,
            adults = adults.len(),
            minors = minors.len(),
            "Purchase group seated"
        );
    }
}

/// Runs the default policy over a fresh inventory built from `seats`.
pub fn assign_seats(mut passengers: Vec<Passenger>, seats: Vec<Seat>) -> Vec<Passenger> {
    let mut inventory = SeatInventory::new(seats);
    SeatAllocator::default().allocate(&mut passengers, &mut inventory);
    passengers
}

fn seat_first_available(passenger: &mut Passenger, inventory: &mut SeatInventory) {
    let found = inventory.find_available(passenger.seat_type_id).map(|seat| seat.id);
    if let Some(seat_id) = found {
        occupy(passenger, seat_id, inventory);
    }
}

fn occupy(passenger: &mut Passenger, seat_id: SeatId, inventory: &mut SeatInventory) {
    match inventory.mark_occupied(seat_id) {
        Ok(()) => passenger.seat_id = Some(seat_id),
        Err(e) => tracing::error!(passenger_id = passenger.passenger_id, error = %e, "Seat claim failed"),
    }
}
