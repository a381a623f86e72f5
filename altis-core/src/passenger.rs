use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::seat::{SeatId, SeatTypeId};

pub type PassengerId = i64;
pub type PurchaseId = i64;

/// The allocator's view of a passenger on a boarding pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub passenger_id: PassengerId,
    pub purchase_id: PurchaseId,
    pub age: u32,
    pub seat_type_id: SeatTypeId,
    pub seat_id: Option<SeatId>,
}

impl Passenger {
    pub fn new(passenger_id: PassengerId, purchase_id: PurchaseId, age: u32, seat_type_id: SeatTypeId) -> Self {
        Self {
            passenger_id,
            purchase_id,
            age,
            seat_type_id,
            seat_id: None,
        }
    }

    pub fn is_seated(&self) -> bool {
        self.seat_id.is_some()
    }
}

/// Passengers who bought their tickets together.
///
/// Members are stored as positions in the passenger slice the group was built from,
/// in their original relative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseGroup {
    pub purchase_id: PurchaseId,
    pub members: Vec<usize>,
}

impl PurchaseGroup {
    pub fn passengers<'a>(&'a self, passengers: &'a [Passenger]) -> impl Iterator<Item = &'a Passenger> + 'a {
        self.members.iter().map(move |&i| &passengers[i])
    }

    /// Splits members into (adults, minors), both in group order.
    pub fn partition_by_age(&self, passengers: &[Passenger], adult_age: u32) -> (Vec<usize>, Vec<usize>) {
        self.members
            .iter()
            .copied()
            .partition(|&i| passengers[i].age >= adult_age)
    }
}

/// Groups passengers by purchase, in order of first appearance.
pub fn group_by_purchase(passengers: &[Passenger]) -> Vec<PurchaseGroup> {
    let mut groups: Vec<PurchaseGroup> = Vec::new();
    let mut slots: HashMap<PurchaseId, usize> = HashMap::new();

    for (i, passenger) in passengers.iter().enumerate() {
        let slot = *slots.entry(passenger.purchase_id).or_insert_with(|| {
            groups.push(PurchaseGroup {
                purchase_id: passenger.purchase_id,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(i);
    }

    groups
}
