#[cfg(test)]
#[path = "../../../tests/unit/models/problem/orders_test.rs"]
mod orders_test;

use crate::models::common::{Location, Timestamp, Volume};

/// Specifies order lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderState {
    /// Waiting for a plan.
    Pending,
    /// Part of the best plan.
    Assigned,
    /// Delivered according to the best plan by the end of the simulation.
    Delivered,
    /// Cannot be planned at all, e.g. due to invalid input.
    Unassignable,
}

/// A customer order.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    /// Order id.
    pub id: String,
    /// Destination.
    pub destination: Location,
    /// Requested volume.
    pub volume: Volume,
    /// Registration time.
    pub registered_at: Timestamp,
    /// Delivery deadline.
    pub deadline: Timestamp,
}

impl Order {
    /// Returns time between registration and deadline.
    pub fn lead_time(&self) -> Timestamp {
        self.deadline - self.registered_at
    }

    /// Returns normalized urgency in `[0, 1]` at given time: `min(1, (elapsed / window)^2)`.
    /// Risk grows slowly first and sharply near the deadline.
    pub fn urgency(&self, time: Timestamp) -> f64 {
        let window = self.lead_time();
        if window <= 0. {
            return 1.;
        }

        let elapsed = (time - self.registered_at).max(0.);

        (elapsed / window).powi(2).min(1.)
    }
}
