#[cfg(test)]
#[path = "../../../tests/unit/models/problem/depots_test.rs"]
mod depots_test;

use crate::models::common::{Location, Timestamp, Volume};
use std::str::FromStr;

/// Specifies a depot type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DepotKind {
    /// The main plant: inexhaustible.
    Central,
    /// A finite intermediate tank refilled at the start of each simulated day.
    Intermediate,
}

impl FromStr for DepotKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "central" => Ok(Self::Central),
            "intermediate" => Ok(Self::Intermediate),
            _ => Err(format!("unknown depot type: '{value}'")),
        }
    }
}

/// A volume reserved at a tank by a vehicle which plans to arrive there.
#[derive(Clone, Debug, PartialEq)]
pub struct TankReservation {
    /// Vehicle id.
    pub vehicle_id: String,
    /// Reserved volume.
    pub volume: Volume,
    /// Expected arrival time.
    pub arrival: Timestamp,
}

/// A depot or a tank where vehicles refuel.
#[derive(Clone, Debug, PartialEq)]
pub struct Depot {
    /// Depot id.
    pub id: String,
    /// Depot location.
    pub location: Location,
    /// Depot type.
    pub kind: DepotKind,
    /// Maximum capacity, ignored for the central depot.
    pub capacity: Volume,
    /// Currently available volume, ignored for the central depot.
    pub available: Volume,
    /// Outstanding reservations.
    pub reservations: Vec<TankReservation>,
}

impl Depot {
    /// Creates the central depot.
    pub fn central(id: &str, location: Location) -> Self {
        Self {
            id: id.to_string(),
            location,
            kind: DepotKind::Central,
            capacity: Volume::INFINITY,
            available: Volume::INFINITY,
            reservations: vec![],
        }
    }

    /// Creates a full intermediate tank.
    pub fn intermediate(id: &str, location: Location, capacity: Volume) -> Self {
        Self {
            id: id.to_string(),
            location,
            kind: DepotKind::Intermediate,
            capacity,
            available: capacity,
            reservations: vec![],
        }
    }

    /// Returns true for a depot which never runs out.
    pub fn is_inexhaustible(&self) -> bool {
        self.kind == DepotKind::Central
    }

    /// Returns total reserved volume.
    pub fn reserved(&self) -> Volume {
        self.reservations.iter().map(|reservation| reservation.volume).sum()
    }

    /// Returns volume which is neither consumed nor reserved.
    pub fn spare(&self) -> Volume {
        if self.is_inexhaustible() { Volume::INFINITY } else { (self.available - self.reserved()).max(0.) }
    }

    /// Returns spare volume relative to capacity, in `[0, 1]`.
    pub fn spare_ratio(&self) -> f64 {
        if self.is_inexhaustible() {
            1.
        } else if self.capacity > 0. {
            (self.spare() / self.capacity).clamp(0., 1.)
        } else {
            0.
        }
    }

    /// Returns how much of the available volume is already promised, in `[0, 1]`. Tanks which will
    /// be exhausted soon have higher pressure.
    pub fn exhaustion_pressure(&self) -> f64 {
        match self.kind {
            DepotKind::Central => 0.,
            DepotKind::Intermediate if self.available <= 0. => 1.,
            DepotKind::Intermediate => (self.reserved() / self.available).clamp(0., 1.),
        }
    }

    /// Returns true if depot can supply given volume.
    pub fn can_supply(&self, volume: Volume) -> bool {
        self.spare() >= volume
    }

    /// Tries to reserve volume, returns false if there is not enough spare volume.
    pub fn reserve(&mut self, reservation: TankReservation) -> bool {
        if !self.can_supply(reservation.volume) {
            return false;
        }

        if !self.is_inexhaustible() {
            self.reservations.push(reservation);
        }

        true
    }

    /// Turns reservations whose arrival is not after given time into consumption and returns the
    /// consumed volume.
    pub fn consume_due(&mut self, time: Timestamp) -> Volume {
        let (due, outstanding): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.reservations).into_iter().partition(|reservation| reservation.arrival <= time);
        self.reservations = outstanding;

        let consumed = due.iter().map(|reservation| reservation.volume).sum::<Volume>();
        if !self.is_inexhaustible() {
            self.available = (self.available - consumed).max(0.);
        }

        consumed
    }

    /// Refills an intermediate tank to its capacity keeping outstanding reservations.
    pub fn refill(&mut self) {
        if !self.is_inexhaustible() {
            self.available = self.capacity;
        }
    }

    /// Returns a copy of the depot without reservations: a private snapshot for a route builder.
    pub fn snapshot(&self) -> Self {
        Self { reservations: vec![], ..self.clone() }
    }
}
