//! Json format of the dispatch problem and its solution.

pub mod problem;
pub mod solution;

use lpg_core::models::common::Location;
use lpg_core::prelude::GenericError;

/// A grid location in json: `[x, y]`.
pub type Coordinate = (i32, i32);

pub(crate) fn to_location(coordinate: &Coordinate) -> Location {
    Location::from(*coordinate)
}

pub(crate) fn to_coordinate(location: &Location) -> Coordinate {
    (location.x, location.y)
}

pub(crate) fn to_format_error(err: serde_json::Error, description: &str) -> GenericError {
    format!("cannot deserialize {description}: '{err}'").into()
}
