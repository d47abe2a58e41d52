#[cfg(test)]
#[path = "../../../tests/unit/aco/ant/selection_test.rs"]
mod selection_test;

use super::OrderCluster;
use crate::models::common::{Location, Volume};
use crate::models::problem::{Order, Vehicle};
use crate::models::solution::{UnassignedOrder, UnassignedReason};
use crate::utils::Random;
use std::sync::Arc;

/// Clusters assigned to a single vehicle, in the order they are served.
#[derive(Clone, Debug)]
pub struct VehiclePlan {
    /// A private copy of the vehicle.
    pub vehicle: Vehicle,
    /// Assigned clusters.
    pub clusters: Vec<OrderCluster>,
}

/// Assigns clusters to vehicles. A vehicle with the lowest score among those which still fit the
/// cluster wins: score is the capacity left unused relative to capacity minus a bonus for a lower
/// fuel level. A vehicle may take further clusters while its remaining capacity fits them.
pub fn assign_clusters(
    clusters: Vec<OrderCluster>,
    vehicles: &[Vehicle],
    low_fuel_bonus: f64,
) -> (Vec<VehiclePlan>, Vec<UnassignedOrder>) {
    let mut remaining = vehicles.iter().map(|vehicle| vehicle.capacity).collect::<Vec<Volume>>();
    let mut plan_indices: Vec<Option<usize>> = vec![None; vehicles.len()];
    let mut plans: Vec<VehiclePlan> = Vec::new();
    let mut unassigned = Vec::new();

    for cluster in clusters {
        let best = vehicles
            .iter()
            .enumerate()
            .filter(|(idx, _)| remaining[*idx] >= cluster.volume)
            .map(|(idx, vehicle)| {
                let slack = (remaining[idx] - cluster.volume) / vehicle.capacity.max(f64::EPSILON);
                (idx, slack - low_fuel_bonus * (1. - vehicle.fuel_ratio()))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx);

        let Some(vehicle_idx) = best else {
            unassigned.extend(
                cluster
                    .orders
                    .into_iter()
                    .map(|order| UnassignedOrder { order, reason: UnassignedReason::NoFittingVehicle }),
            );
            continue;
        };

        remaining[vehicle_idx] -= cluster.volume;

        match plan_indices[vehicle_idx] {
            Some(plan_idx) => plans[plan_idx].clusters.push(cluster),
            None => {
                plan_indices[vehicle_idx] = Some(plans.len());
                plans.push(VehiclePlan { vehicle: vehicles[vehicle_idx].clone(), clusters: vec![cluster] });
            }
        }
    }

    (plans, unassigned)
}

/// A reachable next order with its path and desirability.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Order to deliver.
    pub order: Arc<Order>,
    /// Path from the current vehicle position.
    pub path: Vec<Location>,
    /// Desirability of the move.
    pub score: f64,
}

/// Blends each candidate score with the best score reachable from its destination.
pub fn apply_lookahead<F>(candidates: &mut [Candidate], weight: f64, next_score: F)
where
    F: Fn(&Candidate, &Candidate) -> f64,
{
    if candidates.len() < 2 {
        return;
    }

    let blended = candidates
        .iter()
        .enumerate()
        .map(|(idx, current)| {
            candidates
                .iter()
                .enumerate()
                .filter(|(other_idx, _)| *other_idx != idx)
                .map(|(_, next)| next_score(current, next))
                .max_by(|a, b| a.total_cmp(b))
                .map_or(current.score, |best_next| (1. - weight) * current.score + weight * best_next)
        })
        .collect::<Vec<_>>();

    candidates.iter_mut().zip(blended).for_each(|(candidate, score)| candidate.score = score);
}

/// Chooses a candidate index: with probability `q0` the best one, otherwise proportionally to scores.
pub fn choose_candidate(candidates: &[Candidate], q0: f64, random: &dyn Random) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }

    if random.is_hit(q0) {
        candidates
            .iter()
            .enumerate()
            .rev()
            .max_by(|(_, a), (_, b)| a.score.total_cmp(&b.score))
            .map(|(idx, _)| idx)
    } else {
        let weights = candidates.iter().map(|candidate| candidate.score).collect::<Vec<_>>();
        Some(random.weighted(weights.as_slice()))
    }
}
