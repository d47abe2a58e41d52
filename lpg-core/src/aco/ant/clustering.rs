#[cfg(test)]
#[path = "../../../tests/unit/aco/ant/clustering_test.rs"]
mod clustering_test;

use crate::aco::GroupingConfig;
use crate::models::common::{Timestamp, Volume};
use crate::models::problem::Order;
use crate::utils::Random;
use std::sync::Arc;

/// A group of nearby orders served by one vehicle in one go.
#[derive(Clone, Debug)]
pub struct OrderCluster {
    /// Orders in the group, the seed order first.
    pub orders: Vec<Arc<Order>>,
    /// Combined volume.
    pub volume: Volume,
    /// Urgency of the most urgent member.
    pub urgency: f64,
}

/// Groups orders by proximity and sorts groups by their most urgent member, most urgent first.
/// The first unclustered order seeds a group, then the closest unclustered orders within a randomized
/// threshold are added greedily while group size and volume limits hold.
pub fn cluster_orders(
    orders: &[Arc<Order>],
    config: &GroupingConfig,
    time: Timestamp,
    random: &dyn Random,
) -> Vec<OrderCluster> {
    let mut is_clustered = vec![false; orders.len()];
    let mut clusters = Vec::new();

    for seed_idx in 0..orders.len() {
        if is_clustered[seed_idx] {
            continue;
        }
        is_clustered[seed_idx] = true;

        let seed = &orders[seed_idx];
        let threshold = config.proximity_threshold as f64 * random.uniform_real(0.8, 1.2);

        let mut nearby = orders
            .iter()
            .enumerate()
            .filter(|(idx, _)| !is_clustered[*idx])
            .map(|(idx, order)| (idx, order.destination.manhattan(&seed.destination)))
            .filter(|(_, distance)| *distance as f64 <= threshold)
            .collect::<Vec<_>>();
        nearby.sort_by_key(|(_, distance)| *distance);

        let mut cluster = OrderCluster { orders: vec![seed.clone()], volume: seed.volume, urgency: seed.urgency(time) };

        for (idx, _) in nearby {
            if cluster.orders.len() >= config.max_group_size {
                break;
            }

            let order = &orders[idx];
            if cluster.volume + order.volume > config.max_group_volume {
                continue;
            }

            is_clustered[idx] = true;
            cluster.volume += order.volume;
            cluster.urgency = cluster.urgency.max(order.urgency(time));
            cluster.orders.push(order.clone());
        }

        clusters.push(cluster);
    }

    clusters.sort_by(|a, b| b.urgency.total_cmp(&a.urgency));

    clusters
}
