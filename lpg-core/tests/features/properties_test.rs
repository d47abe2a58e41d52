use crate::aco::{PenaltyConfig, RoutingConfig, SolutionEvaluator};
use crate::graph::RouteGraph;
use crate::helpers::models::*;
use crate::helpers::solver::{build_solution, create_graph, test_config};
use crate::models::common::{Location, Timestamp};
use crate::models::problem::GridSize;
use crate::models::solution::{LegKind, RouteLeg, Solution, VehicleAssignment};
use proptest::prelude::*;

fn late_solution(deadline: Timestamp) -> Solution {
    let order = test_order_with_window("c1", (0, 5), 5., 0., deadline);
    let path = (0..=5).map(|y| Location::new(0, y)).collect::<Vec<_>>();

    Solution {
        assignments: vec![VehicleAssignment {
            vehicle: test_vehicle("v1"),
            orders: vec![order.clone()],
            legs: vec![RouteLeg {
                origin: Location::new(0, 0),
                destination: Location::new(0, 5),
                path,
                arrival: 5.,
                kind: LegKind::Delivery(order),
            }],
            total_distance: 5,
            fuel_consumed: 0.,
        }],
        unassigned: vec![],
        quality: 0.,
    }
}

proptest! {
    #[test]
    fn can_ignore_blockage_outside_its_interval(
        start in 0_f64..1000.,
        duration in 1_f64..500.,
        offset in 0_f64..100.,
        is_before in any::<bool>(),
        x in 1_i32..9,
        y in 0_i32..10,
    ) {
        let end = start + duration;
        let blockage = test_blockage(start, end, &[(x, y), (x, y + 1)]);
        let graph = RouteGraph::new(GridSize::new(10, 10), vec![blockage], 50.);
        let time = if is_before { start - offset - 0.01 } else { end + offset };
        let location = Location::new(x, y);

        prop_assert!(!graph.is_blocked(&location, time));
        prop_assert!(!graph.is_blocked_edge(&Location::new(x - 1, y), &location, time));
        prop_assert!(graph.is_blocked(&location, start));
    }

    #[test]
    fn can_evaluate_same_solution_to_same_quality(seed in any::<u64>()) {
        let problem = test_problem(
            vec![test_vehicle("v1"), test_vehicle("v2")],
            vec![test_order("c1", (3, 7), 6.), test_order("c2", (12, 4), 8.), test_order("c3", (15, 15), 9.)],
        );
        let config = test_config();
        let graph = create_graph(&problem, &config);
        let evaluator = SolutionEvaluator::new(&graph, &[], &config.routing, &config.penalties);

        let solution = build_solution(&problem, &config, seed);
        let first = evaluator.evaluate(&solution, problem.start_time);
        let second = evaluator.evaluate(&solution, problem.start_time);

        prop_assert_eq!(first, second);
        prop_assert_eq!(first, solution.quality);
    }

    #[test]
    fn can_lower_quality_with_extra_late_minute(late in 0_u32..1000) {
        let graph = RouteGraph::new(GridSize::new(10, 10), vec![], 60.);
        let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
        let evaluator = SolutionEvaluator::new(&graph, &[], &routing, &penalties);
        let arrival = 5.;

        let quality = evaluator.evaluate(&late_solution(arrival - late as f64), 0.);
        let later = evaluator.evaluate(&late_solution(arrival - late as f64 - 1.), 0.);

        prop_assert!(later < quality);
    }
}
