use super::*;

#[test]
fn can_validate_default_config() {
    assert!(AcoConfig::default().validate().is_ok());
}

parameterized_test! {can_reject_invalid_config, modify, {
    let mut config = AcoConfig::default();
    let modify: fn(&mut AcoConfig) = modify;
    modify(&mut config);

    assert!(config.validate().is_err());
}}

can_reject_invalid_config! {
    case_01_no_iterations: |config: &mut AcoConfig| config.search.max_iterations = 0,
    case_02_no_ants: |config: &mut AcoConfig| config.colony.ant_count = 0,
    case_03_evaporation_one: |config: &mut AcoConfig| config.pheromone.evaporation_rate = 1.,
    case_04_evaporation_zero: |config: &mut AcoConfig| config.pheromone.evaporation_rate = 0.,
    case_05_q0: |config: &mut AcoConfig| config.search.q0 = 1.5,
    case_06_zero_floor: |config: &mut AcoConfig| config.pheromone.floor = 0.,
    case_07_ant_bounds: |config: &mut AcoConfig| config.timing.min_ants = 50,
    case_08_speed: |config: &mut AcoConfig| config.routing.average_speed = 0.,
    case_09_threads: |config: &mut AcoConfig| config.colony.max_threads = Some(0),
    case_10_margin: |config: &mut AcoConfig| config.routing.fuel_safety_margin = 1.2,
}

parameterized_test! {can_parse_pheromone_update, (value, expected), {
    assert_eq!(value.parse::<PheromoneUpdate>().ok(), expected);
}}

can_parse_pheromone_update! {
    case_01: ("all-candidates", Some(PheromoneUpdate::AllCandidates)),
    case_02: ("iteration-best", Some(PheromoneUpdate::IterationBest)),
    case_03: ("best", None),
}

#[test]
fn can_display_pheromone_update_as_parsable_name() {
    let update = PheromoneUpdate::IterationBest;

    assert_eq!(update.to_string().parse::<PheromoneUpdate>(), Ok(update));
}
