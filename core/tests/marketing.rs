//! Marketing table property tests.

use chrono::NaiveDate;
use ecomgen_core::{
    config::GenConfig,
    marketing_generator::expected_order_demand,
    pipeline::GenPipeline,
};

#[test]
fn row_count_is_the_full_cartesian_product() {
    let config = GenConfig::default_test();
    let days = (config.end_date - config.start_date).num_days() as usize + 1;
    let expected = days * config.regions.len() * config.channels.len();

    let dataset = GenPipeline::new(config, 42).unwrap().run().unwrap();
    assert_eq!(dataset.marketing.len(), expected);
}

#[test]
fn spend_and_sessions_respect_their_floors() {
    let dataset = GenPipeline::new(GenConfig::default_test(), 42)
        .unwrap()
        .run()
        .unwrap();
    for row in &dataset.marketing {
        assert!(row.spend >= 50.0, "spend {} below monetary floor", row.spend);
        assert!(row.sessions >= 100, "sessions {} below floor", row.sessions);
    }
}

#[test]
fn single_day_seed_42_scenario() {
    // Degenerate 1-day range: 3 regions x 5 channels = 15 rows exactly.
    let mut config = GenConfig::default_test();
    config.start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    config.end_date = config.start_date;

    let dataset = GenPipeline::new(config, 42).unwrap().run().unwrap();
    assert_eq!(dataset.marketing.len(), 15);
    for row in &dataset.marketing {
        assert!(row.spend >= 50.0);
        assert!(row.sessions >= 100);
    }
}

#[test]
fn triple_key_is_unique() {
    let dataset = GenPipeline::new(GenConfig::default_test(), 9)
        .unwrap()
        .run()
        .unwrap();
    let mut seen = std::collections::HashSet::new();
    for row in &dataset.marketing {
        assert!(
            seen.insert((row.date, row.region.clone(), row.channel.clone())),
            "duplicate (date, region, channel): {} {} {}",
            row.date,
            row.region,
            row.channel
        );
    }
}

#[test]
fn demand_map_sums_sessions_times_conversion() {
    let config = GenConfig::default_test();
    let dataset = GenPipeline::new(config.clone(), 5).unwrap().run().unwrap();
    let demand = expected_order_demand(&config, &dataset.marketing);

    // Recompute one bucket by hand and compare.
    let date = config.start_date;
    let region = &config.regions[0].code;
    let by_hand: f64 = dataset
        .marketing
        .iter()
        .filter(|m| m.date == date && &m.region == region)
        .map(|m| {
            let rate = config
                .channels
                .iter()
                .find(|c| c.name == m.channel)
                .unwrap()
                .conversion_rate;
            m.sessions as f64 * rate
        })
        .sum();
    let from_map = demand[&(date, region.clone())];
    assert!(
        (by_hand - from_map).abs() < 1e-9,
        "demand map {from_map} != hand sum {by_hand}"
    );
}
