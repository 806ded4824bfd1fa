//! Customer population property tests.

use ecomgen_core::{config::GenConfig, pipeline::GenPipeline};
use std::collections::HashMap;

fn generate(seed: u64) -> ecomgen_core::dataset::Dataset {
    GenPipeline::new(GenConfig::default_test(), seed)
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn ids_are_dense_from_one() {
    let dataset = generate(42);
    let config = GenConfig::default_test();
    assert_eq!(dataset.customers.len(), config.customer_count as usize);
    for (i, customer) in dataset.customers.iter().enumerate() {
        assert_eq!(
            customer.customer_id,
            (i + 1) as u32,
            "customer ids must be dense 1..N"
        );
    }
}

#[test]
fn country_belongs_to_the_customers_region() {
    let dataset = generate(42);
    let config = GenConfig::default_test();
    let countries: HashMap<&str, &Vec<String>> = config
        .regions
        .iter()
        .map(|r| (r.code.as_str(), &r.countries))
        .collect();

    for customer in &dataset.customers {
        let list = countries
            .get(customer.region.as_str())
            .unwrap_or_else(|| panic!("unknown region '{}'", customer.region));
        assert!(
            list.contains(&customer.country),
            "customer {} has country '{}' outside region '{}'",
            customer.customer_id,
            customer.country,
            customer.region
        );
    }
}

#[test]
fn signup_dates_fall_within_the_calendar() {
    let dataset = generate(7);
    let config = GenConfig::default_test();
    for customer in &dataset.customers {
        assert!(
            customer.signup_date >= config.start_date && customer.signup_date <= config.end_date,
            "signup {} outside {}..{}",
            customer.signup_date,
            config.start_date,
            config.end_date
        );
    }
}

#[test]
fn every_region_is_populated() {
    let dataset = generate(11);
    let config = GenConfig::default_test();
    for region in &config.regions {
        let count = dataset
            .customers
            .iter()
            .filter(|c| c.region == region.code)
            .count();
        assert!(count > 0, "region '{}' received no customers", region.code);
    }
}

#[test]
fn segments_are_drawn_from_the_configured_set() {
    let dataset = generate(3);
    let config = GenConfig::default_test();
    for customer in &dataset.customers {
        assert!(
            config.segments.iter().any(|s| s.name == customer.segment),
            "unknown segment '{}'",
            customer.segment
        );
    }
}
