//! Customer population sampling.
//!
//! Draw order per customer (part of the reproducibility contract):
//! signup date, region, country, segment. Sampling is i.i.d. per
//! customer; no cross-customer dependency.

use crate::calendar::Calendar;
use crate::config::GenConfig;
use crate::error::{GenError, GenResult};
use crate::rng::StageRng;
use crate::types::CustomerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub signup_date: NaiveDate,
    pub region: String,
    pub country: String,
    pub segment: String,
}

/// Generate the full customer population with dense ids 1..count.
///
/// Fails with `EmptyRegion` if any configured region ends up with zero
/// customers: the order stage selects customers per region and would be
/// undefined there.
pub fn generate_customers(
    config: &GenConfig,
    calendar: &Calendar,
    rng: &mut StageRng,
) -> GenResult<Vec<CustomerRecord>> {
    let region_weights: Vec<f64> = config.regions.iter().map(|r| r.population_share).collect();
    let segment_weights: Vec<f64> = config.segments.iter().map(|s| s.share).collect();
    let days = calendar.days();

    let mut customers = Vec::with_capacity(config.customer_count as usize);
    for id in 1..=config.customer_count {
        let signup_date = days[rng.next_u64_below(days.len() as u64) as usize];
        let region = &config.regions[rng.pick_weighted(&region_weights)];
        let country =
            &region.countries[rng.next_u64_below(region.countries.len() as u64) as usize];
        let segment = &config.segments[rng.pick_weighted(&segment_weights)];

        customers.push(CustomerRecord {
            customer_id: id,
            signup_date,
            region: region.code.clone(),
            country: country.clone(),
            segment: segment.name.clone(),
        });
    }

    // Fatal precondition for the order stage: every region populated.
    for region in &config.regions {
        if !customers.iter().any(|c| c.region == region.code) {
            return Err(GenError::EmptyRegion {
                region: region.code.clone(),
            });
        }
    }

    log::info!("customer: generated {} customers", customers.len());
    Ok(customers)
}

/// Index customer ids by region code, preserving id order within a region.
/// The order stage draws uniformly from these pools.
pub fn customers_by_region(customers: &[CustomerRecord]) -> HashMap<String, Vec<CustomerId>> {
    let mut by_region: HashMap<String, Vec<CustomerId>> = HashMap::new();
    for customer in customers {
        by_region
            .entry(customer.region.clone())
            .or_default()
            .push(customer.customer_id);
    }
    by_region
}
