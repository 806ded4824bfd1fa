//! Order generation: the stage where marketing demand, seasonality, and
//! regional logistics meet.
//!
//! Per (date, region): blend the organic seasonal baseline with
//! marketing-attributed demand, draw a Poisson order count, then sample
//! each order's customer, channel, basket, timeline, and return flag.
//! Order ids are one monotone counter across the whole run.

use crate::calendar::Calendar;
use crate::config::{GenConfig, ReturnPolicy};
use crate::customer_generator::{customers_by_region, CustomerRecord};
use crate::error::{GenError, GenResult};
use crate::rng::StageRng;
use crate::types::{round2, CustomerId, OrderId};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: NaiveDate,
    pub ship_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub promised_delivery_date: NaiveDate,
    pub region: String,
    pub country: String,
    pub channel: String,
    pub items: u32,
    pub revenue: f64,
    pub cogs: f64,
    pub returned_flag: bool,
}

impl OrderRecord {
    /// Derivable, not stored: delivered within the promised window.
    pub fn on_time(&self) -> bool {
        self.delivery_date <= self.promised_delivery_date
    }
}

/// Probability that an order is returned.
///
/// Rises with each day of actual lead time beyond the regional mean and
/// carries a flat penalty on every channel except the penalty-free one.
/// Always clamped to the policy bounds.
pub fn return_probability(
    policy: &ReturnPolicy,
    lead_days: i64,
    region_lead_mean: f64,
    channel: &str,
) -> f64 {
    let penalty = if channel == policy.penalty_free_channel {
        0.0
    } else {
        policy.channel_penalty
    };
    let raw = policy.base_probability
        + (lead_days as f64 - region_lead_mean) * policy.lead_deviation_weight
        + penalty;
    raw.clamp(policy.min_probability, policy.max_probability)
}

/// Generate all orders for the run.
///
/// `demand` is the precomputed (date, region) -> expected-order-demand map
/// from the marketing stage. Every region must have at least one customer
/// in `customers`; `EmptyRegion` otherwise.
pub fn generate_orders(
    config: &GenConfig,
    calendar: &Calendar,
    customers: &[CustomerRecord],
    demand: &HashMap<(NaiveDate, String), f64>,
    rng: &mut StageRng,
) -> GenResult<Vec<OrderRecord>> {
    let by_region = customers_by_region(customers);
    for region in &config.regions {
        if by_region.get(&region.code).map_or(true, |pool| pool.is_empty()) {
            return Err(GenError::EmptyRegion {
                region: region.code.clone(),
            });
        }
    }

    let channel_shares: Vec<f64> = config.channels.iter().map(|c| c.order_share).collect();
    let econ = &config.orders;
    let mut orders = Vec::new();
    let mut next_order_id: OrderId = 1;

    for &date in calendar.days() {
        let month_mult = calendar.month_multiplier(date);
        let weekday_mult = calendar.weekday_multiplier(date);

        for region in &config.regions {
            let base_orders = region.base_daily_orders * month_mult * weekday_mult;
            let from_marketing = demand
                .get(&(date, region.code.clone()))
                .copied()
                .unwrap_or(0.0);

            let expected_orders = rng
                .normal(
                    base_orders + from_marketing * econ.marketing_attribution,
                    (base_orders + 50.0) * econ.expected_noise_ratio,
                )
                .max(econ.expected_orders_floor);
            let lambda = expected_orders.max(econ.order_count_floor as f64);
            let n_orders = rng.poisson(lambda).max(econ.order_count_floor);

            let pool = &by_region[&region.code];
            for _ in 0..n_orders {
                let customer_id = pool[rng.next_u64_below(pool.len() as u64) as usize];
                // Shipping destination: any country in the region. It need
                // not match the customer's own stored country.
                let country = &region.countries
                    [rng.next_u64_below(region.countries.len() as u64) as usize];
                let channel = &config.channels[rng.pick_weighted(&channel_shares)];

                let items = rng.int_in(1, econ.max_items) as u32;
                let price_per_item =
                    rng.log_normal(econ.price_log_mean, econ.price_log_std_dev);
                let revenue = round2(items as f64 * price_per_item);
                let cogs = round2(
                    revenue * rng.uniform_in(econ.cogs_ratio_min, econ.cogs_ratio_max),
                );

                let ship_date =
                    date + Duration::days(rng.int_in(0, econ.max_ship_offset_days));
                let lead_days = rng
                    .normal(region.lead_time_mean, region.lead_time_std_dev)
                    .max(1.0) as i64;
                let delivery_date = ship_date + Duration::days(lead_days);
                let promised_delivery_date = ship_date + Duration::days(region.sla_days);

                let p_return = return_probability(
                    &config.returns,
                    lead_days,
                    region.lead_time_mean,
                    &channel.name,
                );
                let returned_flag = rng.chance(p_return);

                orders.push(OrderRecord {
                    order_id: next_order_id,
                    customer_id,
                    order_date: date,
                    ship_date,
                    delivery_date,
                    promised_delivery_date,
                    region: region.code.clone(),
                    country: country.clone(),
                    channel: channel.name.clone(),
                    items,
                    revenue,
                    cogs,
                    returned_flag,
                });
                next_order_id += 1;
            }
        }
    }

    log::info!("order: generated {} orders", orders.len());
    Ok(orders)
}
