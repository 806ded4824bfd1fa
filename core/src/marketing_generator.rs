//! Marketing spend and session series.
//!
//! One row per (date, region, channel), the full Cartesian product,
//! iterated date-outer / region / channel-inner. That iteration order is
//! part of the reproducibility contract.

use crate::calendar::Calendar;
use crate::config::GenConfig;
use crate::rng::StageRng;
use crate::types::round2;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingRecord {
    pub date: NaiveDate,
    pub region: String,
    pub channel: String,
    pub spend: f64,
    pub sessions: i64,
}

/// Generate the full marketing table.
///
/// Spend is Gaussian around channel_base * month * region, floored at the
/// monetary floor; sessions are Gaussian around spend * efficiency,
/// floored and truncated to an integer. Both floors keep degenerate
/// (zero/negative) cells out of the table.
pub fn generate_marketing(
    config: &GenConfig,
    calendar: &Calendar,
    rng: &mut StageRng,
) -> Vec<MarketingRecord> {
    let noise = &config.marketing;
    let mut records =
        Vec::with_capacity(calendar.len() * config.regions.len() * config.channels.len());

    for &date in calendar.days() {
        let month_mult = calendar.month_multiplier(date);
        for region in &config.regions {
            for channel in &config.channels {
                let target = channel.base_spend * month_mult * region.spend_multiplier;
                let spend = rng
                    .normal(target, channel.base_spend * noise.spend_noise_ratio)
                    .max(noise.spend_floor);
                let spend = round2(spend);

                let session_mean = spend * channel.session_efficiency;
                let sessions = rng
                    .normal(session_mean, session_mean * noise.session_noise_ratio)
                    .max(noise.session_floor as f64) as i64;

                records.push(MarketingRecord {
                    date,
                    region: region.code.clone(),
                    channel: channel.name.clone(),
                    spend,
                    sessions,
                });
            }
        }
    }

    log::info!("marketing: generated {} rows", records.len());
    records
}

/// Precompute the (date, region) -> expected-order-demand map the order
/// stage consumes: sum over channels of sessions * conversion rate.
///
/// Doing the join once here keeps the marketing -> orders dependency
/// explicit and testable in isolation.
pub fn expected_order_demand(
    config: &GenConfig,
    marketing: &[MarketingRecord],
) -> HashMap<(NaiveDate, String), f64> {
    let conversion: HashMap<&str, f64> = config
        .channels
        .iter()
        .map(|c| (c.name.as_str(), c.conversion_rate))
        .collect();

    let mut demand: HashMap<(NaiveDate, String), f64> = HashMap::new();
    for record in marketing {
        let rate = conversion.get(record.channel.as_str()).copied().unwrap_or(0.0);
        *demand
            .entry((record.date, record.region.clone()))
            .or_default() += record.sessions as f64 * rate;
    }
    demand
}
