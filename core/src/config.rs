//! Run configuration: every numeric policy of the generative model lives
//! here, so a run is fully described by (config, seed).
//!
//! Constants are fixed in code for the default run; `from_json_file` lets
//! a run override them wholesale from a JSON document.

use crate::error::{GenError, GenResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub code: String,
    pub countries: Vec<String>,
    /// Share of the customer population assigned to this region.
    pub population_share: f64,
    /// Promised ship-to-delivery window, in days.
    pub sla_days: i64,
    /// Actual lead-time distribution: N(mean, std_dev), floored at 1 day.
    pub lead_time_mean: f64,
    pub lead_time_std_dev: f64,
    /// Organic order volume per day before seasonality.
    pub base_daily_orders: f64,
    /// Regional scaling applied to every channel's spend target.
    pub spend_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    /// Daily spend target before month/region scaling.
    pub base_spend: f64,
    /// Sessions generated per unit of spend.
    pub session_efficiency: f64,
    /// Fraction of sessions expected to become orders.
    pub conversion_rate: f64,
    /// Weight of this channel in the per-order channel draw.
    pub order_share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub name: String,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingNoise {
    /// Spend std dev as a fraction of the channel base.
    pub spend_noise_ratio: f64,
    /// Spend can never be reported at or below zero; clamp here.
    pub spend_floor: f64,
    /// Session std dev as a fraction of the session mean.
    pub session_noise_ratio: f64,
    pub session_floor: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEconomics {
    /// Per-item price is exp(N(log_mean, log_std_dev)): positive, right-skewed.
    pub price_log_mean: f64,
    pub price_log_std_dev: f64,
    pub max_items: i64,
    /// COGS is drawn as revenue * U(min, max).
    pub cogs_ratio_min: f64,
    pub cogs_ratio_max: f64,
    /// Ship date offset after order date: U{0..max}.
    pub max_ship_offset_days: i64,
    /// Fraction of marketing-derived demand credited to order volume.
    pub marketing_attribution: f64,
    pub expected_orders_floor: f64,
    pub order_count_floor: u64,
    /// Expected-orders std dev as a fraction of (base + 50).
    pub expected_noise_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnPolicy {
    pub base_probability: f64,
    /// Added per day of lead time beyond the regional mean.
    pub lead_deviation_weight: f64,
    /// Flat penalty for every channel except the penalty-free one.
    pub channel_penalty: f64,
    pub penalty_free_channel: String,
    pub min_probability: f64,
    pub max_probability: f64,
    pub refund_ratios: Vec<f64>,
    pub refund_ratio_weights: Vec<f64>,
    pub reason_codes: Vec<String>,
    pub reason_weights: Vec<f64>,
    /// Return date offset after delivery: U{1..max}.
    pub max_return_offset_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_count: u32,
    pub regions: Vec<RegionConfig>,
    pub channels: Vec<ChannelConfig>,
    pub segments: Vec<SegmentConfig>,
    /// Demand multiplier per calendar month, January first.
    pub month_multipliers: [f64; 12],
    /// Demand multiplier per weekday, Monday first.
    pub weekday_multipliers: [f64; 7],
    pub marketing: MarketingNoise,
    pub orders: OrderEconomics,
    pub returns: ReturnPolicy,
}

impl GenConfig {
    /// The production run: 2023-01-01..2025-08-31, 50k customers,
    /// three regions, five channels.
    pub fn default_run() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
            customer_count: 50_000,
            regions: vec![
                RegionConfig {
                    code: "EU".into(),
                    countries: vec![
                        "Germany".into(),
                        "France".into(),
                        "Italy".into(),
                        "Spain".into(),
                        "Netherlands".into(),
                        "Poland".into(),
                        "Sweden".into(),
                    ],
                    population_share: 0.5,
                    sla_days: 5,
                    lead_time_mean: 3.0,
                    lead_time_std_dev: 1.0,
                    base_daily_orders: 220.0,
                    spend_multiplier: 1.0,
                },
                RegionConfig {
                    code: "NA".into(),
                    countries: vec![
                        "United States".into(),
                        "Canada".into(),
                        "Mexico".into(),
                    ],
                    population_share: 0.3,
                    sla_days: 6,
                    lead_time_mean: 4.0,
                    lead_time_std_dev: 1.5,
                    base_daily_orders: 170.0,
                    spend_multiplier: 0.85,
                },
                RegionConfig {
                    code: "APAC".into(),
                    countries: vec![
                        "Japan".into(),
                        "Australia".into(),
                        "Singapore".into(),
                        "India".into(),
                        "South Korea".into(),
                    ],
                    population_share: 0.2,
                    sla_days: 8,
                    lead_time_mean: 6.0,
                    lead_time_std_dev: 2.0,
                    base_daily_orders: 140.0,
                    spend_multiplier: 0.7,
                },
            ],
            channels: vec![
                ChannelConfig {
                    name: "Paid Search".into(),
                    base_spend: 1200.0,
                    session_efficiency: 3.5,
                    conversion_rate: 0.020,
                    order_share: 0.30,
                },
                ChannelConfig {
                    name: "Social".into(),
                    base_spend: 900.0,
                    session_efficiency: 4.2,
                    conversion_rate: 0.012,
                    order_share: 0.25,
                },
                ChannelConfig {
                    name: "Email".into(),
                    base_spend: 300.0,
                    session_efficiency: 2.0,
                    conversion_rate: 0.035,
                    order_share: 0.15,
                },
                ChannelConfig {
                    name: "Affiliate".into(),
                    base_spend: 400.0,
                    session_efficiency: 3.0,
                    conversion_rate: 0.018,
                    order_share: 0.15,
                },
                ChannelConfig {
                    name: "Direct".into(),
                    base_spend: 100.0,
                    session_efficiency: 1.5,
                    conversion_rate: 0.030,
                    order_share: 0.15,
                },
            ],
            segments: vec![
                SegmentConfig { name: "New".into(), share: 0.60 },
                SegmentConfig { name: "Returning".into(), share: 0.35 },
                SegmentConfig { name: "VIP".into(), share: 0.05 },
            ],
            month_multipliers: [
                0.9, 0.92, 1.0, 1.02, 1.05, 1.08, 1.0, 0.98, 1.05, 1.15, 1.35, 1.5,
            ],
            weekday_multipliers: [1.0, 1.02, 1.02, 1.03, 1.05, 0.95, 0.9],
            marketing: MarketingNoise {
                spend_noise_ratio: 0.15,
                spend_floor: 50.0,
                session_noise_ratio: 0.20,
                session_floor: 100,
            },
            orders: OrderEconomics {
                price_log_mean: 3.2,
                price_log_std_dev: 0.45,
                max_items: 5,
                cogs_ratio_min: 0.5,
                cogs_ratio_max: 0.7,
                max_ship_offset_days: 3,
                marketing_attribution: 0.5,
                expected_orders_floor: 10.0,
                order_count_floor: 5,
                expected_noise_ratio: 0.2,
            },
            returns: ReturnPolicy {
                base_probability: 0.06,
                lead_deviation_weight: 0.01,
                channel_penalty: 0.01,
                penalty_free_channel: "Direct".into(),
                min_probability: 0.01,
                max_probability: 0.25,
                refund_ratios: vec![1.0, 0.8, 0.6],
                refund_ratio_weights: vec![0.60, 0.25, 0.15],
                reason_codes: vec![
                    "Damaged".into(),
                    "Wrong Size".into(),
                    "Not as Described".into(),
                    "Changed Mind".into(),
                    "Late Delivery".into(),
                ],
                reason_weights: vec![0.20, 0.35, 0.20, 0.15, 0.10],
                max_return_offset_days: 20,
            },
        }
    }

    /// Small run for tests: two weeks, 300 customers, production policies.
    pub fn default_test() -> Self {
        let mut config = Self::default_run();
        config.start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        config.end_date = NaiveDate::from_ymd_opt(2023, 1, 14).unwrap();
        config.customer_count = 300;
        config
    }

    /// Load a full config from a JSON file.
    pub fn from_json_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Reject configs the pipeline cannot run with.
    pub fn validate(&self) -> GenResult<()> {
        if self.end_date < self.start_date {
            return Err(invalid(format!(
                "end_date {} precedes start_date {}",
                self.end_date, self.start_date
            )));
        }
        if self.customer_count == 0 {
            return Err(invalid("customer_count must be at least 1".into()));
        }
        if self.regions.is_empty() {
            return Err(invalid("at least one region is required".into()));
        }
        for region in &self.regions {
            if region.countries.is_empty() {
                return Err(invalid(format!("region '{}' has no countries", region.code)));
            }
            if region.sla_days < 1 {
                return Err(invalid(format!("region '{}' has sla_days < 1", region.code)));
            }
        }
        if self.channels.is_empty() {
            return Err(invalid("at least one channel is required".into()));
        }
        check_weight_sum("region population_share", self.regions.iter().map(|r| r.population_share))?;
        check_weight_sum("segment share", self.segments.iter().map(|s| s.share))?;
        check_weight_sum("channel order_share", self.channels.iter().map(|c| c.order_share))?;
        if self.returns.refund_ratios.len() != self.returns.refund_ratio_weights.len() {
            return Err(invalid("refund_ratios and refund_ratio_weights differ in length".into()));
        }
        if self.returns.reason_codes.len() != self.returns.reason_weights.len() {
            return Err(invalid("reason_codes and reason_weights differ in length".into()));
        }
        if self.returns.min_probability > self.returns.max_probability {
            return Err(invalid("return probability bounds are inverted".into()));
        }
        if self.orders.cogs_ratio_min <= 0.0 || self.orders.cogs_ratio_max > 1.0
            || self.orders.cogs_ratio_min > self.orders.cogs_ratio_max
        {
            return Err(invalid("cogs ratio range must sit within (0, 1]".into()));
        }
        if self.orders.max_items < 1 {
            return Err(invalid("max_items must be at least 1".into()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> GenError {
    GenError::InvalidConfig { reason }
}

fn check_weight_sum(label: &str, weights: impl Iterator<Item = f64>) -> GenResult<()> {
    let total: f64 = weights.sum();
    if (total - 1.0).abs() > 1e-6 {
        return Err(invalid(format!("{label} weights sum to {total}, expected 1.0")));
    }
    Ok(())
}
