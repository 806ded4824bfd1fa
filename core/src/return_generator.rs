//! Return generation: a single pass over orders flagged as returned.
//!
//! An empty returned-order set is a valid empty table, not an error.
//! Return ids are dense 1..n over the returned subset only.

use crate::config::GenConfig;
use crate::order_generator::OrderRecord;
use crate::rng::StageRng;
use crate::types::{round2, OrderId, ReturnId};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub return_id: ReturnId,
    pub order_id: OrderId,
    pub return_date: NaiveDate,
    pub reason_code: String,
    pub refund_amount: f64,
}

/// Generate one return row per order with `returned_flag` set.
pub fn generate_returns(
    config: &GenConfig,
    orders: &[OrderRecord],
    rng: &mut StageRng,
) -> Vec<ReturnRecord> {
    let policy = &config.returns;
    let mut returns = Vec::new();
    let mut next_return_id: ReturnId = 1;

    for order in orders.iter().filter(|o| o.returned_flag) {
        let ratio = policy.refund_ratios[rng.pick_weighted(&policy.refund_ratio_weights)];
        let refund_amount = round2(order.revenue * ratio);
        let reason_code =
            policy.reason_codes[rng.pick_weighted(&policy.reason_weights)].clone();
        // Strictly after delivery: offset starts at 1.
        let return_date =
            order.delivery_date + Duration::days(rng.int_in(1, policy.max_return_offset_days));

        returns.push(ReturnRecord {
            return_id: next_return_id,
            order_id: order.order_id,
            return_date,
            reason_code,
            refund_amount,
        });
        next_return_id += 1;
    }

    log::info!("return: generated {} returns", returns.len());
    returns
}
