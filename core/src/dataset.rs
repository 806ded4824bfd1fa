//! Dataset assembly: the four generated tables and their CSV boundary.
//!
//! Column names and order are the external contract; downstream BI
//! consumers join on them. Do not rename or reorder without versioning
//! the output.

use crate::customer_generator::CustomerRecord;
use crate::error::GenResult;
use crate::marketing_generator::MarketingRecord;
use crate::order_generator::OrderRecord;
use crate::return_generator::ReturnRecord;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CUSTOMERS_HEADER: &str =
    "customer_id,signup_date,customer_region,customer_country,segment";
pub const MARKETING_HEADER: &str = "date,region,channel,spend,sessions";
pub const ORDERS_HEADER: &str = "order_id,customer_id,order_date,ship_date,delivery_date,\
promised_delivery_date,region,country,channel,items,revenue,cogs,returned_flag";
pub const RETURNS_HEADER: &str = "return_id,order_id,return_date,reason_code,refund_amount";

pub struct Dataset {
    pub customers: Vec<CustomerRecord>,
    pub marketing: Vec<MarketingRecord>,
    pub orders: Vec<OrderRecord>,
    pub returns: Vec<ReturnRecord>,
}

/// End-of-run counters for the CLI report.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub customers: usize,
    pub marketing_rows: usize,
    pub orders: usize,
    pub returned_orders: usize,
    pub returns: usize,
    pub total_revenue: f64,
    pub total_refunds: f64,
}

impl Dataset {
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            customers: self.customers.len(),
            marketing_rows: self.marketing.len(),
            orders: self.orders.len(),
            returned_orders: self.orders.iter().filter(|o| o.returned_flag).count(),
            returns: self.returns.len(),
            total_revenue: self.orders.iter().map(|o| o.revenue).sum(),
            total_refunds: self.returns.iter().map(|r| r.refund_amount).sum(),
        }
    }

    /// Write the four tables as CSV under `dir`, creating it if absent.
    ///
    /// An empty table (the returns table can be empty) still gets its
    /// header row, so the column shape is always present.
    pub fn write_csv(&self, dir: &Path) -> GenResult<()> {
        std::fs::create_dir_all(dir)?;

        let mut w = table_writer(dir, "customers.csv", CUSTOMERS_HEADER)?;
        for c in &self.customers {
            writeln!(
                w,
                "{},{},{},{},{}",
                c.customer_id, c.signup_date, c.region, c.country, c.segment
            )?;
        }
        w.flush()?;

        let mut w = table_writer(dir, "marketing.csv", MARKETING_HEADER)?;
        for m in &self.marketing {
            writeln!(
                w,
                "{},{},{},{:.2},{}",
                m.date, m.region, m.channel, m.spend, m.sessions
            )?;
        }
        w.flush()?;

        let mut w = table_writer(dir, "orders.csv", ORDERS_HEADER)?;
        for o in &self.orders {
            writeln!(
                w,
                "{},{},{},{},{},{},{},{},{},{},{:.2},{:.2},{}",
                o.order_id,
                o.customer_id,
                o.order_date,
                o.ship_date,
                o.delivery_date,
                o.promised_delivery_date,
                o.region,
                o.country,
                o.channel,
                o.items,
                o.revenue,
                o.cogs,
                o.returned_flag
            )?;
        }
        w.flush()?;

        let mut w = table_writer(dir, "returns.csv", RETURNS_HEADER)?;
        for r in &self.returns {
            writeln!(
                w,
                "{},{},{},{},{:.2}",
                r.return_id, r.order_id, r.return_date, r.reason_code, r.refund_amount
            )?;
        }
        w.flush()?;

        log::info!("dataset: wrote 4 tables to {}", dir.display());
        Ok(())
    }
}

fn table_writer(dir: &Path, file: &str, header: &str) -> GenResult<BufWriter<File>> {
    let mut writer = BufWriter::new(File::create(dir.join(file))?);
    writeln!(writer, "{header}")?;
    Ok(writer)
}
