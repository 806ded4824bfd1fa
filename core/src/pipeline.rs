//! The generation pipeline.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Calendar and factor tables
//!   2. Customer stage
//!   3. Marketing stage
//!   4. Order stage      (reads customers + marketing demand)
//!   5. Return stage     (reads orders)
//!   6. Dataset assembly
//!
//! RULES:
//!   - No stage reads back from a later stage.
//!   - All randomness flows through the RngBank; each stage gets its own
//!     stream, drawn in the order above.
//!   - No I/O inside generation; the CSV boundary lives on Dataset.

use crate::calendar::Calendar;
use crate::config::GenConfig;
use crate::customer_generator::generate_customers;
use crate::dataset::Dataset;
use crate::error::GenResult;
use crate::marketing_generator::{expected_order_demand, generate_marketing};
use crate::order_generator::generate_orders;
use crate::return_generator::generate_returns;
use crate::rng::{RngBank, StageSlot};

pub struct GenPipeline {
    config: GenConfig,
    seed: u64,
    rng_bank: RngBank,
}

impl GenPipeline {
    /// Validates the config up front; a bad config never starts a run.
    pub fn new(config: GenConfig, seed: u64) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            rng_bank: RngBank::new(seed),
            config,
            seed,
        })
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run every stage in the documented order and assemble the dataset.
    pub fn run(&self) -> GenResult<Dataset> {
        log::info!(
            "pipeline: seed={} range={}..{} customers={}",
            self.seed,
            self.config.start_date,
            self.config.end_date,
            self.config.customer_count
        );

        let calendar = Calendar::new(&self.config)?;

        let mut rng = self.rng_bank.for_stage(StageSlot::Customer);
        let customers = generate_customers(&self.config, &calendar, &mut rng)?;

        let mut rng = self.rng_bank.for_stage(StageSlot::Marketing);
        let marketing = generate_marketing(&self.config, &calendar, &mut rng);
        let demand = expected_order_demand(&self.config, &marketing);

        let mut rng = self.rng_bank.for_stage(StageSlot::Order);
        let orders = generate_orders(&self.config, &calendar, &customers, &demand, &mut rng)?;

        let mut rng = self.rng_bank.for_stage(StageSlot::Return);
        let returns = generate_returns(&self.config, &orders, &mut rng);

        Ok(Dataset {
            customers,
            marketing,
            orders,
            returns,
        })
    }
}
