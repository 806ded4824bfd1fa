//! ecomgen-core: synthetic e-commerce analytics dataset generator.
//!
//! Produces four relationally-consistent tables (customers, marketing,
//! orders, returns) over a multi-year daily calendar. Marketing drives
//! order volume; lead time drives on-time delivery and return
//! probability; every cross-table reference is valid by construction.
//!
//! Everything is deterministic given (config, seed). See `pipeline` for
//! the fixed stage order and `rng` for the stream-derivation rules.

pub mod calendar;
pub mod config;
pub mod customer_generator;
pub mod dataset;
pub mod error;
pub mod marketing_generator;
pub mod order_generator;
pub mod pipeline;
pub mod return_generator;
pub mod rng;
pub mod types;
