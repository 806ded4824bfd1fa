//! Shared primitive types used across the entire generator.

/// Customer identifier. Dense, 1-based: every id in [1, population] exists.
pub type CustomerId = u32;

/// Order identifier. A single monotone counter spans the whole run.
pub type OrderId = u64;

/// Return identifier. Dense 1..n over the returned-order subset only.
pub type ReturnId = u64;

/// Round a monetary amount to 2 decimal places.
/// Every money field in the output tables passes through this.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
