//! Economy domain — purchases, credits, and lifetime statistics.
//!
//! All cross-domain communication goes through `crate::shared` types.
//! No other domain module is imported here.

pub mod purchase;
pub mod stats;

pub use purchase::{buy_fertilizer, buy_seeds, buy_water, credit_seeds};
pub use stats::{format_money, EconomyStats};
