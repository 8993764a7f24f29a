pub mod compare;
pub mod deductions;
pub mod gst;
pub mod hra;
pub mod income;
pub mod slab;

pub use compare::{compare_regimes, compare_with};
pub use deductions::{aggregate_deductions, DeductionSummary};
pub use gst::{calculate_gst, calculate_gst_with_schedule};
pub use hra::hra_exemption;
pub use income::{calculate, calculate_income_tax, quick_estimate, surcharge_rate};
pub use slab::slab_tax;

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to `dp` decimal places, halves away from zero.
pub fn round_half_up(amount: Decimal, dp: u32) -> Decimal {
    amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
