use super::round_half_up;
use crate::core::gst::validate_gst_rate;
use crate::core::{
    GstBreakdown, GstCategory, GstSchedule, TaxError, DEFAULT_GST_RATE, MAX_AMOUNT,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// GST on `amount` at `rate` percent, split equally into CGST and SGST.
/// Amounts are rounded to paise.
pub fn calculate_gst(
    amount: Decimal,
    rate: Decimal,
    category: Option<GstCategory>,
) -> Result<GstBreakdown, TaxError> {
    validate_gst_rate(rate)?;
    if amount.abs() > MAX_AMOUNT {
        return Err(TaxError::AmountTooLarge {
            field: "amount",
            value: amount,
        });
    }

    let gst = amount * rate / dec!(100);
    let half = gst / dec!(2);

    Ok(GstBreakdown {
        amount,
        gst_rate: rate,
        category,
        gst: round_half_up(gst, 2),
        cgst: round_half_up(half, 2),
        sgst: round_half_up(half, 2),
        total: round_half_up(amount + gst, 2),
    })
}

/// Resolve the rate from the schedule when a category is given, falling back
/// to the supplied rate (18% when none).
pub fn calculate_gst_with_schedule(
    schedule: &GstSchedule,
    amount: Decimal,
    rate: Option<Decimal>,
    category: Option<GstCategory>,
) -> Result<GstBreakdown, TaxError> {
    let supplied = rate.unwrap_or(DEFAULT_GST_RATE);
    let rate = match category {
        Some(category) => schedule.rate_for(category).unwrap_or_else(|| {
            log::warn!("No active GST rate for category {category}, using {supplied}%");
            supplied
        }),
        None => supplied,
    };
    calculate_gst(amount, rate, category)
}
