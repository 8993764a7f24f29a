use crate::core::Slab;
use rust_decimal::Decimal;

/// Marginal tax on `income` across an ordered, gap-free slab sequence.
///
/// Each slab taxes the part of the income between the previous slab's upper
/// bound and its own; the unbounded top slab takes whatever remains.
/// Negative income is treated as zero.
pub fn slab_tax(income: Decimal, slabs: &[Slab]) -> Decimal {
    let mut remaining = income.max(Decimal::ZERO);
    let mut lower = Decimal::ZERO;
    let mut tax = Decimal::ZERO;

    for slab in slabs {
        if remaining <= Decimal::ZERO {
            break;
        }
        let in_slab = match slab.up_to {
            Some(up_to) => remaining.min(up_to - lower).max(Decimal::ZERO),
            None => remaining,
        };
        tax += in_slab * slab.rate;
        remaining -= in_slab;
        if let Some(up_to) = slab.up_to {
            lower = up_to;
        }
    }

    tax
}
