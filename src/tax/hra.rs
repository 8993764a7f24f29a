use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Exempt part of the house rent allowance, least of:
/// - HRA actually received
/// - rent paid less 10% of basic salary (basic taken as half of salary)
/// - 40% of salary
///
/// Each candidate is floored at zero. No exemption unless both HRA and rent
/// are positive.
pub fn hra_exemption(
    salary: Decimal,
    house_rent_allowance: Decimal,
    rent_paid: Decimal,
) -> Decimal {
    if house_rent_allowance <= Decimal::ZERO || rent_paid <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let basic_salary = salary * dec!(0.5);
    [
        house_rent_allowance,
        rent_paid - basic_salary * dec!(0.1),
        salary * dec!(0.4),
    ]
    .into_iter()
    .map(|candidate| candidate.max(Decimal::ZERO))
    .min()
    .unwrap_or(Decimal::ZERO)
}
