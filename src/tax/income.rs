use super::deductions::aggregate_deductions;
use super::hra::hra_exemption;
use super::round_half_up;
use super::slab::slab_tax;
use crate::core::{
    FinancialYear, IncomeDeclaration, RegimeTable, SurchargeBand, TaxError, TaxRegimeDefinition,
    TaxResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Calculate income tax for `declaration` under the regime it names.
/// The declaration is validated first.
pub fn calculate(
    declaration: &IncomeDeclaration,
    regimes: &RegimeTable,
    year: FinancialYear,
) -> Result<TaxResult, TaxError> {
    declaration.validate()?;
    let regime = regimes.get(year, declaration.regime)?;
    Ok(calculate_income_tax(declaration, regime))
}

/// Quick estimate from salary, other income and a lump sum of deductions,
/// assessed under the NEW regime.
pub fn quick_estimate(
    salary: Decimal,
    other_income: Decimal,
    deductions: Decimal,
    regimes: &RegimeTable,
    year: FinancialYear,
) -> Result<TaxResult, TaxError> {
    calculate(&IncomeDeclaration::quick(salary, other_income, deductions), regimes, year)
}

/// Full income tax computation under `regime`.
///
/// The regime definition decides the rules; the declaration's own `regime`
/// field is not consulted. Only the final total is rounded.
pub fn calculate_income_tax(
    declaration: &IncomeDeclaration,
    regime: &TaxRegimeDefinition,
) -> TaxResult {
    let slabs = regime.slabs_for_age(declaration.age);

    let gross_income = declaration.gross_income();
    let hra_exemption = hra_exemption(
        declaration.salary,
        declaration.house_rent_allowance,
        declaration.rent_paid,
    );
    let deductions = aggregate_deductions(declaration, regime);
    let total_deductions = deductions.total();

    let taxable_income = (gross_income - hra_exemption - total_deductions).max(Decimal::ZERO);
    let slab_tax = slab_tax(taxable_income, slabs);

    let rebate = if taxable_income <= regime.rebate.max_income {
        slab_tax.min(regime.rebate.rebate_amount)
    } else {
        Decimal::ZERO
    };
    let tax_after_rebate = slab_tax - rebate;

    // Flat on the whole tax once a threshold is reached, no marginal relief
    let surcharge_rate = surcharge_rate(taxable_income, &regime.surcharge);
    let surcharge = tax_after_rebate * surcharge_rate;
    let cess = (tax_after_rebate + surcharge) * regime.cess;
    let total_tax = round_half_up(tax_after_rebate + surcharge + cess, 0);

    let effective_rate = if gross_income.is_zero() {
        Decimal::ZERO
    } else {
        round_half_up(total_tax / gross_income * dec!(100), 2)
    };

    log::debug!(
        "{} {}: gross {}, hra {}, deductions {}, taxable {}",
        regime.regime,
        regime.financial_year,
        gross_income,
        hra_exemption,
        total_deductions,
        taxable_income
    );
    log::debug!(
        "{} {}: slab tax {}, rebate {}, surcharge {} @ {}, cess {}, total {}",
        regime.regime,
        regime.financial_year,
        slab_tax,
        rebate,
        surcharge,
        surcharge_rate,
        cess,
        total_tax
    );

    TaxResult {
        regime: regime.regime,
        regime_label: regime.display_name(),
        financial_year: regime.financial_year,
        gross_income,
        hra_exemption,
        standard_deduction: deductions.standard_deduction,
        professional_tax: deductions.professional_tax,
        section_deductions: deductions.sections,
        total_deductions,
        taxable_income,
        slab_tax,
        rebate,
        tax_after_rebate,
        surcharge_rate,
        surcharge,
        cess,
        total_tax,
        effective_rate,
    }
}

/// Rate of the highest band whose threshold `taxable_income` has reached
pub fn surcharge_rate(taxable_income: Decimal, bands: &[SurchargeBand]) -> Decimal {
    bands
        .iter()
        .filter(|band| band.min_income <= taxable_income)
        .max_by(|a, b| a.min_income.cmp(&b.min_income))
        .map_or(Decimal::ZERO, |band| band.rate)
}
