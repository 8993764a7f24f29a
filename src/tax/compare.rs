use super::income::calculate_income_tax;
use crate::core::{
    FinancialYear, IncomeDeclaration, RegimeComparison, RegimeKind, RegimeTable, TaxError,
    TaxRegimeDefinition,
};

/// Assess the same declaration under both regimes of `year`
pub fn compare_regimes(
    declaration: &IncomeDeclaration,
    regimes: &RegimeTable,
    year: FinancialYear,
) -> Result<RegimeComparison, TaxError> {
    declaration.validate()?;
    let old = regimes.get(year, RegimeKind::Old)?;
    let new = regimes.get(year, RegimeKind::New)?;
    Ok(compare_with(declaration, old, new))
}

/// Compare two resolved regime definitions. The declaration's own regime is
/// overridden for each run; ties favour the NEW regime.
pub fn compare_with(
    declaration: &IncomeDeclaration,
    old_regime: &TaxRegimeDefinition,
    new_regime: &TaxRegimeDefinition,
) -> RegimeComparison {
    let old = calculate_income_tax(&declaration.with_regime(RegimeKind::Old), old_regime);
    let new = calculate_income_tax(&declaration.with_regime(RegimeKind::New), new_regime);

    let recommendation = if old.total_tax < new.total_tax {
        RegimeKind::Old
    } else {
        RegimeKind::New
    };
    let savings = (old.total_tax - new.total_tax).abs();

    log::debug!(
        "OLD {} vs NEW {}: recommend {} saving {}",
        old.total_tax,
        new.total_tax,
        recommendation,
        savings
    );

    RegimeComparison {
        old,
        new,
        recommendation,
        savings,
    }
}
