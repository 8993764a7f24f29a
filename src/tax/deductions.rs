use crate::core::{DeductionLimits, IncomeDeclaration, SectionDeductions, TaxRegimeDefinition};
use rust_decimal::Decimal;

/// Deductions from gross income, before HRA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionSummary {
    pub standard_deduction: Decimal,
    pub professional_tax: Decimal,
    pub sections: SectionDeductions,
}

impl DeductionSummary {
    pub fn total(&self) -> Decimal {
        self.standard_deduction + self.professional_tax + self.sections.total()
    }
}

/// Standard deduction and professional tax always apply; section deductions
/// only when the regime allows them.
pub fn aggregate_deductions(
    declaration: &IncomeDeclaration,
    regime: &TaxRegimeDefinition,
) -> DeductionSummary {
    let sections = if regime.allows_deductions {
        section_deductions(declaration, &regime.max_deductions)
    } else {
        SectionDeductions::default()
    };

    DeductionSummary {
        standard_deduction: regime.standard_deduction,
        professional_tax: declaration.professional_tax,
        sections,
    }
}

/// Claimed section deductions, each limited to its cap
pub fn section_deductions(
    declaration: &IncomeDeclaration,
    limits: &DeductionLimits,
) -> SectionDeductions {
    let senior = declaration.is_senior();
    let medical = &limits.section_80d;

    let self_cap = if senior {
        medical.max_self_senior
    } else {
        medical.max_self
    };
    let parents_cap = if declaration.parents_senior_citizen {
        medical.max_parents_senior
    } else {
        medical.max_parents
    };
    // 80TTB replaces 80TTA for senior citizens
    let interest_cap = if senior {
        limits.section_80ttb
    } else {
        limits.section_80tta
    };

    SectionDeductions {
        section_80c: declaration.section_80c.min(limits.section_80c),
        section_80ccd_1b: declaration.section_80ccd_1b.min(limits.section_80ccd_1b),
        section_80d: declaration.section_80d.min(self_cap),
        section_80d_parents: declaration.section_80d_parents.min(parents_cap),
        section_80e: capped(declaration.section_80e, limits.section_80e),
        section_80g: capped(declaration.section_80g, limits.section_80g),
        section_80tta: declaration.section_80tta.min(interest_cap),
    }
}

fn capped(amount: Decimal, cap: Option<Decimal>) -> Decimal {
    match cap {
        Some(cap) => amount.min(cap),
        None => amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FinancialYear, RegimeKind, RegimeTable};
    use rust_decimal_macros::dec;

    fn regime(kind: RegimeKind) -> TaxRegimeDefinition {
        RegimeTable::builtin()
            .get(FinancialYear(2025), kind)
            .unwrap()
            .clone()
    }

    fn claims() -> IncomeDeclaration {
        IncomeDeclaration {
            salary: dec!(1500000),
            section_80c: dec!(200000),
            section_80ccd_1b: dec!(60000),
            section_80d: dec!(30000),
            section_80d_parents: dec!(40000),
            section_80e: dec!(120000),
            section_80g: dec!(75000),
            section_80tta: dec!(15000),
            ..Default::default()
        }
    }

    #[test]
    fn old_regime_caps_each_section() {
        let summary = aggregate_deductions(&claims(), &regime(RegimeKind::Old));
        let s = &summary.sections;
        assert_eq!(s.section_80c, dec!(150000));
        assert_eq!(s.section_80ccd_1b, dec!(50000));
        assert_eq!(s.section_80d, dec!(25000));
        assert_eq!(s.section_80d_parents, dec!(25000));
        assert_eq!(s.section_80tta, dec!(10000));
        // uncapped
        assert_eq!(s.section_80e, dec!(120000));
        assert_eq!(s.section_80g, dec!(75000));
        assert_eq!(summary.total(), dec!(50000) + dec!(2400) + dec!(455000));
    }

    #[test]
    fn old_regime_80c_over_cap_counts_cap_only() {
        let decl = IncomeDeclaration {
            section_80c: dec!(200000),
            ..Default::default()
        };
        let summary = aggregate_deductions(&decl, &regime(RegimeKind::Old));
        assert_eq!(summary.sections.total(), dec!(150000));
    }

    #[test]
    fn senior_caps_for_medical_and_interest() {
        let decl = IncomeDeclaration {
            age: 65,
            parents_senior_citizen: true,
            section_80d: dec!(60000),
            section_80d_parents: dec!(60000),
            section_80tta: dec!(45000),
            ..Default::default()
        };
        let s = aggregate_deductions(&decl, &regime(RegimeKind::Old)).sections;
        assert_eq!(s.section_80d, dec!(50000));
        assert_eq!(s.section_80d_parents, dec!(50000));
        assert_eq!(s.section_80tta, dec!(45000));
    }

    #[test]
    fn new_regime_ignores_section_claims() {
        let new = regime(RegimeKind::New);
        let with_claims = aggregate_deductions(&claims(), &new);
        let without = aggregate_deductions(
            &IncomeDeclaration {
                salary: dec!(1500000),
                ..Default::default()
            },
            &new,
        );
        assert_eq!(with_claims, without);
        assert_eq!(with_claims.total(), dec!(52400));
    }

    #[test]
    fn professional_tax_is_taken_from_the_declaration() {
        let decl = IncomeDeclaration {
            professional_tax: Decimal::ZERO,
            ..Default::default()
        };
        let summary = aggregate_deductions(&decl, &regime(RegimeKind::New));
        assert_eq!(summary.total(), dec!(50000));
    }

    #[test]
    fn configured_cap_for_80e_applies() {
        let limits = DeductionLimits {
            section_80e: Some(dec!(100000)),
            ..Default::default()
        };
        let s = section_deductions(&claims(), &limits);
        assert_eq!(s.section_80e, dec!(100000));
    }
}
