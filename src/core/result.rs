use super::declaration::RegimeKind;
use super::year::FinancialYear;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;

/// Section deductions actually allowed after caps and regime gating
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct SectionDeductions {
    #[serde(rename = "section80C")]
    #[schemars(with = "f64")]
    pub section_80c: Decimal,
    #[serde(rename = "section80CCD1B")]
    #[schemars(with = "f64")]
    pub section_80ccd_1b: Decimal,
    #[serde(rename = "section80D")]
    #[schemars(with = "f64")]
    pub section_80d: Decimal,
    #[serde(rename = "section80DParents")]
    #[schemars(with = "f64")]
    pub section_80d_parents: Decimal,
    #[serde(rename = "section80E")]
    #[schemars(with = "f64")]
    pub section_80e: Decimal,
    #[serde(rename = "section80G")]
    #[schemars(with = "f64")]
    pub section_80g: Decimal,
    /// 80TTA, or 80TTB for senior citizens
    #[serde(rename = "section80TTA")]
    #[schemars(with = "f64")]
    pub section_80tta: Decimal,
}

impl SectionDeductions {
    pub fn total(&self) -> Decimal {
        self.section_80c
            + self.section_80ccd_1b
            + self.section_80d
            + self.section_80d_parents
            + self.section_80e
            + self.section_80g
            + self.section_80tta
    }
}

/// Breakdown of one income tax calculation.
///
/// Amounts are kept at full precision; only `total_tax` is rounded to whole
/// rupees and `effective_rate` to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub regime: RegimeKind,
    pub regime_label: String,
    #[schemars(with = "String")]
    pub financial_year: FinancialYear,
    #[schemars(with = "f64")]
    pub gross_income: Decimal,
    #[schemars(with = "f64")]
    pub hra_exemption: Decimal,
    #[schemars(with = "f64")]
    pub standard_deduction: Decimal,
    #[schemars(with = "f64")]
    pub professional_tax: Decimal,
    pub section_deductions: SectionDeductions,
    #[schemars(with = "f64")]
    pub total_deductions: Decimal,
    #[schemars(with = "f64")]
    pub taxable_income: Decimal,
    /// Slab tax before the 87A rebate
    #[schemars(with = "f64")]
    pub slab_tax: Decimal,
    #[schemars(with = "f64")]
    pub rebate: Decimal,
    #[schemars(with = "f64")]
    pub tax_after_rebate: Decimal,
    #[schemars(with = "f64")]
    pub surcharge_rate: Decimal,
    #[schemars(with = "f64")]
    pub surcharge: Decimal,
    #[schemars(with = "f64")]
    pub cess: Decimal,
    #[schemars(with = "f64")]
    pub total_tax: Decimal,
    /// Total tax as a percentage of gross income
    #[schemars(with = "f64")]
    pub effective_rate: Decimal,
}

/// OLD and NEW regime results for the same declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegimeComparison {
    pub old: TaxResult,
    pub new: TaxResult,
    /// Regime with the lower total tax (NEW on a tie)
    pub recommendation: RegimeKind,
    /// Absolute difference between the two totals
    #[schemars(with = "f64")]
    pub savings: Decimal,
}

impl RegimeComparison {
    pub fn recommended(&self) -> &TaxResult {
        match self.recommendation {
            RegimeKind::Old => &self.old,
            RegimeKind::New => &self.new,
        }
    }
}
