use super::error::TaxError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Age from which the senior citizen rules apply.
pub const SENIOR_CITIZEN_AGE: u32 = 60;
/// Age from which the super senior citizen rules apply.
pub const SUPER_SENIOR_CITIZEN_AGE: u32 = 80;
/// Largest amount accepted in a declaration or regime definition (one
/// thousand lakh crore rupees). Keeps every sum and product well inside
/// `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Income tax regime
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum RegimeKind {
    /// Higher rates, section deductions allowed
    Old,
    /// Lower rates, section deductions disallowed
    #[default]
    New,
}

impl RegimeKind {
    pub const ALL: [RegimeKind; 2] = [RegimeKind::Old, RegimeKind::New];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegimeKind::Old => "OLD",
            RegimeKind::New => "NEW",
        }
    }
}

impl std::fmt::Display for RegimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegimeKind {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OLD" => Ok(RegimeKind::Old),
            "NEW" => Ok(RegimeKind::New),
            _ => Err(TaxError::InvalidRegime(s.to_string())),
        }
    }
}

impl TryFrom<String> for RegimeKind {
    type Error = TaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single person's income and deduction claims for one financial year.
///
/// Every field is optional in JSON input; omitted amounts are zero, `age`
/// defaults to 25, `regime` to NEW and `professionalTax` to 2400.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct IncomeDeclaration {
    /// Annual gross salary
    #[schemars(with = "f64")]
    pub salary: Decimal,
    /// Income from other sources (interest, rent, ...)
    #[schemars(with = "f64")]
    pub other_income: Decimal,
    /// Profits and gains of business or profession
    #[schemars(with = "f64")]
    pub business_income: Decimal,
    #[schemars(with = "f64")]
    pub capital_gains: Decimal,
    /// House rent allowance received as part of salary
    #[schemars(with = "f64")]
    pub house_rent_allowance: Decimal,
    /// Rent actually paid during the year
    #[schemars(with = "f64")]
    pub rent_paid: Decimal,
    /// PPF, ELSS, life insurance, EPF, home loan principal
    #[serde(rename = "section80C")]
    #[schemars(with = "f64")]
    pub section_80c: Decimal,
    /// Additional NPS contribution
    #[serde(rename = "section80CCD1B")]
    #[schemars(with = "f64")]
    pub section_80ccd_1b: Decimal,
    /// Medical insurance premium for self and family
    #[serde(rename = "section80D")]
    #[schemars(with = "f64")]
    pub section_80d: Decimal,
    /// Medical insurance premium for parents
    #[serde(rename = "section80DParents")]
    #[schemars(with = "f64")]
    pub section_80d_parents: Decimal,
    /// Whether the insured parents are senior citizens
    pub parents_senior_citizen: bool,
    /// Education loan interest
    #[serde(rename = "section80E")]
    #[schemars(with = "f64")]
    pub section_80e: Decimal,
    /// Donations
    #[serde(rename = "section80G")]
    #[schemars(with = "f64")]
    pub section_80g: Decimal,
    /// Savings account interest (80TTB for senior citizens)
    #[serde(rename = "section80TTA")]
    #[schemars(with = "f64")]
    pub section_80tta: Decimal,
    /// Age in completed years
    pub age: u32,
    pub regime: RegimeKind,
    #[schemars(with = "f64")]
    pub professional_tax: Decimal,
}

impl Default for IncomeDeclaration {
    fn default() -> Self {
        IncomeDeclaration {
            salary: Decimal::ZERO,
            other_income: Decimal::ZERO,
            business_income: Decimal::ZERO,
            capital_gains: Decimal::ZERO,
            house_rent_allowance: Decimal::ZERO,
            rent_paid: Decimal::ZERO,
            section_80c: Decimal::ZERO,
            section_80ccd_1b: Decimal::ZERO,
            section_80d: Decimal::ZERO,
            section_80d_parents: Decimal::ZERO,
            parents_senior_citizen: false,
            section_80e: Decimal::ZERO,
            section_80g: Decimal::ZERO,
            section_80tta: Decimal::ZERO,
            age: 25,
            regime: RegimeKind::New,
            professional_tax: dec!(2400),
        }
    }
}

impl IncomeDeclaration {
    /// Minimal NEW regime declaration from salary, other income and a lump sum of
    /// deductions (claimed under 80C).
    pub fn quick(salary: Decimal, other_income: Decimal, deductions: Decimal) -> Self {
        IncomeDeclaration {
            salary,
            other_income,
            section_80c: deductions,
            regime: RegimeKind::New,
            ..Default::default()
        }
    }

    /// Copy of this declaration assessed under a different regime
    pub fn with_regime(&self, regime: RegimeKind) -> Self {
        IncomeDeclaration {
            regime,
            ..self.clone()
        }
    }

    pub fn is_senior(&self) -> bool {
        self.age >= SENIOR_CITIZEN_AGE
    }

    pub fn is_super_senior(&self) -> bool {
        self.age >= SUPER_SENIOR_CITIZEN_AGE
    }

    /// Sum of all income heads
    pub fn gross_income(&self) -> Decimal {
        self.salary + self.other_income + self.business_income + self.capital_gains
    }

    /// Reject negative or implausibly large amounts. Called once when input
    /// enters the program.
    pub fn validate(&self) -> Result<(), TaxError> {
        let fields: [(&'static str, Decimal); 14] = [
            ("salary", self.salary),
            ("otherIncome", self.other_income),
            ("businessIncome", self.business_income),
            ("capitalGains", self.capital_gains),
            ("houseRentAllowance", self.house_rent_allowance),
            ("rentPaid", self.rent_paid),
            ("section80C", self.section_80c),
            ("section80CCD1B", self.section_80ccd_1b),
            ("section80D", self.section_80d),
            ("section80DParents", self.section_80d_parents),
            ("section80E", self.section_80e),
            ("section80G", self.section_80g),
            ("section80TTA", self.section_80tta),
            ("professionalTax", self.professional_tax),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(TaxError::NegativeAmount { field, value });
            }
            if value > MAX_AMOUNT {
                return Err(TaxError::AmountTooLarge { field, value });
            }
        }
        Ok(())
    }
}
