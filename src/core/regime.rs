use super::declaration::{RegimeKind, MAX_AMOUNT};
use super::error::TaxError;
use super::year::FinancialYear;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One income band. `up_to` of `None` marks the unbounded top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Slab {
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub up_to: Option<Decimal>,
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

impl Slab {
    pub fn new(up_to: Decimal, rate: Decimal) -> Self {
        Slab {
            up_to: Some(up_to),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Slab { up_to: None, rate }
    }
}

/// Surcharge applied to the whole tax once taxable income reaches `min_income`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurchargeBand {
    #[schemars(with = "f64")]
    pub min_income: Decimal,
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

/// Section 87A rebate for low incomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rebate {
    /// Highest taxable income that still qualifies
    #[schemars(with = "f64")]
    pub max_income: Decimal,
    /// Largest rebate that can be granted
    #[schemars(with = "f64")]
    pub rebate_amount: Decimal,
}

/// 80D caps, split between self/family and parents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MedicalInsuranceLimits {
    #[schemars(with = "f64")]
    pub max_self: Decimal,
    #[schemars(with = "f64")]
    pub max_self_senior: Decimal,
    #[schemars(with = "f64")]
    pub max_parents: Decimal,
    #[schemars(with = "f64")]
    pub max_parents_senior: Decimal,
}

impl Default for MedicalInsuranceLimits {
    fn default() -> Self {
        MedicalInsuranceLimits {
            max_self: dec!(25000),
            max_self_senior: dec!(50000),
            max_parents: dec!(25000),
            max_parents_senior: dec!(50000),
        }
    }
}

/// Statutory maximum per deduction section. `None` means uncapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DeductionLimits {
    #[serde(rename = "section80C")]
    #[schemars(with = "f64")]
    pub section_80c: Decimal,
    #[serde(rename = "section80CCD1B")]
    #[schemars(with = "f64")]
    pub section_80ccd_1b: Decimal,
    #[serde(rename = "section80D")]
    pub section_80d: MedicalInsuranceLimits,
    #[serde(rename = "section80E")]
    #[schemars(with = "Option<f64>")]
    pub section_80e: Option<Decimal>,
    #[serde(rename = "section80G")]
    #[schemars(with = "Option<f64>")]
    pub section_80g: Option<Decimal>,
    #[serde(rename = "section80TTA")]
    #[schemars(with = "f64")]
    pub section_80tta: Decimal,
    #[serde(rename = "section80TTB")]
    #[schemars(with = "f64")]
    pub section_80ttb: Decimal,
}

impl Default for DeductionLimits {
    fn default() -> Self {
        DeductionLimits {
            section_80c: dec!(150000),
            section_80ccd_1b: dec!(50000),
            section_80d: MedicalInsuranceLimits::default(),
            section_80e: None,
            section_80g: None,
            section_80tta: dec!(10000),
            section_80ttb: dec!(50000),
        }
    }
}

fn default_cess() -> Decimal {
    dec!(0.04)
}

/// Complete rule set for one regime in one financial year.
///
/// Definitions are plain immutable data. Build them through [`RegimeTable`],
/// which validates every definition before it can reach the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxRegimeDefinition {
    pub regime: RegimeKind,
    #[schemars(with = "String")]
    pub financial_year: FinancialYear,
    /// Display name, e.g. "New Regime (2023)"
    #[serde(default)]
    pub label: String,
    pub slabs: Vec<Slab>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senior_citizen_slabs: Option<Vec<Slab>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_senior_slabs: Option<Vec<Slab>>,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub standard_deduction: Decimal,
    /// Whether Chapter VI-A section deductions apply
    pub allows_deductions: bool,
    #[serde(default)]
    pub max_deductions: DeductionLimits,
    #[serde(rename = "rebate87A")]
    pub rebate: Rebate,
    #[serde(default)]
    pub surcharge: Vec<SurchargeBand>,
    #[serde(default = "default_cess")]
    #[schemars(with = "f64")]
    pub cess: Decimal,
}

impl TaxRegimeDefinition {
    /// Slab set for a taxpayer of the given age. Only the OLD regime has
    /// age-dependent slabs; a missing alternate set falls back to `slabs`.
    pub fn slabs_for_age(&self, age: u32) -> &[Slab] {
        use super::declaration::{SENIOR_CITIZEN_AGE, SUPER_SENIOR_CITIZEN_AGE};

        if self.regime == RegimeKind::Old {
            if age >= SUPER_SENIOR_CITIZEN_AGE {
                if let Some(slabs) = &self.super_senior_slabs {
                    return slabs;
                }
            }
            if age >= SENIOR_CITIZEN_AGE {
                if let Some(slabs) = &self.senior_citizen_slabs {
                    return slabs;
                }
            }
        }
        &self.slabs
    }

    /// Display name, falling back to the regime identifier
    pub fn display_name(&self) -> String {
        if self.label.is_empty() {
            format!("{} Regime", self.regime)
        } else {
            self.label.clone()
        }
    }

    /// Check the structural invariants the engine relies on.
    pub fn validate(&self) -> Result<(), TaxError> {
        let invalid = |reason: String| TaxError::InvalidSlabDefinition {
            regime: self.regime.to_string(),
            year: self.financial_year.display(),
            reason,
        };

        validate_slabs("slabs", &self.slabs).map_err(invalid)?;
        if let Some(slabs) = &self.senior_citizen_slabs {
            validate_slabs("seniorCitizenSlabs", slabs).map_err(invalid)?;
        }
        if let Some(slabs) = &self.super_senior_slabs {
            validate_slabs("superSeniorSlabs", slabs).map_err(invalid)?;
        }

        let mut previous: Option<Decimal> = None;
        for band in &self.surcharge {
            if !is_rate(band.rate) {
                return Err(invalid(format!("surcharge rate {} is outside [0, 1]", band.rate)));
            }
            if band.min_income < Decimal::ZERO {
                return Err(invalid(format!("surcharge threshold {} is negative", band.min_income)));
            }
            if previous.is_some_and(|p| band.min_income <= p) {
                return Err(invalid(format!(
                    "surcharge thresholds must be strictly increasing at {}",
                    band.min_income
                )));
            }
            previous = Some(band.min_income);
        }

        if !is_rate(self.cess) {
            return Err(invalid(format!("cess rate {} is outside [0, 1]", self.cess)));
        }

        let limits = &self.max_deductions;
        let amounts = [
            ("standardDeduction", Some(self.standard_deduction)),
            ("rebate87A.maxIncome", Some(self.rebate.max_income)),
            ("rebate87A.rebateAmount", Some(self.rebate.rebate_amount)),
            ("section80C", Some(limits.section_80c)),
            ("section80CCD1B", Some(limits.section_80ccd_1b)),
            ("section80D.maxSelf", Some(limits.section_80d.max_self)),
            ("section80D.maxSelfSenior", Some(limits.section_80d.max_self_senior)),
            ("section80D.maxParents", Some(limits.section_80d.max_parents)),
            ("section80D.maxParentsSenior", Some(limits.section_80d.max_parents_senior)),
            ("section80E", limits.section_80e),
            ("section80G", limits.section_80g),
            ("section80TTA", Some(limits.section_80tta)),
            ("section80TTB", Some(limits.section_80ttb)),
        ];
        for (name, amount) in amounts {
            let Some(amount) = amount else { continue };
            if amount < Decimal::ZERO {
                return Err(invalid(format!("{name} must not be negative (got {amount})")));
            }
            if amount > MAX_AMOUNT {
                return Err(invalid(format!("{name} exceeds {MAX_AMOUNT} (got {amount})")));
            }
        }

        Ok(())
    }
}

fn is_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

/// Slabs must start above zero, increase strictly and end in exactly one
/// unbounded band, which makes them cover [0, inf) without gaps or overlaps.
fn validate_slabs(name: &str, slabs: &[Slab]) -> Result<(), String> {
    let Some((last, bounded)) = slabs.split_last() else {
        return Err(format!("{name} must not be empty"));
    };
    if last.up_to.is_some() {
        return Err(format!("last entry of {name} must be unbounded"));
    }

    let mut lower = Decimal::ZERO;
    for slab in bounded {
        let Some(up_to) = slab.up_to else {
            return Err(format!("only the last entry of {name} may be unbounded"));
        };
        if up_to <= lower {
            return Err(format!(
                "{name} upper bounds must be strictly increasing ({up_to} follows {lower})"
            ));
        }
        lower = up_to;
    }

    if let Some(slab) = slabs.iter().find(|s| !is_rate(s.rate)) {
        return Err(format!("{name} rate {} is outside [0, 1]", slab.rate));
    }
    Ok(())
}

/// On-disk layout of a regime configuration file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RegimeConfig {
    pub regimes: Vec<TaxRegimeDefinition>,
}

/// Validated regime definitions keyed by financial year and regime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegimeTable {
    definitions: BTreeMap<(FinancialYear, RegimeKind), TaxRegimeDefinition>,
}

impl RegimeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Definitions for FY 2024-25
    pub fn builtin() -> Self {
        let mut table = RegimeTable::new();
        for definition in [old_regime_2024_25(), new_regime_2024_25()] {
            // built-in definitions are known to be valid
            table
                .definitions
                .insert((definition.financial_year, definition.regime), definition);
        }
        table
    }

    /// Read a `{ "regimes": [...] }` JSON document, validating every entry
    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let config: RegimeConfig = serde_json::from_reader(reader)?;
        let mut table = RegimeTable::new();
        for definition in config.regimes {
            table.insert(definition)?;
        }
        log::info!("Loaded {} regime definitions", table.len());
        Ok(table)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Built-in definitions, overridden by those in `path` when given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut table = RegimeTable::builtin();
        if let Some(path) = path {
            table.extend(RegimeTable::from_path(path)?);
        }
        Ok(table)
    }

    /// Validate and add a definition, returning any definition it replaced
    pub fn insert(
        &mut self,
        definition: TaxRegimeDefinition,
    ) -> Result<Option<TaxRegimeDefinition>, TaxError> {
        definition.validate()?;
        let key = (definition.financial_year, definition.regime);
        let replaced = self.definitions.insert(key, definition);
        if replaced.is_some() {
            log::warn!("Duplicate {} regime for {}, keeping the later one", key.1, key.0);
        }
        Ok(replaced)
    }

    /// Add all definitions of `other`; they take precedence over existing ones
    pub fn extend(&mut self, other: RegimeTable) {
        for (key, definition) in other.definitions {
            if self.definitions.insert(key, definition).is_some() {
                log::warn!("Overriding {} regime for {}", key.1, key.0);
            }
        }
    }

    pub fn get(
        &self,
        year: FinancialYear,
        regime: RegimeKind,
    ) -> Result<&TaxRegimeDefinition, TaxError> {
        self.definitions
            .get(&(year, regime))
            .ok_or_else(|| TaxError::RegimeNotConfigured {
                regime: regime.to_string(),
                year: year.display(),
            })
    }

    /// Financial years with at least one definition, ascending
    pub fn years(&self) -> Vec<FinancialYear> {
        let mut years: Vec<_> = self.definitions.keys().map(|(year, _)| *year).collect();
        years.dedup();
        years
    }

    /// Definitions ordered by year, then OLD before NEW
    pub fn iter(&self) -> impl Iterator<Item = &TaxRegimeDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn surcharge_2024_25() -> Vec<SurchargeBand> {
    [
        (dec!(5000000), dec!(0.10)),
        (dec!(10000000), dec!(0.15)),
        (dec!(20000000), dec!(0.25)),
        (dec!(50000000), dec!(0.37)),
    ]
    .into_iter()
    .map(|(min_income, rate)| SurchargeBand { min_income, rate })
    .collect()
}

fn old_regime_2024_25() -> TaxRegimeDefinition {
    TaxRegimeDefinition {
        regime: RegimeKind::Old,
        financial_year: FinancialYear(2025),
        label: "Old Regime".to_string(),
        slabs: vec![
            Slab::new(dec!(250000), dec!(0)),
            Slab::new(dec!(500000), dec!(0.05)),
            Slab::new(dec!(1000000), dec!(0.20)),
            Slab::unbounded(dec!(0.30)),
        ],
        senior_citizen_slabs: Some(vec![
            Slab::new(dec!(300000), dec!(0)),
            Slab::new(dec!(500000), dec!(0.05)),
            Slab::new(dec!(1000000), dec!(0.20)),
            Slab::unbounded(dec!(0.30)),
        ]),
        super_senior_slabs: Some(vec![
            Slab::new(dec!(500000), dec!(0)),
            Slab::new(dec!(1000000), dec!(0.20)),
            Slab::unbounded(dec!(0.30)),
        ]),
        standard_deduction: dec!(50000),
        allows_deductions: true,
        max_deductions: DeductionLimits::default(),
        rebate: Rebate {
            max_income: dec!(500000),
            rebate_amount: dec!(12500),
        },
        surcharge: surcharge_2024_25(),
        cess: dec!(0.04),
    }
}

fn new_regime_2024_25() -> TaxRegimeDefinition {
    TaxRegimeDefinition {
        regime: RegimeKind::New,
        financial_year: FinancialYear(2025),
        label: "New Regime (2023)".to_string(),
        slabs: vec![
            Slab::new(dec!(300000), dec!(0)),
            Slab::new(dec!(600000), dec!(0.05)),
            Slab::new(dec!(900000), dec!(0.10)),
            Slab::new(dec!(1200000), dec!(0.15)),
            Slab::new(dec!(1500000), dec!(0.20)),
            Slab::unbounded(dec!(0.30)),
        ],
        senior_citizen_slabs: None,
        super_senior_slabs: None,
        standard_deduction: dec!(50000),
        allows_deductions: false,
        max_deductions: DeductionLimits::default(),
        rebate: Rebate {
            max_income: dec!(700000),
            rebate_amount: dec!(25000),
        },
        surcharge: surcharge_2024_25(),
        cess: dec!(0.04),
    }
}
