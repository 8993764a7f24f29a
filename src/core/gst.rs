use super::error::TaxError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Highest GST rate (percent) in force
pub const MAX_GST_RATE: Decimal = dec!(28);
/// Rate used when no category or rate is supplied
pub const DEFAULT_GST_RATE: Decimal = dec!(18);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GstCategory {
    Essential,
    Standard,
    Luxury,
    Sin,
}

impl GstCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GstCategory::Essential => "essential",
            GstCategory::Standard => "standard",
            GstCategory::Luxury => "luxury",
            GstCategory::Sin => "sin",
        }
    }
}

impl std::fmt::Display for GstCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GstCategory {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "essential" => Ok(GstCategory::Essential),
            "standard" => Ok(GstCategory::Standard),
            "luxury" => Ok(GstCategory::Luxury),
            "sin" => Ok(GstCategory::Sin),
            _ => Err(TaxError::UnknownGstCategory(s.to_string())),
        }
    }
}

/// A GST rate slab and the goods and services it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GstRateEntry {
    pub category: GstCategory,
    /// Rate in percent
    #[schemars(with = "f64")]
    pub rate: Decimal,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// GST amounts for one taxable value, split into central and state shares
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GstBreakdown {
    #[schemars(with = "f64")]
    pub amount: Decimal,
    #[schemars(with = "f64")]
    pub gst_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<GstCategory>,
    #[schemars(with = "f64")]
    pub gst: Decimal,
    #[schemars(with = "f64")]
    pub cgst: Decimal,
    #[schemars(with = "f64")]
    pub sgst: Decimal,
    #[schemars(with = "f64")]
    pub total: Decimal,
}

/// On-disk layout of a GST schedule file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GstConfig {
    pub rates: Vec<GstRateEntry>,
}

/// Ordered list of GST rate entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GstSchedule {
    entries: Vec<GstRateEntry>,
}

pub fn validate_gst_rate(rate: Decimal) -> Result<(), TaxError> {
    if rate < Decimal::ZERO || rate > MAX_GST_RATE {
        return Err(TaxError::InvalidGstRate(rate));
    }
    Ok(())
}

impl GstSchedule {
    pub fn new(entries: Vec<GstRateEntry>) -> Result<Self, TaxError> {
        for entry in &entries {
            validate_gst_rate(entry.rate)?;
        }
        Ok(GstSchedule { entries })
    }

    pub fn builtin() -> Self {
        let entry = |category, rate, items: &[&str], description: &str| GstRateEntry {
            category,
            rate,
            items: items.iter().map(|i| i.to_string()).collect(),
            description: description.to_string(),
            active: true,
        };

        GstSchedule {
            entries: vec![
                entry(
                    GstCategory::Essential,
                    dec!(0),
                    &[
                        "Fresh vegetables",
                        "Fresh fruits",
                        "Fresh milk",
                        "Eggs",
                        "Curd",
                        "Bread",
                        "Salt",
                        "Jaggery",
                    ],
                    "Essential food items - Nil rated",
                ),
                entry(
                    GstCategory::Essential,
                    dec!(5),
                    &[
                        "Sugar",
                        "Tea",
                        "Coffee",
                        "Edible oils",
                        "Coal",
                        "Domestic LPG",
                        "Life-saving drugs",
                        "Kerosene",
                    ],
                    "Essential commodities - 5% GST",
                ),
                entry(
                    GstCategory::Standard,
                    dec!(12),
                    &[
                        "Processed food",
                        "Computers",
                        "Mobile phones under ₹15,000",
                        "Butter",
                        "Cheese",
                        "Ghee",
                        "Ayurvedic medicines",
                    ],
                    "Standard rate goods - 12% GST",
                ),
                entry(
                    GstCategory::Standard,
                    dec!(18),
                    &[
                        "Most goods and services",
                        "IT services",
                        "Telecom services",
                        "Financial services",
                        "Restaurants (non-AC)",
                        "Soap",
                        "Toothpaste",
                    ],
                    "Default rate for most items - 18% GST",
                ),
                entry(
                    GstCategory::Luxury,
                    dec!(28),
                    &[
                        "Luxury cars",
                        "Two-wheelers above 350cc",
                        "AC restaurants",
                        "Hotels (₹7,500+)",
                        "Cinema tickets (₹100+)",
                        "Cigarettes",
                        "Aerated drinks",
                    ],
                    "Luxury and sin goods - 28% GST",
                ),
            ],
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> anyhow::Result<Self> {
        let config: GstConfig = serde_json::from_reader(reader)?;
        let schedule = GstSchedule::new(config.rates)?;
        log::info!("Loaded {} GST rate entries", schedule.entries.len());
        Ok(schedule)
    }

    /// Schedule from `path`, or the built-in one
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_reader(BufReader::new(File::open(path)?)),
            None => Ok(Self::builtin()),
        }
    }

    pub fn entries(&self) -> &[GstRateEntry] {
        &self.entries
    }

    /// Rate of the first active entry for `category`, in schedule order
    pub fn rate_for(&self, category: GstCategory) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.active && e.category == category)
            .map(|e| e.rate)
    }

    /// Active entries, lowest rate first
    pub fn active_rates(&self) -> Vec<&GstRateEntry> {
        let mut rates: Vec<_> = self.entries.iter().filter(|e| e.active).collect();
        rates.sort_by(|a, b| a.rate.cmp(&b.rate));
        rates
    }

    /// Active entries listing an item that contains `query` (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<&GstRateEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| e.active)
            .filter(|e| e.items.iter().any(|item| item.to_lowercase().contains(&query)))
            .collect()
    }
}
