use super::error::TaxError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Indian financial year (runs 1 April to 31 March)
/// The year value represents the end year (e.g., 2025 = FY 2024-25)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinancialYear(pub i32);

impl FinancialYear {
    /// The year the built-in regime tables describe.
    pub const DEFAULT: FinancialYear = FinancialYear(2025);

    /// Create a financial year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        // On or after 1 April the date belongs to the year ending next March
        if date.month() >= 4 {
            FinancialYear(date.year() + 1)
        } else {
            FinancialYear(date.year())
        }
    }

    /// Display as "2024-25" format
    pub fn display(&self) -> String {
        format!("{}-{:02}", self.0 - 1, self.0.rem_euclid(100))
    }
}

impl std::fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for FinancialYear {
    type Err = TaxError;

    /// Accepts "2024-25", "2024-2025" or the end year alone ("2025").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TaxError::InvalidFinancialYear(s.to_string());
        let s = s.trim();

        let Some((start, end)) = s.split_once('-') else {
            return s.parse::<i32>().map(FinancialYear).map_err(|_| invalid());
        };

        let start: i32 = start.parse().map_err(|_| invalid())?;
        let end_year = match end.len() {
            2 => {
                let suffix: i32 = end.parse().map_err(|_| invalid())?;
                if suffix != (start + 1).rem_euclid(100) {
                    return Err(invalid());
                }
                start + 1
            }
            4 => {
                let end: i32 = end.parse().map_err(|_| invalid())?;
                if end != start + 1 {
                    return Err(invalid());
                }
                end
            }
            _ => return Err(invalid()),
        };
        Ok(FinancialYear(end_year))
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = TaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FinancialYear> for String {
    fn from(year: FinancialYear) -> Self {
        year.display()
    }
}

impl Default for FinancialYear {
    fn default() -> Self {
        FinancialYear::DEFAULT
    }
}
