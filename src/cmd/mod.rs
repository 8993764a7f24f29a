pub mod calculate;
pub mod compare;
pub mod gst;
pub mod regimes;
pub mod schema;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use itax::core::{FinancialYear, IncomeDeclaration, RegimeTable};
use itax::tax::round_half_up;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Where declarations come from: a JSON file, or quick-estimate flags
#[derive(Args, Debug)]
pub struct DeclarationArgs {
    /// JSON file with one declaration or an array of them ("-" for stdin)
    #[arg(short, long, conflicts_with_all = ["salary", "other_income", "deductions"])]
    input: Option<PathBuf>,

    /// Annual salary, for a quick estimate without an input file
    #[arg(long)]
    salary: Option<Decimal>,

    /// Income from other sources, for a quick estimate
    #[arg(long)]
    other_income: Option<Decimal>,

    /// Lump sum claimed under 80C, for a quick estimate
    #[arg(long)]
    deductions: Option<Decimal>,
}

impl DeclarationArgs {
    /// Declarations to assess, validated once here
    pub fn declarations(&self) -> anyhow::Result<Vec<IncomeDeclaration>> {
        let declarations = match &self.input {
            Some(path) => read_declarations(path)?,
            None => {
                let Some(salary) = self.salary else {
                    anyhow::bail!(
                        "Provide an input file with --input or a --salary for a quick estimate."
                    );
                };
                vec![IncomeDeclaration::quick(
                    salary,
                    self.other_income.unwrap_or_default(),
                    self.deductions.unwrap_or_default(),
                )]
            }
        };

        for (i, declaration) in declarations.iter().enumerate() {
            declaration
                .validate()
                .with_context(|| format!("declaration #{}", i + 1))?;
        }
        Ok(declarations)
    }
}

/// Which regime rules to use
#[derive(Args, Debug)]
pub struct RegimeArgs {
    /// Financial year (e.g., 2024-25)
    #[arg(short, long, conflicts_with = "on")]
    year: Option<FinancialYear>,

    /// Use the financial year containing this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    on: Option<NaiveDate>,

    /// JSON file with regime definitions overriding the built-in ones
    #[arg(long)]
    regimes: Option<PathBuf>,
}

impl RegimeArgs {
    pub fn year(&self) -> FinancialYear {
        match (self.year, self.on) {
            (Some(year), _) => year,
            (None, Some(date)) => FinancialYear::from_date(date),
            (None, None) => FinancialYear::DEFAULT,
        }
    }

    pub fn table(&self) -> anyhow::Result<RegimeTable> {
        let path = self.regimes.as_deref();
        RegimeTable::load(path).with_context(|| match path {
            Some(path) => format!("Failed to load regimes from {}", path.display()),
            None => "Failed to load built-in regimes".to_string(),
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

/// Read one declaration or an array of declarations (or stdin with "-")
pub fn read_declarations(path: &Path) -> anyhow::Result<Vec<IncomeDeclaration>> {
    let value: serde_json::Value = if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
        serde_json::from_slice(&buffer)?
    } else {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", path.display()))?
    };

    let declarations = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    log::info!("Read {} declarations", declarations.len());
    Ok(declarations)
}

pub fn write_csv<I, R, W>(records: I, writer: W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: io::Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records.into_iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Whole rupees with Indian digit grouping, e.g. "₹12,34,567"
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount, 0);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}₹{}", group_indian(&digits))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), last_three)
}

/// Rate as a percentage, e.g. 0.04 -> "4%"
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
