//! Regimes command - list and validate regime definitions

use super::{format_inr, format_rate};
use anyhow::Context;
use clap::Args;
use itax::core::{FinancialYear, RegimeConfig, RegimeTable, Slab, TaxRegimeDefinition};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RegimesCommand {
    /// Only show this financial year (e.g., 2024-25)
    #[arg(short, long)]
    year: Option<FinancialYear>,

    /// JSON file with regime definitions to validate and merge over the built-in ones
    #[arg(long)]
    regimes: Option<PathBuf>,

    /// Output the merged definitions as a regime configuration document
    #[arg(long)]
    json: bool,
}

impl RegimesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let path = self.regimes.as_deref();
        let table = RegimeTable::load(path).with_context(|| match path {
            Some(path) => format!("Invalid regime definitions in {}", path.display()),
            None => "Invalid built-in regime definitions".to_string(),
        })?;

        let definitions: Vec<&TaxRegimeDefinition> = table
            .iter()
            .filter(|d| self.year.is_none_or(|y| d.financial_year == y))
            .collect();

        if let Some(year) = self.year {
            if definitions.is_empty() {
                anyhow::bail!(
                    "No regimes configured for FY {} (available: {})",
                    year,
                    table
                        .years()
                        .iter()
                        .map(FinancialYear::display)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }

        if self.json {
            let config = RegimeConfig {
                regimes: definitions.into_iter().cloned().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }

        for definition in &definitions {
            print_definition(definition);
        }
        println!("\u{2713} {} regime definitions valid", definitions.len());
        Ok(())
    }
}

#[derive(Debug, Clone, Tabled)]
struct SlabRow {
    #[tabled(rename = "Income From")]
    from: String,
    #[tabled(rename = "Income Up To")]
    up_to: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

fn slab_rows(slabs: &[Slab]) -> Vec<SlabRow> {
    let mut lower = Decimal::ZERO;
    slabs
        .iter()
        .map(|slab| {
            let row = SlabRow {
                from: format_inr(lower),
                up_to: slab.up_to.map_or("and above".to_string(), format_inr),
                rate: format_rate(slab.rate),
            };
            if let Some(up_to) = slab.up_to {
                lower = up_to;
            }
            row
        })
        .collect()
}

fn print_slabs(title: &str, slabs: &[Slab]) {
    println!("  {}", title);
    let table = Table::new(slab_rows(slabs))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(..2)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

fn print_definition(definition: &TaxRegimeDefinition) {
    println!();
    println!(
        "{} (FY {})",
        definition.display_name().to_uppercase(),
        definition.financial_year
    );
    println!();

    print_slabs("Slabs", &definition.slabs);
    if let Some(slabs) = &definition.senior_citizen_slabs {
        print_slabs("Senior citizen slabs (60+)", slabs);
    }
    if let Some(slabs) = &definition.super_senior_slabs {
        print_slabs("Super senior citizen slabs (80+)", slabs);
    }
    println!();

    println!(
        "  Standard deduction:   {}",
        format_inr(definition.standard_deduction)
    );
    println!(
        "  Chapter VI-A:         {}",
        if definition.allows_deductions {
            "allowed"
        } else {
            "not allowed"
        }
    );
    println!(
        "  Rebate u/s 87A:       up to {} for taxable income up to {}",
        format_inr(definition.rebate.rebate_amount),
        format_inr(definition.rebate.max_income)
    );
    for band in &definition.surcharge {
        println!(
            "  Surcharge:            {} from {}",
            format_rate(band.rate),
            format_inr(band.min_income)
        );
    }
    println!("  Cess:                 {}", format_rate(definition.cess));
    println!();
}
