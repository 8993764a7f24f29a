//! Calculate command - income tax under a single regime

use super::{format_inr, format_rate, write_csv, DeclarationArgs, RegimeArgs};
use clap::Args;
use itax::core::{RegimeKind, TaxResult};
use itax::tax::calculate;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CalculateCommand {
    #[command(flatten)]
    declaration: DeclarationArgs,

    #[command(flatten)]
    regime_args: RegimeArgs,

    /// Assess under this regime instead of the one each declaration names
    #[arg(short, long)]
    regime: Option<RegimeKind>,

    /// Output as JSON instead of formatted text
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output one CSV row per declaration
    #[arg(long)]
    csv: bool,
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = self.regime_args.year();
        let regimes = self.regime_args.table()?;

        let results = self
            .declaration
            .declarations()?
            .into_iter()
            .map(|declaration| {
                let declaration = match self.regime {
                    Some(regime) => declaration.with_regime(regime),
                    None => declaration,
                };
                calculate(&declaration, &regimes, year)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if self.json {
            print_json(&results)
        } else if self.csv {
            write_csv(results.iter().map(ResultRow::from), io::stdout())
        } else {
            for result in &results {
                print_result(result);
            }
            Ok(())
        }
    }
}

fn print_json(results: &[TaxResult]) -> anyhow::Result<()> {
    let json = match results {
        [single] => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(results)?,
    };
    println!("{}", json);
    Ok(())
}

/// Item/amount row of the breakdown table
#[derive(Debug, Clone, Tabled)]
pub struct LineItem {
    #[tabled(rename = "Item")]
    pub item: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
}

impl LineItem {
    fn new(item: &str, amount: String) -> Self {
        LineItem {
            item: item.to_string(),
            amount,
        }
    }
}

/// Breakdown lines shared by the calculate and compare tables
pub fn line_items(result: &TaxResult) -> Vec<LineItem> {
    vec![
        LineItem::new("Gross income", format_inr(result.gross_income)),
        LineItem::new("HRA exemption", format_inr(result.hra_exemption)),
        LineItem::new("Standard deduction", format_inr(result.standard_deduction)),
        LineItem::new("Professional tax", format_inr(result.professional_tax)),
        LineItem::new("Section deductions", format_inr(result.section_deductions.total())),
        LineItem::new("Taxable income", format_inr(result.taxable_income)),
        LineItem::new("Slab tax", format_inr(result.slab_tax)),
        LineItem::new("Rebate u/s 87A", format_inr(result.rebate)),
        LineItem::new(
            &format!("Surcharge @ {}", format_rate(result.surcharge_rate)),
            format_inr(result.surcharge),
        ),
        LineItem::new("Health & education cess", format_inr(result.cess)),
        LineItem::new("Total tax", format_inr(result.total_tax)),
        LineItem::new("Effective rate", format!("{:.2}%", result.effective_rate)),
    ]
}

fn print_result(result: &TaxResult) {
    println!();
    println!(
        "INCOME TAX ({}, FY {})",
        result.regime_label, result.financial_year
    );
    println!();

    let table = Table::new(line_items(result))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

/// Flat CSV record for one result
#[derive(Debug, Serialize)]
struct ResultRow {
    regime: String,
    financial_year: String,
    gross_income: String,
    hra_exemption: String,
    total_deductions: String,
    taxable_income: String,
    slab_tax: String,
    rebate: String,
    surcharge: String,
    cess: String,
    total_tax: String,
    effective_rate: String,
}

impl From<&TaxResult> for ResultRow {
    fn from(result: &TaxResult) -> Self {
        ResultRow {
            regime: result.regime.to_string(),
            financial_year: result.financial_year.display(),
            gross_income: format!("{:.2}", result.gross_income),
            hra_exemption: format!("{:.2}", result.hra_exemption),
            total_deductions: format!("{:.2}", result.total_deductions),
            taxable_income: format!("{:.2}", result.taxable_income),
            slab_tax: format!("{:.2}", result.slab_tax),
            rebate: format!("{:.2}", result.rebate),
            surcharge: format!("{:.2}", result.surcharge),
            cess: format!("{:.2}", result.cess),
            total_tax: format!("{:.0}", result.total_tax),
            effective_rate: format!("{:.2}", result.effective_rate),
        }
    }
}
