//! Compare command - OLD vs NEW regime for the same declaration

use super::calculate::line_items;
use super::{format_inr, write_csv, DeclarationArgs, RegimeArgs};
use clap::Args;
use itax::core::{RegimeComparison, RegimeKind};
use itax::tax::compare_regimes;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CompareCommand {
    #[command(flatten)]
    declaration: DeclarationArgs,

    #[command(flatten)]
    regime_args: RegimeArgs,

    /// Output as JSON instead of formatted text
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output one CSV row per declaration
    #[arg(long)]
    csv: bool,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = self.regime_args.year();
        let regimes = self.regime_args.table()?;

        let comparisons = self
            .declaration
            .declarations()?
            .iter()
            .map(|declaration| compare_regimes(declaration, &regimes, year))
            .collect::<Result<Vec<_>, _>>()?;

        if self.json {
            let json = match comparisons.as_slice() {
                [single] => serde_json::to_string_pretty(single)?,
                all => serde_json::to_string_pretty(all)?,
            };
            println!("{}", json);
            Ok(())
        } else if self.csv {
            write_csv(comparisons.iter().map(ComparisonRow::from), io::stdout())
        } else {
            for comparison in &comparisons {
                print_comparison(comparison);
            }
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct ComparisonLine {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Old Regime")]
    old: String,
    #[tabled(rename = "New Regime")]
    new: String,
}

fn print_comparison(comparison: &RegimeComparison) {
    println!();
    println!("REGIME COMPARISON (FY {})", comparison.new.financial_year);
    println!();

    let rows: Vec<ComparisonLine> = line_items(&comparison.old)
        .into_iter()
        .zip(line_items(&comparison.new))
        .map(|(old, new)| ComparisonLine {
            // surcharge label carries the rate, which may differ per regime
            item: if old.item == new.item {
                old.item
            } else {
                "Surcharge".to_string()
            },
            old: old.amount,
            new: new.amount,
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();

    let regime = match comparison.recommendation {
        RegimeKind::Old => "Old",
        RegimeKind::New => "New",
    };
    if comparison.savings.is_zero() {
        println!("RECOMMENDATION: {} Regime (both regimes cost the same)", regime);
    } else {
        println!(
            "RECOMMENDATION: {} Regime saves {}",
            regime,
            format_inr(comparison.savings)
        );
    }
    println!();
}

#[derive(Debug, Serialize)]
struct ComparisonRow {
    financial_year: String,
    gross_income: String,
    old_taxable_income: String,
    old_total_tax: String,
    new_taxable_income: String,
    new_total_tax: String,
    recommendation: String,
    savings: String,
}

impl From<&RegimeComparison> for ComparisonRow {
    fn from(comparison: &RegimeComparison) -> Self {
        ComparisonRow {
            financial_year: comparison.new.financial_year.display(),
            gross_income: format!("{:.2}", comparison.new.gross_income),
            old_taxable_income: format!("{:.2}", comparison.old.taxable_income),
            old_total_tax: format!("{:.0}", comparison.old.total_tax),
            new_taxable_income: format!("{:.2}", comparison.new.taxable_income),
            new_total_tax: format!("{:.0}", comparison.new.total_tax),
            recommendation: comparison.recommendation.to_string(),
            savings: format!("{:.0}", comparison.savings),
        }
    }
}
