//! GST command - calculate GST and browse the rate schedule

use super::format_rate;
use anyhow::Context;
use clap::{Args, Subcommand};
use itax::core::{GstBreakdown, GstCategory, GstRateEntry, GstSchedule};
use itax::tax::calculate_gst_with_schedule;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct GstCommand {
    /// JSON file with a GST rate schedule replacing the built-in one
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    #[command(subcommand)]
    action: GstAction,
}

#[derive(Subcommand, Debug)]
enum GstAction {
    /// Calculate GST on an amount
    Calculate {
        /// Taxable value
        #[arg(short, long)]
        amount: Decimal,

        /// GST rate in percent (default 18)
        #[arg(short, long)]
        rate: Option<Decimal>,

        /// Take the rate from the schedule for this category
        /// (essential, standard, luxury or sin)
        #[arg(short, long)]
        category: Option<GstCategory>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// List the active GST rates
    Rates {
        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Find the rates covering an item
    Search {
        /// Item name or part of it
        query: String,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
}

impl GstCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let path = self.schedule.as_deref();
        let schedule = GstSchedule::load(path).with_context(|| match path {
            Some(path) => format!("Failed to load GST schedule from {}", path.display()),
            None => "Failed to load built-in GST schedule".to_string(),
        })?;

        match &self.action {
            GstAction::Calculate {
                amount,
                rate,
                category,
                json,
            } => {
                let breakdown = calculate_gst_with_schedule(&schedule, *amount, *rate, *category)?;
                if *json {
                    println!("{}", serde_json::to_string_pretty(&breakdown)?);
                } else {
                    print_breakdown(&breakdown);
                }
            }
            GstAction::Rates { json } => {
                print_entries("GST RATES", &schedule.active_rates(), *json)?;
            }
            GstAction::Search { query, json } => {
                let found = schedule.search(query);
                if found.is_empty() && !*json {
                    println!("No GST rates found for '{}'", query.trim());
                    return Ok(());
                }
                let title = format!("GST RATES MATCHING '{}'", query.trim());
                print_entries(&title, &found, *json)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Tabled)]
struct BreakdownLine {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn print_breakdown(breakdown: &GstBreakdown) {
    let line = |item: String, amount: Decimal| BreakdownLine {
        item,
        amount: format!("₹{:.2}", amount),
    };
    let half_rate = breakdown.gst_rate / Decimal::TWO;
    let rows = vec![
        line("Amount".to_string(), breakdown.amount),
        line(format!("CGST @ {}%", half_rate.normalize()), breakdown.cgst),
        line(format!("SGST @ {}%", half_rate.normalize()), breakdown.sgst),
        line(format!("GST @ {}%", breakdown.gst_rate.normalize()), breakdown.gst),
        line("Total".to_string(), breakdown.total),
    ];

    println!();
    match breakdown.category {
        Some(category) => println!("GST CALCULATION ({})", category),
        None => println!("GST CALCULATION"),
    }
    println!();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

#[derive(Debug, Clone, Tabled)]
struct RateRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Items")]
    items: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&GstRateEntry> for RateRow {
    fn from(entry: &GstRateEntry) -> Self {
        RateRow {
            category: entry.category.to_string(),
            rate: format_rate(entry.rate / Decimal::ONE_HUNDRED),
            items: entry.items.join(", "),
            description: entry.description.clone(),
        }
    }
}

fn print_entries(title: &str, entries: &[&GstRateEntry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    println!();
    println!("{}", title);
    println!();
    let rows: Vec<RateRow> = entries.iter().copied().map(RateRow::from).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!();
    Ok(())
}
