//! Schema command - print expected input formats

use clap::Args;
use itax::core::{GstConfig, IncomeDeclaration, RegimeConfig};
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which input document to describe
    #[arg(value_enum, default_value = "declaration")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for an income declaration (--input)
    Declaration,
    /// JSON Schema for a regime definitions file (--regimes)
    Regimes,
    /// JSON Schema for a GST rate schedule (gst --schedule)
    Gst,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schema = match self.format {
            SchemaFormat::Declaration => schema_for!(IncomeDeclaration),
            SchemaFormat::Regimes => schema_for!(RegimeConfig),
            SchemaFormat::Gst => schema_for!(GstConfig),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}
