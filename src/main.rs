mod cmd;

use clap::{Parser, Subcommand};

/// Indian income tax and GST calculator
#[derive(Parser, Debug)]
#[command(name = "itax", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate income tax under one regime
    Calculate(cmd::calculate::CalculateCommand),
    /// Compare the OLD and NEW regimes and recommend the cheaper one
    Compare(cmd::compare::CompareCommand),
    /// Calculate GST and look up rates
    Gst(cmd::gst::GstCommand),
    /// List and validate regime definitions
    Regimes(cmd::regimes::RegimesCommand),
    /// Print the JSON Schema of an input document
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calculate(command) => command.exec(),
        Command::Compare(command) => command.exec(),
        Command::Gst(command) => command.exec(),
        Command::Regimes(command) => command.exec(),
        Command::Schema(command) => command.exec(),
    }
}
