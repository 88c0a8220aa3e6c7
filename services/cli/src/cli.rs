use crate::commands::{evaluate_segment, list_rules, parse_rates};
use clap::{Args, Parser, Subcommand};
use flight_earn::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "earn",
    about = "Calculate points and status credits earned on a flight segment",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every configured rule against a segment and calculate with the first match
    Segment(SegmentArgs),
    /// Expand raw points/credits rate strings into a per-fare-class table
    Rates(RatesArgs),
    /// List the configured rules in evaluation order
    Rules,
}

#[derive(Args, Debug)]
pub(crate) struct SegmentArgs {
    /// Origin airport IATA code
    #[arg(long)]
    pub(crate) from: String,
    /// Destination airport IATA code
    #[arg(long)]
    pub(crate) to: String,
    /// Fare-earn category to calculate for
    #[arg(long)]
    pub(crate) category: String,
    /// Print the calculation result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RatesArgs {
    /// Points per fare class, whitespace separated (thousands separators allowed)
    #[arg(long)]
    pub(crate) points: String,
    /// Status credits per fare class, whitespace separated
    #[arg(long)]
    pub(crate) credits: String,
    /// Fare class labels in column order
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) labels: Vec<String>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Segment(args) => evaluate_segment(args),
        Command::Rates(args) => parse_rates(args),
        Command::Rules => list_rules(),
    }
}
