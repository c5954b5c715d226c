//! Canivete CLI
//!
//! Command-line front end for the toolkit helpers

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use canivete::internet::{
    ConvertMediumToMdOutput, MediumClient, MediumConfig, DEFAULT_MEDIUM_ENDPOINT,
};
use canivete::programming::{debug_jwt, new_uuid, JwtDebugOutput};
use canivete::{
    calculate_compound_interests, from_unix_timestamp, CompoundInterestRequest,
    CompoundInterestResult,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "canivete", author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Financial calculators
    #[command(subcommand)]
    Finance(FinanceCommand),

    /// Date and time conversions
    #[command(subcommand)]
    Datetime(DatetimeCommand),

    /// Programming helpers
    #[command(subcommand)]
    Programming(ProgrammingCommand),

    /// Internet helpers
    #[command(subcommand)]
    Internet(InternetCommand),
}

#[derive(Subcommand, Debug)]
enum FinanceCommand {
    /// Future value with optional regular contributions
    CompoundInterests(CompoundInterestArgs),
}

#[derive(Args, Debug)]
#[command(allow_negative_numbers = true)]
struct CompoundInterestArgs {
    /// Initial amount (p)
    #[arg(short, long)]
    principal: f64,

    /// Compounding periods per year (n)
    #[arg(short = 'n', long)]
    periods_per_year: f64,

    /// Duration in years (t)
    #[arg(short = 't', long)]
    duration: f64,

    /// Regular contribution amount (m)
    #[arg(short = 'm', long, default_value_t = 0.0)]
    contribution: f64,

    /// Contributions per compounding period (y)
    #[arg(short = 'y', long, default_value_t = 0.0)]
    contributions_per_period: f64,

    /// Annual interest rate in percent (r)
    #[arg(short, long)]
    rate: f64,

    /// Also write the history to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum DatetimeCommand {
    /// Convert a Unix timestamp (seconds) to a UTC date
    #[command(allow_negative_numbers = true)]
    FromUnix { seconds: i64 },
}

#[derive(Subcommand, Debug)]
enum ProgrammingCommand {
    /// Decode the header and payload of a JWT (signature is not verified)
    Jwt { token: String },

    /// Generate a random UUID
    Uuid,
}

#[derive(Subcommand, Debug)]
enum InternetCommand {
    /// Convert a Medium post to Markdown
    MediumToMd {
        post_id: String,

        /// GraphQL endpoint
        #[arg(long, env = "CANIVETE_MEDIUM_ENDPOINT", default_value = DEFAULT_MEDIUM_ENDPOINT)]
        endpoint: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let format = cli.output;

    match cli.command {
        Command::Finance(FinanceCommand::CompoundInterests(args)) => run_compound_interests(args, format),
        Command::Datetime(DatetimeCommand::FromUnix { seconds }) => {
            let output = from_unix_timestamp(seconds)?;
            emit(format, &output, || println!("{}", output.utc_timestamp))
        }
        Command::Programming(ProgrammingCommand::Jwt { token }) => {
            let output = debug_jwt(&token)?;
            emit(format, &output, || print_jwt(&output))
        }
        Command::Programming(ProgrammingCommand::Uuid) => {
            let output = new_uuid();
            emit(format, &output, || println!("{}", output.uuid))
        }
        Command::Internet(InternetCommand::MediumToMd { post_id, endpoint, timeout_secs }) => {
            let config = MediumConfig {
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
            };
            let client = MediumClient::new(config)?;
            let output: ConvertMediumToMdOutput = client
                .convert_medium_to_md(&post_id)
                .await
                .with_context(|| format!("error getting post data for {}", post_id))?;
            emit(format, &output, || print!("{}", output.markdown))
        }
    }
}

fn run_compound_interests(args: CompoundInterestArgs, format: OutputFormat) -> Result<()> {
    let request = CompoundInterestRequest::new(args.principal, args.periods_per_year, args.duration, args.rate)
        .with_contributions(args.contribution, args.contributions_per_period);

    let result = calculate_compound_interests(&request)?;

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
        result
            .write_history_csv(file)
            .with_context(|| format!("unable to write history to {}", path.display()))?;
        log::info!("history written to {}", path.display());
    }

    emit(format, &result, || print_compound_interests(&result))
}

/// Print `value` as pretty JSON, or run the text renderer
fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce()) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => text(),
    }
    Ok(())
}

fn print_compound_interests(result: &CompoundInterestResult) {
    println!("Final amount:        {:.2}", result.total.final_amount);
    println!("Total contributions: {:.2}", result.total.total_contributions);
    println!("Interests:           {:.2}", result.total.interests);

    if result.history.is_empty() {
        return;
    }

    println!();
    println!("{:>6} {:>16} {:>20} {:>16}", "Period", "Final amount", "Contributions", "Interests");
    println!("{}", "-".repeat(61));
    for entry in &result.history {
        println!(
            "{:>6} {:>16.2} {:>20.2} {:>16.2}",
            entry.period, entry.totals.final_amount, entry.totals.total_contributions, entry.totals.interests,
        );
    }
}

fn print_jwt(output: &JwtDebugOutput) {
    // Maps serialize infallibly
    let header = serde_json::to_string_pretty(&output.header).unwrap_or_default();
    let payload = serde_json::to_string_pretty(&output.payload).unwrap_or_default();

    println!("Header:\n{}", header);
    println!("Payload:\n{}", payload);
}
