//! CrediCalc CLI
//!
//! Command-line interface for loan amortization, savings projections and
//! multi-loan dashboard summaries

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use credicalc::export::{export_projection, export_schedule};
use credicalc::format::{format_currency, format_date, format_number, format_percent, payment_date};
use credicalc::loan::ScheduleSampling;
use credicalc::service::handle_body;
use credicalc::{
    summarize, CalculatorConfig, Locale, LoanInput, LoanResult, NamedLoan, NumberFormat,
    PortfolioSummary, SavingsInput, SavingsResult, ScenarioRunner,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Loan and savings calculator
#[derive(Parser)]
#[command(name = "credicalc", version, about = "Loan amortization and savings projections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file (defaults to ./credicalc.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Display locale: en-US, en-GB, de-DE, fr-FR or ja-JP
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Also write the schedule or projection table to a CSV file
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// First payment date (YYYY-MM-DD); adds a date column to loan tables
    #[arg(long, global = true)]
    start_date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Amortize a fixed-rate loan
    Loan(LoanArgs),
    /// Project savings growth with monthly contributions
    Savings(SavingsArgs),
    /// Summarize several named loans from a JSON file
    Dashboard {
        #[arg(long)]
        input: PathBuf,
    },
    /// Run a JSON request body (object or array) through the service layer
    Batch {
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Args)]
struct LoanArgs {
    /// Amount borrowed
    #[arg(long)]
    principal: Option<f64>,
    /// Annual interest rate in percent
    #[arg(long)]
    rate: Option<f64>,
    /// Term in years
    #[arg(long)]
    years: Option<f64>,
    /// Print every Nth month of the schedule (1 = every month)
    #[arg(long)]
    stride: Option<u32>,
}

#[derive(Args)]
struct SavingsArgs {
    /// Opening deposit
    #[arg(long)]
    initial: Option<f64>,
    /// Contribution added at the start of each month
    #[arg(long)]
    monthly: Option<f64>,
    /// Annual interest rate in percent
    #[arg(long)]
    rate: Option<f64>,
    /// Term in years
    #[arg(long)]
    years: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = CalculatorConfig::load(cli.config.as_deref())?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
        config.number_format = None;
    }

    match &cli.command {
        Commands::Loan(args) => run_loan(&cli, &config, args),
        Commands::Savings(args) => run_savings(&cli, &config, args),
        Commands::Dashboard { input } => run_dashboard(&cli, &config, input),
        Commands::Batch { input } => run_batch(&config, input),
    }
}

fn run_loan(cli: &Cli, config: &CalculatorConfig, args: &LoanArgs) -> Result<()> {
    let defaults = config.loan_defaults;
    let input = LoanInput::new(
        args.principal.unwrap_or(defaults.principal),
        args.rate.unwrap_or(defaults.annual_rate_percent),
        args.years.unwrap_or(defaults.term_years),
    );

    let sampling = match args.stride {
        Some(stride) => ScheduleSampling::from_stride(Some(stride)),
        None => config.sampling(),
    };
    let runner = ScenarioRunner::with_engines(sampling, config.projection_method);
    let result = runner.run_loan(&input)?;

    if let Some(path) = &cli.csv {
        export_schedule(path, &result)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_loan(&result, &config.number_format(), cli.start_date)?,
    }
    Ok(())
}

fn run_savings(cli: &Cli, config: &CalculatorConfig, args: &SavingsArgs) -> Result<()> {
    let defaults = config.savings_defaults;
    let input = SavingsInput::new(
        args.initial.unwrap_or(defaults.initial_deposit),
        args.monthly.unwrap_or(defaults.monthly_contribution),
        args.rate.unwrap_or(defaults.annual_rate_percent),
        args.years.unwrap_or(defaults.term_years),
    );

    let result = ScenarioRunner::from_config(config).run_savings(&input)?;

    if let Some(path) = &cli.csv {
        export_projection(path, &result)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_savings(&result, &config.number_format())?,
    }
    Ok(())
}

fn run_dashboard(cli: &Cli, config: &CalculatorConfig, input: &Path) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let loans: Vec<NamedLoan> = serde_json::from_str(&content)
        .with_context(|| format!("invalid loan list in {}", input.display()))?;

    let summary = summarize(&loans)?;
    if cli.csv.is_some() {
        log::warn!("--csv is ignored for the dashboard summary");
    }

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_dashboard(&summary, &config.number_format())?,
    }
    Ok(())
}

fn run_batch(config: &CalculatorConfig, input: &Path) -> Result<()> {
    let body = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let reply = handle_body(&body, config);
    println!("{}", serde_json::to_string_pretty(&reply.body)?);

    if reply.status != 200 {
        bail!("request rejected with status {}", reply.status);
    }
    Ok(())
}

fn print_loan(result: &LoanResult, fmt: &NumberFormat, start: Option<NaiveDate>) -> Result<()> {
    println!("Monthly Payment   {}", format_currency(result.monthly_payment, fmt)?);
    println!("Total Interest    {}", format_currency(result.total_interest, fmt)?);
    println!("Total Paid        {}", format_currency(result.total_paid, fmt)?);
    println!("Payments          {}", result.total_periods);
    println!();

    match start {
        Some(_) => println!(
            "{:>6} {:>12} {:>16} {:>16} {:>18}",
            "Month", "Date", "Principal", "Interest", "Balance"
        ),
        None => println!(
            "{:>6} {:>16} {:>16} {:>18}",
            "Month", "Principal", "Interest", "Balance"
        ),
    }

    for period in &result.schedule {
        let principal = format_currency(period.principal_paid, fmt)?;
        let interest = format_currency(period.interest_paid, fmt)?;
        let balance = format_currency(period.remaining_balance, fmt)?;

        match start.and_then(|first| payment_date(first, period.period_index)) {
            Some(date) => println!(
                "{:>6} {:>12} {:>16} {:>16} {:>18}",
                period.period_index,
                format_date(date, fmt),
                principal,
                interest,
                balance
            ),
            None => println!(
                "{:>6} {:>16} {:>16} {:>18}",
                period.period_index, principal, interest, balance
            ),
        }
    }
    Ok(())
}

fn print_savings(result: &SavingsResult, fmt: &NumberFormat) -> Result<()> {
    println!("Final Balance     {}", format_currency(result.final_balance, fmt)?);
    println!("Contributions     {}", format_currency(result.total_contributions, fmt)?);
    println!("Interest Earned   {}", format_currency(result.total_interest, fmt)?);
    println!(
        "Interest Share    {}",
        format_percent(result.interest_share() * 100.0, 1, fmt)?
    );
    println!();

    println!(
        "{:>5} {:>18} {:>16} {:>18}",
        "Year", "Contributions", "Interest", "Balance"
    );
    for point in &result.projection {
        println!(
            "{:>5} {:>18} {:>16} {:>18}",
            point.year_index,
            format_currency(point.cumulative_contributions, fmt)?,
            format_currency(point.cumulative_interest, fmt)?,
            format_currency(point.balance, fmt)?
        );
    }
    Ok(())
}

fn print_dashboard(summary: &PortfolioSummary, fmt: &NumberFormat) -> Result<()> {
    println!("Total Loan Balance      {}", format_currency(summary.total_principal, fmt)?);
    println!("Total Monthly Payments  {}", format_currency(summary.total_monthly_payment, fmt)?);
    println!("Total Interest          {}", format_currency(summary.total_interest, fmt)?);
    println!(
        "Average Rate            {}",
        format_percent(summary.average_rate_percent, 2, fmt)?
    );
    println!();

    println!(
        "{:<20} {:>16} {:>8} {:>8} {:>14}",
        "Loan", "Principal", "Rate", "Months", "Payment"
    );
    for loan in &summary.loans {
        println!(
            "{:<20} {:>16} {:>8} {:>8} {:>14}",
            loan.name,
            format_currency(loan.principal, fmt)?,
            format_number(loan.annual_rate_percent, 2, fmt)?,
            loan.total_periods,
            format_currency(loan.monthly_payment, fmt)?
        );
    }
    Ok(())
}
