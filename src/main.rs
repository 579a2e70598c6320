//! Quote tool entry point — CLI wiring and config-driven estimation.

use std::path::Path;
use std::process;

use solar_quote::config::EstimatorConfig;
use solar_quote::escalation;
use solar_quote::incentive::{self, IncentiveInputs};
use solar_quote::input;
use solar_quote::io::export::export_csv;
use solar_quote::quote::{QuoteReport, SavingsRequest, savings_view};

/// Parsed CLI arguments. Raw string values are kept as entered; numeric
/// resolution happens through the input combinators so malformed values
/// degrade to defaults instead of failing.
struct CliArgs {
    config_path: Option<String>,
    bill: Option<String>,
    years: Option<String>,
    escalation: Option<String>,
    program: Option<String>,
    battery: Option<String>,
    qty: Option<String>,
    peak_demand: Option<String>,
    auto_commit: bool,
    commit: Option<String>,
    perf: Option<String>,
    csv_out: Option<String>,
}

fn print_help() {
    eprintln!("solar-quote — residential solar/battery savings and incentive estimator");
    eprintln!();
    eprintln!("Usage: solar-quote [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>       Load business constants from TOML config file");
    eprintln!("  --bill <dollars>      Current monthly utility bill (default: 0)");
    eprintln!("  --years <1-30>        Projection term in years (default: from config)");
    eprintln!("  --escalation <rate>   Annual escalation rate, fractional (default: from config)");
    eprintln!("  --program <id>        Incentive program id (default: first in catalog)");
    eprintln!("  --battery <id>        Battery model id (default: first in catalog)");
    eprintln!("  --qty <1-99>          Number of batteries (default: 1)");
    eprintln!("  --peak-demand <kW>    Site peak demand, feeds --auto-commit");
    eprintln!("  --auto-commit         Suggest committed kW from peak demand");
    eprintln!("  --commit <kW>         Committed event kW per battery (default: from config)");
    eprintln!("  --perf <0-1>          Performance factor (default: from config)");
    eprintln!("  --csv-out <path>      Export the per-year schedule to CSV");
    eprintln!("  --help                Show this help message");
}

/// Consumes the value following a flag, or exits with a usage error.
fn take_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {flag} requires a value");
        process::exit(1);
    }
    args[*i].clone()
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        bill: None,
        years: None,
        escalation: None,
        program: None,
        battery: None,
        qty: None,
        peak_demand: None,
        auto_commit: false,
        commit: None,
        perf: None,
        csv_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => cli.config_path = Some(take_value(&args, &mut i, "--config")),
            "--bill" => cli.bill = Some(take_value(&args, &mut i, "--bill")),
            "--years" => cli.years = Some(take_value(&args, &mut i, "--years")),
            "--escalation" => cli.escalation = Some(take_value(&args, &mut i, "--escalation")),
            "--program" => cli.program = Some(take_value(&args, &mut i, "--program")),
            "--battery" => cli.battery = Some(take_value(&args, &mut i, "--battery")),
            "--qty" => cli.qty = Some(take_value(&args, &mut i, "--qty")),
            "--peak-demand" => cli.peak_demand = Some(take_value(&args, &mut i, "--peak-demand")),
            "--auto-commit" => cli.auto_commit = true,
            "--commit" => cli.commit = Some(take_value(&args, &mut i, "--commit")),
            "--perf" => cli.perf = Some(take_value(&args, &mut i, "--perf")),
            "--csv-out" => cli.csv_out = Some(take_value(&args, &mut i, "--csv-out")),
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --config takes priority, then the built-in rate sheet.
    let config = if let Some(ref path) = cli.config_path {
        match EstimatorConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        EstimatorConfig::builtin()
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    let catalog = config.catalog();

    // Savings projection. Blank or malformed values fall back to the
    // configured defaults; out-of-range values clamp.
    let years = input::int_in(
        cli.years.as_deref(),
        i64::from(config.escalation.default_years),
        i64::from(escalation::YEARS_MIN),
        i64::from(escalation::YEARS_MAX),
    ) as u32;
    let savings = savings_view(&SavingsRequest {
        monthly_bill: input::num_or(cli.bill.as_deref(), 0.0),
        annual_rate: input::num_or(
            cli.escalation.as_deref(),
            config.escalation.default_annual_rate,
        ),
        years,
    });

    // Incentive estimate.
    let inputs = IncentiveInputs {
        program_id: cli.program.clone().unwrap_or_default(),
        battery_id: cli.battery.clone().unwrap_or_default(),
        quantity: input::int_in(cli.qty.as_deref(), 1, incentive::QTY_MIN, incentive::QTY_MAX),
        peak_demand_kw: input::num_or(cli.peak_demand.as_deref(), 0.0),
        auto_suggest_commit: cli.auto_commit,
        commit_kw_per_unit: cli.commit.as_deref().map(|s| input::num_or(Some(s), f64::NAN)),
        performance: cli.perf.as_deref().map(|s| input::num_or(Some(s), f64::NAN)),
    };
    let estimate = incentive::estimate(&inputs, &catalog, &config.incentive);

    let report = QuoteReport {
        savings,
        incentive: estimate,
    };
    println!("{report}");

    if let Some(ref path) = cli.csv_out {
        let rows = escalation::project_schedule(
            input::num_or(cli.bill.as_deref(), 0.0),
            input::num_or(
                cli.escalation.as_deref(),
                config.escalation.default_annual_rate,
            ),
            years,
        );
        if let Err(e) = export_csv(&rows, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Schedule written to {path}");
    }
}
