//! Bill calculator entry point — CLI wiring and config-driven analysis.

use std::path::Path;
use std::process;

use nem_calc::analysis::Analysis;
use nem_calc::config::ScenarioConfig;
use nem_calc::io::export::export_csv;
use nem_calc::report;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    usage_override: Option<f64>,
    csv_out: Option<String>,
}

fn print_help() {
    eprintln!("nem-calc — Tiered-tariff bill and solar savings calculator");
    eprintln!();
    eprintln!("Usage: nem-calc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load scenario from TOML config file");
    eprintln!("  --preset <name>     Use a built-in preset (baseline, high_usage, battery_heavy)");
    eprintln!("  --usage <kwh>       Override monthly usage in kWh");
    eprintln!("  --csv-out <path>    Export the before/after bill comparison to CSV");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        usage_override: None,
        csv_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--usage" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --usage requires a kWh argument");
                    process::exit(1);
                }
                if let Ok(u) = args[i].parse::<f64>() {
                    cli.usage_override = Some(u);
                } else {
                    eprintln!("error: --usage value \"{}\" is not a valid number", args[i]);
                    process::exit(1);
                }
            }
            "--csv-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --csv-out requires a path argument");
                    process::exit(1);
                }
                cli.csv_out = Some(args[i].clone());
            }
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

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply usage override; clears any bill-amount input so the override wins
    if let Some(usage) = cli.usage_override {
        scenario.usage.monthly_kwh = usage;
        scenario.usage.monthly_bill_rm = None;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let analysis = Analysis::compute(&scenario);

    print!("{}", report::render(&analysis));

    // Export CSV if requested
    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(
            &analysis.atap.bill_without_solar,
            &analysis.atap.bill_with_solar,
            Path::new(path),
        ) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Comparison written to {path}");
    }
}
