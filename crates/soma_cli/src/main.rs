use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Datelike;
use clap::{Parser, Subcommand};
use soma_calib::{CalibrationConfig, calibrate};
use soma_io::{generate_api, load_reference_dataset};
use soma_model::{Phase, PhaseModel};
use soma_search::{SearchConfig, calculate_year};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "soma", about = "Lunar phase calendar generator and calibration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the principal phase events of a year
    Year {
        /// Year, e.g. 2025
        year: i32,
        /// Only this phase (wire id 0-3)
        #[arg(long)]
        phase: Option<u8>,
        /// Only this month (1-12)
        #[arg(long)]
        month: Option<u32>,
        /// Use the fast 6-hour scan without boundary pad
        #[arg(long)]
        fast: bool,
    },
    /// Generate the static per-year JSON tree
    Generate {
        /// First year (inclusive)
        start_year: i32,
        /// Last year (inclusive)
        end_year: i32,
        /// Output root directory
        #[arg(long)]
        out: PathBuf,
    },
    /// Fit model parameters against reference full-moon data
    Calibrate {
        /// Root of the reference tree (<root>/moon-phase-data/<year>/index.json)
        #[arg(long)]
        ref_root: PathBuf,
        /// First calibration year (inclusive)
        #[arg(long)]
        start: i32,
        /// Last calibration year (inclusive)
        #[arg(long)]
        end: i32,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Year {
            year,
            phase,
            month,
            fast,
        } => {
            let filter = match phase {
                Some(id) => Some(Phase::from_id(id).ok_or("phase must be 0, 1, 2, or 3")?),
                None => None,
            };
            if let Some(m) = month {
                if !(1..=12).contains(&m) {
                    return Err("month must be 1-12".into());
                }
            }

            let config = if fast {
                SearchConfig::fast()
            } else {
                SearchConfig::calibrated()
            };
            let events = calculate_year(&PhaseModel::calibrated(), year, &config)?;

            let mut printed = 0;
            for event in &events {
                if filter.is_some_and(|p| event.phase != p) {
                    continue;
                }
                if month.is_some_and(|m| {
                    event.timestamp.year() != year || event.timestamp.month() != m
                }) {
                    continue;
                }
                println!("{event}");
                printed += 1;
            }
            if printed == 0 {
                println!("no matching events in {year}");
            }
            Ok(())
        }
        Commands::Generate {
            start_year,
            end_year,
            out,
        } => {
            let written = generate_api(
                &PhaseModel::calibrated(),
                &SearchConfig::calibrated(),
                start_year,
                end_year,
                &out,
            )?;
            println!(
                "wrote {written} year file(s) under {}",
                out.join("moon-phase-data").display()
            );
            Ok(())
        }
        Commands::Calibrate {
            ref_root,
            start,
            end,
        } => {
            let dataset = load_reference_dataset(&ref_root, start, end)?;
            println!(
                "loaded {} reference year(s) from {}",
                dataset.len(),
                ref_root.display()
            );

            let config = CalibrationConfig::standard(start, end);
            let result = calibrate(&dataset, &config)?;

            println!("best parameters:");
            println!(
                "  reference new moon : {}",
                result.reference_new_moon.format("%Y-%m-%dT%H:%M:%S")
            );
            println!("  synodic month days : {:.4}", result.synodic_month_days);
            println!("  avg abs error days : {:.4}", result.avg_error_days);
            println!("  comparisons        : {}", result.comparisons);
            println!("  candidates tested  : {}", result.candidates_tested);
            Ok(())
        }
    }
}
