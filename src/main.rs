mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{CheckArgs, Cli, Commands};
use fleetcheck::db::Database;
use fleetcheck::logic::parse_candidate;
use fleetcheck::models::{FleetSnapshot, FuelRecord, MaintenanceRecord};
use fleetcheck::{AvailabilityChecker, Config, RecordValidator, Validate, ValidationResult};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const EXIT_INVALID: i32 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init = cli.command {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;

    let valid = match cli.command {
        Commands::Init => true,
        Commands::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let fleet = FleetSnapshot::from_yaml(&content)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            if fleet.is_empty() {
                tracing::warn!(file = %file.display(), "Fleet file contains no entities");
            }
            let db = open_database(&config, cli.data_dir.as_deref())?;
            let summary = db.import_fleet(&fleet)?;
            println!(
                "Imported {} vehicle(s), {} driver(s), {} maintenance record(s) into {}",
                summary.vehicles,
                summary.drivers,
                summary.maintenance,
                db.path().display()
            );
            true
        }
        Commands::CheckVehicle { vehicle_id, when } => {
            let db = open_database(&config, cli.data_dir.as_deref())?;
            let rules = config.rules.clone();
            let CheckArgs { date, purpose } = when;
            let result = tokio::task::spawn_blocking(move || {
                AvailabilityChecker::new(&db, &rules).check_vehicle(&vehicle_id, date, &purpose)
            })
            .await??;
            report(&result, cli.json)?
        }
        Commands::CheckDriver { driver_id, when } => {
            let db = open_database(&config, cli.data_dir.as_deref())?;
            let rules = config.rules.clone();
            let CheckArgs { date, purpose } = when;
            let result = tokio::task::spawn_blocking(move || {
                AvailabilityChecker::new(&db, &rules).check_driver(&driver_id, date, &purpose)
            })
            .await??;
            report(&result, cli.json)?
        }
        Commands::CheckAssignment {
            vehicle_id,
            driver_id,
            when,
        } => {
            let db = open_database(&config, cli.data_dir.as_deref())?;
            let rules = config.rules.clone();
            let CheckArgs { date, purpose } = when;
            let result = tokio::task::spawn_blocking(move || {
                AvailabilityChecker::new(&db, &rules).check_assignment(
                    &vehicle_id,
                    &driver_id,
                    date,
                    &purpose,
                )
            })
            .await??;
            report(&result, cli.json)?
        }
        Commands::ValidateFuel { file } => {
            let record: Option<FuelRecord> = read_candidate(&file)?;
            let result = RecordValidator::new(&config.rules).validate_fuel(record.as_ref());
            report(&result, cli.json)?
        }
        Commands::ValidateMaintenance { file } => {
            let record: Option<MaintenanceRecord> = read_candidate(&file)?;
            let result = RecordValidator::new(&config.rules).validate_maintenance(record.as_ref());
            report(&result, cli.json)?
        }
        Commands::VehicleId { text } => {
            let valid = RecordValidator::new(&config.rules).is_valid_vehicle_identifier(Some(&text));
            if cli.json {
                println!("{}", serde_json::json!({ "identifier": text, "valid": valid }));
            } else {
                println!("{}", if valid { "valid" } else { "invalid" });
            }
            valid
        }
    };

    if !valid {
        std::process::exit(EXIT_INVALID);
    }

    Ok(())
}

fn open_database(config: &Config, data_dir: Option<&Path>) -> anyhow::Result<Database> {
    let path = config.db_path(data_dir)?;
    let db = Database::open(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    Ok(db)
}

fn read_candidate<R>(file: &Path) -> anyhow::Result<Option<R>>
where
    R: Validate + serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let record = parse_candidate(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    Ok(record)
}

fn report(result: &ValidationResult, json: bool) -> anyhow::Result<bool> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if result.is_valid() {
        println!("valid");
    } else {
        println!("invalid");
        for violation in result.violations() {
            println!("  {}", violation);
        }
    }
    Ok(result.is_valid())
}
