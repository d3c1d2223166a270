use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fleetcheck",
    version,
    about = "Check vehicle/driver availability and validate fleet records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Load vehicles, drivers and maintenance records from a YAML file
    Import { file: PathBuf },
    /// Check whether a vehicle can be used on a date
    CheckVehicle {
        vehicle_id: String,
        #[command(flatten)]
        when: CheckArgs,
    },
    /// Check whether a driver can be used on a date
    CheckDriver {
        driver_id: String,
        #[command(flatten)]
        when: CheckArgs,
    },
    /// Check a vehicle and a driver together
    CheckAssignment {
        vehicle_id: String,
        driver_id: String,
        #[command(flatten)]
        when: CheckArgs,
    },
    /// Validate a fuel record stored as JSON (`null` is accepted)
    ValidateFuel { file: PathBuf },
    /// Validate a maintenance record stored as JSON (`null` is accepted)
    ValidateMaintenance { file: PathBuf },
    /// Check whether text is an acceptable vehicle identifier
    VehicleId { text: String },
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Date to check (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// What the resource is needed for
    #[arg(long, default_value = "trip")]
    pub purpose: String,
}
