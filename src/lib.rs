//! Availability and record validation for a vehicle fleet.
//!
//! [`logic::AvailabilityChecker`] answers whether a vehicle or driver can be
//! used on a date; [`logic::RecordValidator`] decides whether a fuel or
//! maintenance record is admissible. Both return a
//! [`models::ValidationResult`] listing every violated rule.

pub mod config;
pub mod datasources;
pub mod db;
pub mod error;
pub mod logic;
pub mod models;

pub use config::{Config, RuleConfig};
pub use datasources::{InMemorySnapshots, SnapshotProvider};
pub use error::{FleetCheckError, Result};
pub use logic::{AvailabilityChecker, RecordValidator, Validate};
pub use models::{ErrorKind, RuleViolation, ValidationResult};
