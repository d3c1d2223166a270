//! Single-invariant rule functions.
//!
//! Each function inspects one fact and returns at most one violation, so a
//! checker can evaluate a list of them and concatenate whatever comes back.

use crate::models::{
    Driver, DriverStatus, ErrorKind, MaintenanceRecord, RuleViolation, Vehicle, VehicleStatus,
};
use chrono::{Days, NaiveDate};

pub fn vehicle_not_found(vehicle_id: &str, purpose: &str) -> RuleViolation {
    RuleViolation::new(
        ErrorKind::NotFound,
        format!("Vehicle '{}' not found (requested for {})", vehicle_id, purpose),
    )
}

pub fn driver_not_found(driver_id: &str, purpose: &str) -> RuleViolation {
    RuleViolation::new(
        ErrorKind::NotFound,
        format!("Driver '{}' not found (requested for {})", driver_id, purpose),
    )
}

pub fn vehicle_status(vehicle: &Vehicle, block_maintenance: bool) -> Option<RuleViolation> {
    let message = match vehicle.status {
        Some(VehicleStatus::Active) => return None,
        Some(VehicleStatus::Maintenance) if !block_maintenance => return None,
        Some(VehicleStatus::Maintenance) => {
            format!("Vehicle '{}' is in maintenance", vehicle.id)
        }
        Some(VehicleStatus::OutOfService) => {
            format!("Vehicle '{}' is out of service", vehicle.id)
        }
        None => format!("Vehicle '{}' has no recognized status", vehicle.id),
    };
    Some(RuleViolation::new(ErrorKind::InvalidState, message))
}

/// Inspection lapses the day after `last_inspection + interval_days`.
/// Vehicles without an inspection date are not checked.
pub fn inspection_current(
    vehicle: &Vehicle,
    date: NaiveDate,
    interval_days: u32,
) -> Option<RuleViolation> {
    let last = vehicle.last_inspection?;
    let valid_until = last.checked_add_days(Days::new(u64::from(interval_days)))?;
    (date > valid_until).then(|| {
        RuleViolation::new(
            ErrorKind::ExpiredCredential,
            format!(
                "Vehicle '{}' inspection expired on {} (last inspected {})",
                vehicle.id, valid_until, last
            ),
        )
    })
}

pub fn maintenance_conflict(
    vehicle_id: &str,
    date: NaiveDate,
    records: &[MaintenanceRecord],
    finished_markers: &[String],
) -> Option<RuleViolation> {
    let open = records
        .iter()
        .filter(|m| m.scheduled_date == date && m.is_active_hold(finished_markers))
        .count();
    (open > 0).then(|| {
        RuleViolation::new(
            ErrorKind::ScheduleConflict,
            format!(
                "Vehicle '{}' has scheduled maintenance on {} ({} open record(s))",
                vehicle_id, date, open
            ),
        )
    })
}

pub fn driver_status(driver: &Driver) -> Option<RuleViolation> {
    let message = match driver.status {
        Some(DriverStatus::Active) => return None,
        Some(DriverStatus::Inactive) => format!("Driver '{}' is inactive", driver.id),
        None => format!("Driver '{}' has no recognized status", driver.id),
    };
    Some(RuleViolation::new(ErrorKind::InvalidState, message))
}

/// A license is valid through its expiration date inclusive.
pub fn license_current(driver: &Driver, date: NaiveDate) -> Option<RuleViolation> {
    let expiration = driver.license_expiration?;
    (expiration < date).then(|| {
        RuleViolation::new(
            ErrorKind::ExpiredCredential,
            format!("Driver '{}' license expired on {}", driver.id, expiration),
        )
    })
}

pub fn record_missing(record_kind: &str) -> RuleViolation {
    RuleViolation::new(
        ErrorKind::MissingField,
        format!("{} record cannot be null", record_kind),
    )
}

/// `None` or whitespace-only text counts as missing.
pub fn required_text(value: Option<&str>, message: &str) -> Option<RuleViolation> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => None,
        _ => Some(RuleViolation::new(ErrorKind::MissingField, message)),
    }
}

/// Present text must parse as a `YYYY-MM-DD` date. Missing text is left to
/// [`required_text`].
pub fn calendar_date(value: Option<&str>, field: &str) -> Option<RuleViolation> {
    let text = value.map(str::trim).filter(|t| !t.is_empty())?;
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(_) => None,
        Err(_) => Some(RuleViolation::new(
            ErrorKind::InvalidValue,
            format!("{} '{}' is not a valid YYYY-MM-DD date", field, text),
        )),
    }
}

pub fn non_negative(value: f64, field: &str) -> Option<RuleViolation> {
    if value.is_nan() || value.is_infinite() {
        return Some(RuleViolation::new(
            ErrorKind::InvalidValue,
            format!("{} must be a finite number", field),
        ));
    }
    (value < 0.0).then(|| {
        RuleViolation::new(
            ErrorKind::InvalidValue,
            format!("{} cannot be negative ({})", field, value),
        )
    })
}

pub fn identifier_length(text: Option<&str>, min_len: usize) -> bool {
    text.is_some_and(|t| !t.is_empty() && t.chars().count() >= min_len)
}
