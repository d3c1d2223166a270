use super::primitives;
use crate::config::RuleConfig;
use crate::error::Result;
use crate::models::{FuelRecord, MaintenanceRecord, RuleViolation, ValidationResult};
use serde::de::DeserializeOwned;

/// Records that can list their own invariant violations.
pub trait Validate {
    /// Label used in messages, e.g. "Fuel".
    const KIND: &'static str;

    /// Every violated invariant, in evaluation order.
    fn violations(&self) -> Vec<RuleViolation>;
}

impl Validate for FuelRecord {
    const KIND: &'static str = "Fuel";

    fn violations(&self) -> Vec<RuleViolation> {
        [
            primitives::required_text(
                self.vehicle_id.as_deref(),
                "Fuel record must reference a vehicle",
            ),
            primitives::required_text(self.date.as_deref(), "Fuel record date is required"),
            primitives::calendar_date(self.date.as_deref(), "Fuel record date"),
            primitives::non_negative(self.amount, "Fuel amount"),
            self.odometer
                .and_then(|reading| primitives::non_negative(reading, "Odometer reading")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Validate for MaintenanceRecord {
    const KIND: &'static str = "Maintenance";

    fn violations(&self) -> Vec<RuleViolation> {
        primitives::non_negative(self.cost, "Maintenance cost")
            .into_iter()
            .collect()
    }
}

/// Parse a candidate record from JSON. The literal `null` yields `None`.
pub fn parse_candidate<R: Validate + DeserializeOwned>(json: &str) -> Result<Option<R>> {
    Ok(serde_json::from_str(json)?)
}

pub struct RecordValidator<'a> {
    rules: &'a RuleConfig,
}

impl<'a> RecordValidator<'a> {
    pub fn new(rules: &'a RuleConfig) -> Self {
        Self { rules }
    }

    pub fn validate_fuel(&self, record: Option<&FuelRecord>) -> ValidationResult {
        self.validate(record)
    }

    pub fn validate_maintenance(&self, record: Option<&MaintenanceRecord>) -> ValidationResult {
        self.validate(record)
    }

    /// A missing record produces one violation and nothing else.
    pub fn validate<R: Validate>(&self, record: Option<&R>) -> ValidationResult {
        let result = match record {
            None => ValidationResult::from_violations(vec![primitives::record_missing(R::KIND)]),
            Some(record) => ValidationResult::from_violations(record.violations()),
        };
        tracing::debug!(
            record_kind = R::KIND,
            violations = result.violations().len(),
            "Validated record"
        );
        result
    }

    pub fn is_valid_vehicle_identifier(&self, text: Option<&str>) -> bool {
        primitives::identifier_length(text, self.rules.min_vehicle_id_length)
    }
}
