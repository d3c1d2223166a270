use serde::{Deserialize, Serialize};

/// A fuel entry as submitted for validation, before it is persisted.
///
/// Vehicle reference and date stay optional strings so that incomplete
/// input can be reported field by field instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FuelRecord {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub odometer: Option<f64>,
}

impl FuelRecord {
    pub fn new(vehicle_id: &str, date: &str, amount: f64) -> Self {
        Self {
            vehicle_id: Some(vehicle_id.to_string()),
            date: Some(date.to_string()),
            amount,
            cost: 0.0,
            odometer: None,
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_odometer(mut self, odometer: f64) -> Self {
        self.odometer = Some(odometer);
        self
    }
}
