use super::primitives;
use crate::config::RuleConfig;
use crate::datasources::SnapshotProvider;
use crate::error::Result;
use crate::models::ValidationResult;
use chrono::NaiveDate;
use tracing::debug;

/// Point-in-time feasibility checks for vehicles and drivers.
///
/// Nothing is reserved: two callers may both see a vehicle as available for
/// the same date. Pair a passing check with an atomic claim in the store if
/// double booking matters.
pub struct AvailabilityChecker<'a, P: SnapshotProvider + ?Sized> {
    provider: &'a P,
    rules: &'a RuleConfig,
}

impl<'a, P: SnapshotProvider + ?Sized> AvailabilityChecker<'a, P> {
    pub fn new(provider: &'a P, rules: &'a RuleConfig) -> Self {
        Self { provider, rules }
    }

    /// Provider errors are returned as `Err`; every business-rule failure
    /// ends up in the returned result.
    pub fn check_vehicle(
        &self,
        vehicle_id: &str,
        date: NaiveDate,
        purpose: &str,
    ) -> Result<ValidationResult> {
        let Some(vehicle) = self.provider.vehicle(vehicle_id)? else {
            debug!(vehicle_id, %date, purpose, "Vehicle not found");
            return Ok(ValidationResult::from_violations(vec![
                primitives::vehicle_not_found(vehicle_id, purpose),
            ]));
        };

        let maintenance = self.provider.maintenance_on(vehicle_id, date)?;

        let result: ValidationResult = [
            primitives::vehicle_status(&vehicle, self.rules.block_maintenance_status),
            self.rules
                .inspection_interval_days
                .and_then(|days| primitives::inspection_current(&vehicle, date, days)),
            primitives::maintenance_conflict(
                vehicle_id,
                date,
                &maintenance,
                &self.rules.finished_markers,
            ),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!(
            vehicle_id,
            %date,
            purpose,
            violations = result.violations().len(),
            "Checked vehicle availability"
        );
        Ok(result)
    }

    pub fn check_driver(
        &self,
        driver_id: &str,
        date: NaiveDate,
        purpose: &str,
    ) -> Result<ValidationResult> {
        let Some(driver) = self.provider.driver(driver_id)? else {
            debug!(driver_id, %date, purpose, "Driver not found");
            return Ok(ValidationResult::from_violations(vec![
                primitives::driver_not_found(driver_id, purpose),
            ]));
        };

        let result: ValidationResult = [
            primitives::driver_status(&driver),
            primitives::license_current(&driver, date),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!(
            driver_id,
            %date,
            purpose,
            violations = result.violations().len(),
            "Checked driver availability"
        );
        Ok(result)
    }

    /// Vehicle and driver checks combined, vehicle violations first.
    pub fn check_assignment(
        &self,
        vehicle_id: &str,
        driver_id: &str,
        date: NaiveDate,
        purpose: &str,
    ) -> Result<ValidationResult> {
        let vehicle = self.check_vehicle(vehicle_id, date, purpose)?;
        let driver = self.check_driver(driver_id, date, purpose)?;
        Ok(vehicle.merge(driver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::InMemorySnapshots;
    use crate::db::Database;
    use crate::error::FleetCheckError;
    use crate::models::{
        Driver, DriverStatus, ErrorKind, FleetSnapshot, MaintenanceRecord, Vehicle, VehicleStatus,
    };
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fleet() -> InMemorySnapshots {
        InMemorySnapshots::new()
            .with_vehicle(Vehicle::new("BUS001", VehicleStatus::Active))
            .with_vehicle(Vehicle::new("BUS002", VehicleStatus::OutOfService))
            .with_vehicle(Vehicle::new("BUS003", VehicleStatus::Maintenance))
            .with_vehicle(Vehicle::new("BUS004", VehicleStatus::Active).without_status())
            .with_vehicle(
                Vehicle::new("BUS005", VehicleStatus::OutOfService)
                    .with_last_inspection(date(2020, 1, 1)),
            )
            .with_maintenance(
                MaintenanceRecord::new("BUS001", date(2024, 5, 10)).with_completion("Scheduled"),
            )
            .with_maintenance(
                MaintenanceRecord::new("BUS001", date(2024, 5, 12)).with_completion("Completed"),
            )
            .with_maintenance(
                MaintenanceRecord::new("BUS002", date(2024, 5, 10)).with_completion("In Progress"),
            )
            .with_driver(Driver::new("D1", DriverStatus::Active))
            .with_driver(Driver::new("D2", DriverStatus::Inactive))
            .with_driver(
                Driver::new("D3", DriverStatus::Active).with_license_expiration(date(2024, 6, 1)),
            )
            .with_driver(
                Driver::new("D4", DriverStatus::Inactive)
                    .with_license_expiration(date(2024, 1, 1)),
            )
    }

    struct FailingProvider;

    impl SnapshotProvider for FailingProvider {
        fn vehicle(&self, _id: &str) -> Result<Option<Vehicle>> {
            Err(FleetCheckError::InvalidData("store unreachable".into()))
        }

        fn driver(&self, _id: &str) -> Result<Option<Driver>> {
            Err(FleetCheckError::InvalidData("store unreachable".into()))
        }

        fn maintenance_on(
            &self,
            _vehicle_id: &str,
            _date: NaiveDate,
        ) -> Result<Vec<MaintenanceRecord>> {
            Err(FleetCheckError::InvalidData("store unreachable".into()))
        }
    }

    #[test]
    fn unknown_vehicle_yields_single_not_found() {
        let store = fleet();
        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&store, &rules);

        for id in ["NOPE", "", "bus001"] {
            let result = checker.check_vehicle(id, date(2024, 5, 10), "route 7").unwrap();
            assert!(!result.is_valid());
            assert_eq!(result.violations().len(), 1);
            assert_eq!(result.violations()[0].kind, ErrorKind::NotFound);
            assert!(result.violations()[0].message.contains("route 7"));
        }
    }

    #[test]
    fn out_of_service_vehicle_is_invalid_on_any_date() {
        let store = fleet();
        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&store, &rules);

        for day in [date(2024, 5, 11), NaiveDate::MIN, NaiveDate::MAX] {
            let result = checker.check_vehicle("BUS002", day, "trip").unwrap();
            assert!(!result.is_valid());
            assert!(result.has_kind(ErrorKind::InvalidState));
            assert!(result.error_message().contains("out of service"));
        }
    }

    #[test]
    fn scheduled_maintenance_blocks_only_that_date() {
        let store = fleet();
        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&store, &rules);

        let blocked = checker.check_vehicle("BUS001", date(2024, 5, 10), "trip").unwrap();
        assert!(!blocked.is_valid());
        assert_eq!(blocked.violations().len(), 1);
        assert_eq!(blocked.violations()[0].kind, ErrorKind::ScheduleConflict);
        assert!(blocked.error_message().contains("scheduled maintenance"));

        let free = checker.check_vehicle("BUS001", date(2024, 5, 11), "trip").unwrap();
        assert!(free.is_valid());

        let completed = checker.check_vehicle("BUS001", date(2024, 5, 12), "trip").unwrap();
        assert!(completed.is_valid());
    }

    #[test]
    fn out_of_service_and_conflict_reported_together() {
        let store = fleet();
        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&store, &rules);

        let result = checker.check_vehicle("BUS002", date(2024, 5, 10), "trip").unwrap();
        let kinds: Vec<_> = result.violations().iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::InvalidState, ErrorKind::ScheduleConflict]
        );
    }

    #[test]
    fn maintenance_status_follows_configuration() {
        let store = fleet();
        let permissive = RuleConfig::default();
        let result = AvailabilityChecker::new(&store, &permissive)
            .check_vehicle("BUS003", date(2024, 5, 10), "trip")
            .unwrap();
        assert!(result.is_valid());

        let strict = RuleConfig {
            block_maintenance_status: true,
            ..RuleConfig::default()
        };
        let result = AvailabilityChecker::new(&store, &strict)
            .check_vehicle("BUS003", date(2024, 5, 10), "trip")
            .unwrap();
        assert!(result.has_kind(ErrorKind::InvalidState));
    }

    #[test]
    fn unrecognized_vehicle_status_is_unavailable() {
        let store = fleet();
        let rules = RuleConfig::default();
        let result = AvailabilityChecker::new(&store, &rules)
            .check_vehicle("BUS004", date(2024, 5, 10), "trip")
            .unwrap();
        assert!(!result.is_valid());
        assert!(result.has_kind(ErrorKind::InvalidState));
    }

    #[test]
    fn inspection_rule_only_when_configured() {
        let store = fleet();
        let rules = RuleConfig {
            inspection_interval_days: Some(365),
            ..RuleConfig::default()
        };
        let result = AvailabilityChecker::new(&store, &rules)
            .check_vehicle("BUS005", date(2024, 5, 10), "trip")
            .unwrap();
        assert!(result.has_kind(ErrorKind::ExpiredCredential));
        assert!(result.has_kind(ErrorKind::InvalidState));

        let default_rules = RuleConfig::default();
        let result = AvailabilityChecker::new(&store, &default_rules)
            .check_vehicle("BUS005", date(2024, 5, 10), "trip")
            .unwrap();
        assert!(!result.has_kind(ErrorKind::ExpiredCredential));
    }

    #[test]
    fn unknown_driver_yields_single_not_found() {
        let store = fleet();
        let rules = RuleConfig::default();
        let result = AvailabilityChecker::new(&store, &rules)
            .check_driver("D99", date(2024, 5, 10), "night shift")
            .unwrap();
        assert_eq!(result.violations().len(), 1);
        assert_eq!(result.violations()[0].kind, ErrorKind::NotFound);
        assert!(result.error_message().contains("D99"));
    }

    #[test]
    fn inactive_driver_reported() {
        let store = fleet();
        let rules = RuleConfig::default();
        let result = AvailabilityChecker::new(&store, &rules)
            .check_driver("D2", date(2024, 5, 10), "trip")
            .unwrap();
        assert_eq!(result.violations().len(), 1);
        assert_eq!(result.violations()[0].kind, ErrorKind::InvalidState);
        assert!(result.error_message().contains("inactive"));
    }

    #[test]
    fn license_expiration_boundary() {
        let store = fleet();
        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&store, &rules);

        let on_expiry = checker.check_driver("D3", date(2024, 6, 1), "trip").unwrap();
        assert!(on_expiry.is_valid());

        let day_after = checker.check_driver("D3", date(2024, 6, 2), "trip").unwrap();
        assert!(!day_after.is_valid());
        assert_eq!(day_after.violations()[0].kind, ErrorKind::ExpiredCredential);
        assert!(day_after.error_message().contains("expired"));
    }

    #[test]
    fn inactive_and_expired_both_reported() {
        let store = fleet();
        let rules = RuleConfig::default();
        let result = AvailabilityChecker::new(&store, &rules)
            .check_driver("D4", date(2024, 5, 10), "trip")
            .unwrap();
        let kinds: Vec<_> = result.violations().iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::InvalidState, ErrorKind::ExpiredCredential]
        );
    }

    #[test]
    fn extreme_dates_return_results() {
        let store = fleet();
        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&store, &rules);

        let early = checker.check_driver("D3", NaiveDate::MIN, "trip").unwrap();
        assert!(early.is_valid());
        let late = checker.check_driver("D3", NaiveDate::MAX, "trip").unwrap();
        assert!(late.has_kind(ErrorKind::ExpiredCredential));

        assert!(checker.check_vehicle("BUS001", NaiveDate::MIN, "trip").unwrap().is_valid());
        assert!(checker.check_vehicle("BUS001", NaiveDate::MAX, "trip").unwrap().is_valid());
    }

    #[test]
    fn assignment_merges_vehicle_then_driver() {
        let store = fleet();
        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&store, &rules);

        let result = checker
            .check_assignment("BUS002", "D2", date(2024, 5, 11), "trip")
            .unwrap();
        assert_eq!(result.violations().len(), 2);
        assert!(result.violations()[0].message.starts_with("Vehicle"));
        assert!(result.violations()[1].message.starts_with("Driver"));

        let ok = checker
            .check_assignment("BUS001", "D1", date(2024, 5, 11), "trip")
            .unwrap();
        assert!(ok.is_valid());
    }

    #[test]
    fn provider_failures_propagate() {
        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&FailingProvider, &rules);

        assert!(checker.check_vehicle("BUS001", date(2024, 5, 10), "trip").is_err());
        assert!(checker.check_driver("D1", date(2024, 5, 10), "trip").is_err());
        assert!(checker
            .check_assignment("BUS001", "D1", date(2024, 5, 10), "trip")
            .is_err());
    }

    #[test]
    fn repeated_checks_are_identical() {
        let store = fleet();
        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&store, &rules);

        let first = checker.check_vehicle("BUS002", date(2024, 5, 10), "trip").unwrap();
        let second = checker.check_vehicle("BUS002", date(2024, 5, 10), "trip").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn concurrent_threads_agree() {
        let store = fleet();
        let rules = RuleConfig::default();
        let expected = AvailabilityChecker::new(&store, &rules)
            .check_vehicle("BUS002", date(2024, 5, 10), "trip")
            .unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    scope.spawn(|| {
                        AvailabilityChecker::new(&store, &rules)
                            .check_vehicle("BUS002", date(2024, 5, 10), "trip")
                            .unwrap()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[tokio::test]
    async fn concurrent_blocking_tasks_agree() {
        let store = Arc::new(fleet());
        let rules = Arc::new(RuleConfig::default());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let rules = Arc::clone(&rules);
                tokio::task::spawn_blocking(move || {
                    AvailabilityChecker::new(&store, &rules)
                        .check_driver("D4", date(2024, 5, 10), "trip")
                })
            })
            .collect();

        let mut results = Vec::new();
        for task in tasks {
            results.push(task.await.unwrap().unwrap());
        }
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(results[0].violations().len(), 2);
    }

    #[test]
    fn database_backed_checks_after_import() {
        let fleet = FleetSnapshot::from_yaml(
            r#"
vehicles:
  - id: BUS001
    status: Active
  - id: BUS009
    status: Retired
drivers:
  - id: D9
    status: Suspended
maintenance:
  - vehicle_id: BUS001
    scheduled_date: 2024-05-10
    completion: Scheduled
    cost: 250.0
  - vehicle_id: BUS001
    scheduled_date: 2024-05-12
    completion: Completed
    cost: 90.0
"#,
        )
        .unwrap();
        let db = Database::open_in_memory().unwrap();
        db.import_fleet(&fleet).unwrap();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO vehicles (id, status) VALUES ('BUS010', 'Decommissioned')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let rules = RuleConfig::default();
        let checker = AvailabilityChecker::new(&db, &rules);

        let blocked = checker.check_vehicle("BUS001", date(2024, 5, 10), "trip").unwrap();
        assert_eq!(blocked.violations().len(), 1);
        assert_eq!(blocked.violations()[0].kind, ErrorKind::ScheduleConflict);
        assert!(blocked.error_message().contains("scheduled maintenance"));
        assert!(checker
            .check_vehicle("BUS001", date(2024, 5, 11), "trip")
            .unwrap()
            .is_valid());
        assert!(checker
            .check_vehicle("BUS001", date(2024, 5, 12), "trip")
            .unwrap()
            .is_valid());

        for id in ["BUS009", "BUS010"] {
            let result = checker.check_vehicle(id, date(2024, 5, 11), "trip").unwrap();
            assert!(result.has_kind(ErrorKind::InvalidState), "{id}");
            assert!(result.error_message().contains("no recognized status"));
        }

        let driver = checker.check_driver("D9", date(2024, 5, 11), "trip").unwrap();
        assert!(driver.has_kind(ErrorKind::InvalidState));

        let missing = checker.check_vehicle("BUS404", date(2024, 5, 11), "trip").unwrap();
        assert_eq!(missing.count_of(ErrorKind::NotFound), 1);
    }
}
