use crate::datasources::SnapshotProvider;
use crate::db::Database;
use crate::error::{FleetCheckError, Result};
use crate::models::{
    Driver, DriverStatus, FleetSnapshot, MaintenanceRecord, Vehicle, VehicleStatus,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub vehicles: usize,
    pub drivers: usize,
    pub maintenance: usize,
}

// Vehicle Queries

impl Database {
    pub fn upsert_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
        self.with_conn(|conn| upsert_vehicle(conn, vehicle))
    }

    pub fn get_vehicle(&self, id: &str) -> Result<Option<Vehicle>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, status, last_inspection FROM vehicles WHERE id = ?1",
                [id],
                row_to_vehicle,
            )
            .optional()
            .map_err(Into::into)
        })
    }
}

fn upsert_vehicle(conn: &Connection, vehicle: &Vehicle) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO vehicles (id, status, last_inspection, updated_at)
        VALUES (?1, ?2, ?3, datetime('now'))
        ON CONFLICT(id) DO UPDATE SET
            status = excluded.status,
            last_inspection = excluded.last_inspection,
            updated_at = excluded.updated_at
        "#,
        params![
            vehicle.id,
            vehicle.status.map(|s| format!("{:?}", s)),
            vehicle.last_inspection,
        ],
    )?;
    Ok(())
}

fn row_to_vehicle(row: &Row) -> rusqlite::Result<Vehicle> {
    let id: String = row.get("id")?;
    let status_str: Option<String> = row.get("status")?;

    let status = status_str.as_ref().and_then(|s| {
        VehicleStatus::from_str(s).or_else(|| {
            warn!(vehicle_id = %id, status = %s, "Unknown vehicle status in database");
            None
        })
    });

    Ok(Vehicle {
        id,
        status,
        last_inspection: row.get("last_inspection")?,
    })
}

// Driver Queries

impl Database {
    pub fn upsert_driver(&self, driver: &Driver) -> Result<()> {
        self.with_conn(|conn| upsert_driver(conn, driver))
    }

    pub fn get_driver(&self, id: &str) -> Result<Option<Driver>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, status, license_expiration FROM drivers WHERE id = ?1",
                [id],
                row_to_driver,
            )
            .optional()
            .map_err(Into::into)
        })
    }
}

fn upsert_driver(conn: &Connection, driver: &Driver) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO drivers (id, status, license_expiration, updated_at)
        VALUES (?1, ?2, ?3, datetime('now'))
        ON CONFLICT(id) DO UPDATE SET
            status = excluded.status,
            license_expiration = excluded.license_expiration,
            updated_at = excluded.updated_at
        "#,
        params![
            driver.id,
            driver.status.map(|s| format!("{:?}", s)),
            driver.license_expiration,
        ],
    )?;
    Ok(())
}

fn row_to_driver(row: &Row) -> rusqlite::Result<Driver> {
    let id: String = row.get("id")?;
    let status_str: Option<String> = row.get("status")?;

    let status = status_str.as_ref().and_then(|s| {
        DriverStatus::from_str(s).or_else(|| {
            warn!(driver_id = %id, status = %s, "Unknown driver status in database");
            None
        })
    });

    Ok(Driver {
        id,
        status,
        license_expiration: row.get("license_expiration")?,
    })
}

// Maintenance Queries

impl Database {
    pub fn insert_maintenance(&self, record: &MaintenanceRecord) -> Result<i64> {
        self.with_conn(|conn| insert_maintenance(conn, record))
    }

    pub fn get_maintenance_on(
        &self,
        vehicle_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<MaintenanceRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, vehicle_id, scheduled_date, completion, cost, description
                FROM maintenance_records
                WHERE vehicle_id = ?1 AND scheduled_date = ?2
                ORDER BY id
                "#,
            )?;
            let records = stmt
                .query_map(params![vehicle_id, date], row_to_maintenance)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })
    }

    /// Update the completion marker once work progresses or finishes.
    pub fn set_maintenance_completion(&self, id: i64, marker: &str) -> Result<()> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE maintenance_records SET completion = ?1 WHERE id = ?2",
                params![marker, id],
            )?;
            if updated == 0 {
                return Err(FleetCheckError::InvalidData(format!(
                    "Maintenance record {} does not exist",
                    id
                )));
            }
            Ok(())
        })
    }
}

fn insert_maintenance(conn: &Connection, record: &MaintenanceRecord) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO maintenance_records
            (vehicle_id, scheduled_date, completion, cost, description)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            record.vehicle_id,
            record.scheduled_date,
            record.completion,
            record.cost,
            record.description,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_maintenance(row: &Row) -> rusqlite::Result<MaintenanceRecord> {
    Ok(MaintenanceRecord {
        id: Some(row.get("id")?),
        vehicle_id: row.get("vehicle_id")?,
        scheduled_date: row.get("scheduled_date")?,
        completion: row.get("completion")?,
        cost: row.get("cost")?,
        description: row.get("description")?,
    })
}

// Import

impl Database {
    /// Load a fleet snapshot in one transaction. Vehicles and drivers are
    /// upserted; maintenance records are appended.
    pub fn import_fleet(&self, fleet: &FleetSnapshot) -> Result<ImportSummary> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            for vehicle in &fleet.vehicles {
                upsert_vehicle(&tx, vehicle)?;
            }
            for driver in &fleet.drivers {
                upsert_driver(&tx, driver)?;
            }
            for record in &fleet.maintenance {
                insert_maintenance(&tx, record)?;
            }
            tx.commit()?;

            let summary = ImportSummary {
                vehicles: fleet.vehicles.len(),
                drivers: fleet.drivers.len(),
                maintenance: fleet.maintenance.len(),
            };
            tracing::info!(
                vehicles = summary.vehicles,
                drivers = summary.drivers,
                maintenance = summary.maintenance,
                "Imported fleet snapshot"
            );
            Ok(summary)
        })
    }
}

impl SnapshotProvider for Database {
    fn vehicle(&self, id: &str) -> Result<Option<Vehicle>> {
        self.get_vehicle(id)
    }

    fn driver(&self, id: &str) -> Result<Option<Driver>> {
        self.get_driver(id)
    }

    fn maintenance_on(&self, vehicle_id: &str, date: NaiveDate) -> Result<Vec<MaintenanceRecord>> {
        self.get_maintenance_on(vehicle_id, date)
    }
}
