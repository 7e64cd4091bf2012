// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::params;
use std::path::Path;
use std::sync::Mutex;

use firmwatch_core::DeviceRecord;

/// SQLite-backed device store.
///
/// The reconciliation core never touches the connection; it only consumes
/// the materialized snapshot returned by [`Database::get_all_devices`].
#[derive(Debug)]
pub struct Database {
    conn: Mutex<rusqlite::Connection>,
}

impl Database {
    pub fn open(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let conn = rusqlite::Connection::open(path)
            .with_context(|| format!("Failed to open database: {path}"))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS devices (
                serial       TEXT PRIMARY KEY,
                firmware     TEXT,
                last_check   TEXT NOT NULL,
                first_seen   TEXT NOT NULL,
                last_seen    TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS report_log (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                sent_at         TEXT NOT NULL,
                outdated_count  INTEGER NOT NULL,
                recipients      TEXT NOT NULL,
                payload         TEXT NOT NULL
            );",
        )
        .context("Failed to initialize database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts or overwrites the record for a serial. Last write wins, same
    /// as the reference table's duplicate handling.
    pub fn upsert_device(
        &self,
        serial: &str,
        firmware: Option<&str>,
        reported_at: &str,
    ) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO devices (serial, firmware, last_check, first_seen, last_seen)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(serial) DO UPDATE SET
                firmware = ?2,
                last_check = ?3,
                last_seen = ?4",
            params![serial, firmware, reported_at, now],
        )?;

        Ok(())
    }

    /// Materialized snapshot of the fleet in registration order.
    ///
    /// The ordering is part of the reconciliation contract: report rows come
    /// out in the same order devices appear here.
    pub fn get_all_devices(&self) -> Result<Vec<DeviceRecord>> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT serial, firmware, last_check FROM devices ORDER BY first_seen, serial",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(DeviceRecord {
                    serial: row.get(0)?,
                    firmware: row.get(1)?,
                    last_check: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn device_count(&self) -> Result<u64> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM devices", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn log_report(
        &self,
        outdated_count: usize,
        recipients: &[String],
        payload_json: &str,
    ) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let now = Utc::now().to_rfc3339();
        let recipients_json = serde_json::to_string(recipients)?;
        conn.execute(
            "INSERT INTO report_log (sent_at, outdated_count, recipients, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![now, outdated_count as u64, recipients_json, payload_json],
        )?;
        Ok(())
    }

    pub fn last_report_at(&self) -> Option<DateTime<Utc>> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.query_row(
            "SELECT sent_at FROM report_log ORDER BY sent_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .ok()
    }

    pub fn report_count(&self) -> Result<u64> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM report_log", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open(":memory:").unwrap();
        assert!(db.get_all_devices().unwrap().is_empty());
        assert_eq!(db.device_count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_overwrites_by_serial() {
        let db = Database::open(":memory:").unwrap();

        db.upsert_device("SN001", Some("1.0.0"), "2025-01-01").unwrap();
        db.upsert_device("SN001", Some("1.2.0"), "2025-02-01").unwrap();

        let devices = db.get_all_devices().unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].firmware.as_deref(), Some("1.2.0"));
        assert_eq!(devices[0].last_check, "2025-02-01");
    }

    #[test]
    fn test_snapshot_order_is_stable() {
        let db = Database::open(":memory:").unwrap();

        db.upsert_device("charlie", Some("1.0"), "t1").unwrap();
        db.upsert_device("alpha", Some("1.0"), "t2").unwrap();
        db.upsert_device("bravo", Some("1.0"), "t3").unwrap();
        // Re-reporting must not move a device in the snapshot
        db.upsert_device("charlie", Some("1.1"), "t4").unwrap();

        let first: Vec<String> = db
            .get_all_devices()
            .unwrap()
            .into_iter()
            .map(|d| d.serial)
            .collect();
        let second: Vec<String> = db
            .get_all_devices()
            .unwrap()
            .into_iter()
            .map(|d| d.serial)
            .collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "charlie");
    }

    #[test]
    fn test_device_without_firmware() {
        let db = Database::open(":memory:").unwrap();
        db.upsert_device("SN002", None, "2025-03-01").unwrap();

        let devices = db.get_all_devices().unwrap();
        assert!(devices[0].firmware.is_none());
    }

    #[test]
    fn test_report_logging() {
        let db = Database::open(":memory:").unwrap();
        assert!(db.last_report_at().is_none());

        db.log_report(3, &["ops@example.com".to_owned()], r#"{"count":3}"#)
            .unwrap();

        assert!(db.last_report_at().is_some());
        assert_eq!(db.report_count().unwrap(), 1);
    }
}
