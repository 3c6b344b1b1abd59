//! SQLite adapter: Implementation of [`Monitor`].
//!
//! Provides local persistence for prediction events so model behavior can be
//! reviewed after the fact.
//!
//! # Mutex Behavior
//!
//! The database connection is protected by `Mutex`. A poisoned mutex (from a
//! panic in another thread) will cause a panic; fail-fast is intentional for
//! data integrity.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::domain::{PatientRecord, RiskLevel};
use crate::ports::{Monitor, PredictionEvent};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// SQLite prediction-event log.
pub struct SqliteMonitor {
    conn: Mutex<Connection>,
}

impl SqliteMonitor {
    /// Open (or create) the monitoring database at the given path.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let monitor = Self {
            conn: Mutex::new(conn),
        };
        monitor.init_schema()?;
        Ok(monitor)
    }

    /// Create an in-memory monitoring database (for testing).
    ///
    /// # Errors
    /// Returns error if the database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let monitor = Self {
            conn: Mutex::new(conn),
        };
        monitor.init_schema()?;
        Ok(monitor)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS prediction_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                payload TEXT NOT NULL,
                prediction TEXT NOT NULL,
                probabilities TEXT NOT NULL,
                model_version TEXT NOT NULL,
                latency_ms INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_prediction_logs_created
                ON prediction_logs(created_at DESC);
            ",
        )?;

        Ok(())
    }

    fn row_to_event(
        payload: &str,
        prediction: &str,
        probabilities: &str,
        model_version: String,
        latency_ms: i64,
        created_at: &str,
    ) -> Result<PredictionEvent, StorageError> {
        let patient: PatientRecord = serde_json::from_str(payload)
            .map_err(|e| StorageError::Serialization(format!("bad payload column: {e}")))?;
        let probabilities: BTreeMap<String, f64> = serde_json::from_str(probabilities)
            .map_err(|e| StorageError::Serialization(format!("bad probabilities column: {e}")))?;
        let prediction = RiskLevel::from_label(prediction).ok_or_else(|| {
            StorageError::Serialization(format!("bad prediction label {prediction:?}"))
        })?;
        let created_at = chrono::DateTime::parse_from_rfc3339(created_at)
            .map_err(|e| StorageError::Serialization(format!("bad created_at column: {e}")))?
            .with_timezone(&chrono::Utc);

        Ok(PredictionEvent {
            patient,
            prediction,
            probabilities,
            model_version,
            latency_ms: latency_ms.max(0) as u64,
            created_at,
        })
    }
}

impl Monitor for SqliteMonitor {
    type Error = StorageError;

    fn log_prediction(&self, event: &PredictionEvent) -> Result<(), Self::Error> {
        let payload = serde_json::to_string(&event.patient)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let probabilities = serde_json::to_string(&event.probabilities)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let conn = self.conn.lock().expect("Lock failed");
        conn.execute(
            r"
            INSERT INTO prediction_logs (
                payload, prediction, probabilities,
                model_version, latency_ms, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                payload,
                event.prediction.as_str(),
                probabilities,
                event.model_version,
                event.latency_ms as i64,
                event.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!(prediction = %event.prediction, "logged prediction event");
        Ok(())
    }

    fn recent_events(&self, limit: usize) -> Result<Vec<PredictionEvent>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let mut stmt = conn.prepare(
            r"
            SELECT payload, prediction, probabilities, model_version, latency_ms, created_at
            FROM prediction_logs
            ORDER BY id DESC
            LIMIT ?1
            ",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (payload, prediction, probabilities, model_version, latency_ms, created_at) = row?;
            events.push(Self::row_to_event(
                &payload,
                &prediction,
                &probabilities,
                model_version,
                latency_ms,
                &created_at,
            )?);
        }
        Ok(events)
    }

    fn count_events(&self) -> Result<usize, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM prediction_logs", [], |row| {
            row.get(0)
        })?;
        Ok(count.max(0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testutil::sample_record;

    fn sample_event(prediction: RiskLevel) -> PredictionEvent {
        let mut probabilities = BTreeMap::new();
        probabilities.insert("Low".to_string(), 0.1);
        probabilities.insert("Medium".to_string(), 0.2);
        probabilities.insert("High".to_string(), 0.7);

        PredictionEvent {
            patient: sample_record(),
            prediction,
            probabilities,
            model_version: "v1".to_string(),
            latency_ms: 4,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_log_and_count() {
        let monitor = SqliteMonitor::in_memory().expect("Should create db");
        assert_eq!(monitor.count_events().expect("count"), 0);

        monitor
            .log_prediction(&sample_event(RiskLevel::High))
            .expect("log");
        assert_eq!(monitor.count_events().expect("count"), 1);
    }

    #[test]
    fn test_recent_events_roundtrip_newest_first() {
        let monitor = SqliteMonitor::in_memory().expect("Should create db");
        monitor
            .log_prediction(&sample_event(RiskLevel::Low))
            .expect("log");
        monitor
            .log_prediction(&sample_event(RiskLevel::High))
            .expect("log");

        let events = monitor.recent_events(10).expect("recent");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].prediction, RiskLevel::High);
        assert_eq!(events[1].prediction, RiskLevel::Low);
        assert_eq!(events[0].patient, sample_record());
        assert_eq!(events[0].probabilities["High"], 0.7);
    }

    #[test]
    fn test_recent_respects_limit() {
        let monitor = SqliteMonitor::in_memory().expect("Should create db");
        for _ in 0..5 {
            monitor
                .log_prediction(&sample_event(RiskLevel::Medium))
                .expect("log");
        }
        assert_eq!(monitor.recent_events(3).expect("recent").len(), 3);
    }
}
