//! JSON file backed submission store
//!
//! The file holds a JSON array of submission objects. Updates merge the
//! patch into the stored object, so fields this tool does not know about
//! survive a round trip.

use super::service::SubmissionService;
use crate::error::ServiceError;
use crate::model::SubmissionPatch;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Submission store persisted to a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
    /// Artificial delay applied to every call
    latency: Duration,
    /// Serializes read-modify-write cycles from concurrent workers
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            latency: Duration::ZERO,
            lock: Mutex::new(()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, ServiceError> {
        self.lock
            .lock()
            .map_err(|_| ServiceError::Unavailable("store lock poisoned".to_string()))
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }

    /// Read the raw payload; a missing file is an empty collection
    fn read_value(&self) -> Result<Value, ServiceError> {
        if !self.path.exists() {
            return Ok(Value::Array(Vec::new()));
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn read_records(&self) -> Result<Vec<Value>, ServiceError> {
        match self.read_value()? {
            Value::Array(records) => Ok(records),
            _ => Err(ServiceError::Malformed(format!(
                "{} does not contain a JSON array",
                self.path.display()
            ))),
        }
    }

    /// Write through a sibling temp file so readers never see a partial file
    fn write_records(&self, records: Vec<Value>) -> Result<(), ServiceError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let contents = serde_json::to_string_pretty(&Value::Array(records))?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Whether the stored record carries `id`; numeric ids match their decimal text
fn has_id(record: &Value, id: &str) -> bool {
    match record.get("id") {
        Some(Value::String(stored)) => stored == id,
        Some(Value::Number(stored)) => stored.to_string() == id,
        _ => false,
    }
}

impl SubmissionService for JsonFileStore {
    fn fetch(&self) -> Result<Value, ServiceError> {
        self.simulate_latency();
        let _guard = self.guard()?;
        self.read_value()
    }

    fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.simulate_latency();
        let _guard = self.guard()?;

        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|record| !has_id(record, id));
        if records.len() == before {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        self.write_records(records)?;
        debug!(id, path = %self.path.display(), "submission removed from store");
        Ok(())
    }

    fn update(&self, id: &str, patch: &SubmissionPatch) -> Result<(), ServiceError> {
        self.simulate_latency();
        let _guard = self.guard()?;

        let mut records = self.read_records()?;
        let record = records
            .iter_mut()
            .find(|record| has_id(record, id))
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        let Value::Object(fields) = record else {
            return Err(ServiceError::Malformed(format!("record '{}' is not an object", id)));
        };
        let changes: Map<String, Value> = match serde_json::to_value(patch)? {
            Value::Object(changes) => changes,
            _ => Map::new(),
        };
        for (key, value) in changes {
            fields.insert(key, value);
        }

        self.write_records(records)?;
        debug!(id, path = %self.path.display(), "submission updated in store");
        Ok(())
    }
}
