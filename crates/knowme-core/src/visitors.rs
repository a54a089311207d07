//! Persistent visitor counter.
//!
//! A small JSON record on disk, incremented once per session id. A missing
//! or malformed record counts as "no prior data".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use knowme_types::config::VisitorConfig;
use knowme_types::error::{KnowmeError, Result};

/// One remembered session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionVisit {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// The persisted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub count: u64,
    pub sessions: Vec<SessionVisit>,
}

/// File-backed visitor counter.
#[derive(Debug, Clone)]
pub struct VisitorStore {
    path: PathBuf,
    max_sessions: usize,
}

impl VisitorStore {
    pub fn new(path: impl Into<PathBuf>, max_sessions: usize) -> Self {
        Self {
            path: path.into(),
            max_sessions,
        }
    }

    /// Store at the configured path, or in the user data directory.
    pub fn from_config(config: &VisitorConfig) -> Result<Self> {
        let path = match &config.path {
            Some(p) => p.clone(),
            None => default_path().ok_or_else(|| {
                KnowmeError::Storage("no data directory for the visitor record".to_string())
            })?,
        };
        Ok(Self::new(path, config.max_sessions))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record. Missing or malformed files yield an empty record.
    pub fn load(&self) -> VisitRecord {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return VisitRecord::default(),
            Err(e) => {
                log::warn!("cannot read {}: {e}; starting fresh", self.path.display());
                return VisitRecord::default();
            },
        };
        match serde_json::from_slice::<VisitRecord>(&bytes) {
            Ok(record) => record,
            Err(e) => {
                log::warn!(
                    "malformed visitor record {}: {e}; starting fresh",
                    self.path.display()
                );
                VisitRecord::default()
            },
        }
    }

    /// Current count without recording anything.
    pub fn count(&self) -> u64 {
        self.load().count
    }

    /// Count this session (once per id) and return the new total.
    pub fn record_visit(&self, session_id: &str) -> Result<u64> {
        let mut record = self.load();
        if record.sessions.iter().any(|s| s.id == session_id) {
            log::debug!("session {session_id} already counted");
            return Ok(record.count);
        }
        record.count += 1;
        record.sessions.push(SessionVisit {
            id: session_id.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        });
        if record.sessions.len() > self.max_sessions {
            let excess = record.sessions.len() - self.max_sessions;
            record.sessions.drain(..excess);
        }
        self.save(&record)?;
        log::info!("visit recorded, count={}", record.count);
        Ok(record.count)
    }

    /// Write via a temp file in the same directory, then rename over.
    fn save(&self, record: &VisitRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| KnowmeError::Storage(format!("{}: {e}", parent.display())))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(record)?;
        std::fs::write(&tmp, json)
            .map_err(|e| KnowmeError::Storage(format!("{}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| KnowmeError::Storage(format!("{}: {e}", self.path.display())))?;
        Ok(())
    }
}

/// `<data dir>/knowme/visitors.json`
pub fn default_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("knowme").join("visitors.json"))
}

/// A fresh session identifier.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir, max: usize) -> VisitorStore {
        VisitorStore::new(dir.path().join("nested").join("visitors.json"), max)
    }

    #[test]
    fn missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store(&dir, 5).count(), 0);
    }

    #[test]
    fn counts_once_per_session() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir, 5);
        assert_eq!(s.record_visit("a").unwrap(), 1);
        assert_eq!(s.record_visit("a").unwrap(), 1);
        assert_eq!(s.record_visit("b").unwrap(), 2);
        assert_eq!(s.count(), 2);
    }

    #[test]
    fn sessions_are_capped() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir, 3);
        for i in 0..5 {
            s.record_visit(&format!("s{i}")).unwrap();
        }
        let rec = s.load();
        assert_eq!(rec.count, 5);
        let ids: Vec<&str> = rec.sessions.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s3", "s4"]);
    }

    #[test]
    fn corrupt_record_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir, 5);
        std::fs::create_dir_all(s.path().parent().unwrap()).unwrap();
        std::fs::write(s.path(), br#"{"count": "many"}"#).unwrap();
        assert_eq!(s.count(), 0);
        assert_eq!(s.record_visit("x").unwrap(), 1);
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir, 5);
        s.record_visit("a").unwrap();
        let names: Vec<_> = std::fs::read_dir(s.path().parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("visitors.json")]);
    }

    #[test]
    fn record_round_trips_shape() {
        let json = r#"{"count": 7, "sessions": [{"id": "a", "timestamp": 1700000000000}]}"#;
        let rec: VisitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.count, 7);
        assert_eq!(rec.sessions[0].timestamp, 1_700_000_000_000);
    }

    #[test]
    fn from_config_prefers_explicit_path() {
        let cfg = VisitorConfig {
            path: Some(PathBuf::from("/tmp/knowme-test/v.json")),
            max_sessions: 9,
        };
        let s = VisitorStore::from_config(&cfg).unwrap();
        assert_eq!(s.path(), Path::new("/tmp/knowme-test/v.json"));
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }
}
