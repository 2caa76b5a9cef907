//! Known bonding curves.
//!
//! A local cache of curves the user has created or looked at, so they can be
//! picked again without pasting IDs. The chain stays the source of truth.
//!
//! ## Storage Structure
//!
//! ```text
//! <home>/
//! └── curves.jsonl    # Append-only, one CurveRecord per line
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pump_steamm_types::encoding::normalize_address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::interpret::DomainFacts;

pub const CURVE_LOG_FILE: &str = "curves.jsonl";

/// One line of the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveRecord {
    pub curve_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_type: Option<String>,
    /// Digest of the transaction the curve was seen in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub source: RecordSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Found in a NewBondingCurveResult event.
    Interpreted,
    /// Added by hand.
    Manual,
}

impl CurveRecord {
    pub fn new(curve_id: &str, coin_type: Option<String>, source: RecordSource) -> Self {
        Self {
            curve_id: curve_id.trim().to_string(),
            coin_type,
            digest: None,
            recorded_at: Utc::now(),
            source,
        }
    }

    /// Curve IDs are compared in normalized form when they are addresses.
    fn key(&self) -> String {
        curve_key(&self.curve_id)
    }
}

fn curve_key(curve_id: &str) -> String {
    normalize_address(curve_id).unwrap_or_else(|_| curve_id.trim().to_string())
}

/// Append-only JSONL log of known curves.
#[derive(Debug, Clone)]
pub struct CurveLog {
    path: PathBuf,
}

impl CurveLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log inside a pump-steamm home directory.
    pub fn in_dir(home: &Path) -> Self {
        Self::new(home.join(CURVE_LOG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &CurveRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open curve log {}", self.path.display()))?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        tracing::debug!(curve = %record.curve_id, path = %self.path.display(), "recorded curve");
        Ok(())
    }

    /// Record the curve announced in `facts`, if there is one.
    pub fn record_facts(
        &self,
        facts: &DomainFacts,
        digest: Option<&str>,
    ) -> Result<Option<CurveRecord>> {
        let Some(curve_id) = facts.curve_id.as_deref() else {
            return Ok(None);
        };
        let mut record = CurveRecord::new(
            curve_id,
            facts.coin_type.as_ref().map(|c| c.to_string()),
            RecordSource::Interpreted,
        );
        record.digest = digest.map(str::to_string);
        self.append(&record)?;
        Ok(Some(record))
    }

    /// Every readable record in file order. A missing log is empty.
    pub fn entries(&self) -> Result<Vec<CurveRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open curve log {}", self.path.display()))?;

        let mut records = Vec::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CurveRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    line = line_no + 1,
                    error = %e,
                    "skipping malformed curve log line"
                ),
            }
        }
        Ok(records)
    }

    /// One record per curve, in the order curves were first seen.
    ///
    /// The newest record wins; a coin type learned earlier is kept when the
    /// newest record lacks one.
    pub fn list(&self) -> Result<Vec<CurveRecord>> {
        let mut order: Vec<String> = Vec::new();
        let mut latest: HashMap<String, CurveRecord> = HashMap::new();

        for record in self.entries()? {
            let key = record.key();
            match latest.get_mut(&key) {
                Some(existing) => {
                    let coin_type = record.coin_type.clone().or(existing.coin_type.take());
                    *existing = CurveRecord {
                        coin_type,
                        ..record
                    };
                }
                None => {
                    order.push(key.clone());
                    latest.insert(key, record);
                }
            }
        }

        Ok(order
            .into_iter()
            .filter_map(|key| latest.remove(&key))
            .collect())
    }

    pub fn get(&self, curve_id: &str) -> Result<Option<CurveRecord>> {
        let key = curve_key(curve_id);
        Ok(self.list()?.into_iter().find(|r| r.key() == key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pump_steamm_types::CoinType;
    use tempfile::TempDir;

    #[test]
    fn test_missing_log_is_empty() {
        let temp = TempDir::new().unwrap();
        let log = CurveLog::in_dir(temp.path());
        assert!(log.list().unwrap().is_empty());
        assert!(log.get("0xc0").unwrap().is_none());
    }

    #[test]
    fn test_append_and_list_dedupes_by_curve() {
        let temp = TempDir::new().unwrap();
        let log = CurveLog::in_dir(&temp.path().join("nested"));

        log.append(&CurveRecord::new(
            "0xc0",
            Some("0x1::a::A".into()),
            RecordSource::Manual,
        ))
        .unwrap();
        log.append(&CurveRecord::new("0xd0", None, RecordSource::Manual)).unwrap();
        log.append(&CurveRecord::new("0x00c0", None, RecordSource::Interpreted)).unwrap();

        let curves = log.list().unwrap();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].curve_id, "0x00c0");
        assert_eq!(curves[0].source, RecordSource::Interpreted);
        assert_eq!(curves[0].coin_type.as_deref(), Some("0x1::a::A"));
        assert_eq!(curves[1].curve_id, "0xd0");
        assert_eq!(log.entries().unwrap().len(), 3);
    }

    #[test]
    fn test_record_facts() {
        let temp = TempDir::new().unwrap();
        let log = CurveLog::in_dir(temp.path());

        assert!(log
            .record_facts(&DomainFacts::default(), Some("D0"))
            .unwrap()
            .is_none());

        let facts = DomainFacts {
            curve_id: Some("0xc0".into()),
            coin_type: CoinType::parse("0xabc::tok::TOK"),
            ..Default::default()
        };
        let record = log.record_facts(&facts, Some("D1")).unwrap().unwrap();
        assert_eq!(record.digest.as_deref(), Some("D1"));

        let found = log.get("0x0c0").unwrap().unwrap();
        assert_eq!(found.coin_type.as_deref(), Some("0xabc::tok::TOK"));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let temp = TempDir::new().unwrap();
        let log = CurveLog::in_dir(temp.path());
        log.append(&CurveRecord::new("0xc0", None, RecordSource::Manual)).unwrap();
        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(file, "{{not a record").unwrap();
        writeln!(file).unwrap();

        assert_eq!(log.list().unwrap().len(), 1);
    }
}
