use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::StorageError;
use crate::intake::Payload;
use crate::model::{Field, normalize_phone};

const RECEIPTS_FILE: &str = "receipts.jsonl";

/// A local record of one delivered registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub submitted_at: DateTime<Utc>,
    pub full_name: String,
    pub phone: String,
    /// Program label as transmitted.
    pub program: String,
}

impl Receipt {
    /// Extracts the receipt fields from a delivered payload.
    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            submitted_at: payload.submitted_at(),
            full_name: payload.str_value(Field::FullName).to_string(),
            phone: payload.str_value(Field::Phone).to_string(),
            program: payload.str_value(Field::Program).to_string(),
        }
    }

    /// Returns `true` if both receipts describe the same applicant.
    ///
    /// Names compare case-insensitively, phones by their digits.
    pub fn same_applicant(&self, other: &Receipt) -> bool {
        self.full_name.trim().to_lowercase() == other.full_name.trim().to_lowercase()
            && normalize_phone(&self.phone) == normalize_phone(&other.phone)
    }
}

/// Append-only JSONL journal of delivered registrations.
#[derive(Debug, Clone)]
pub struct ReceiptStore {
    path: PathBuf,
}

impl ReceiptStore {
    /// Opens the journal in `dir`, creating the directory if needed.
    pub fn new(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(RECEIPTS_FILE),
        })
    }

    /// Returns the journal file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one receipt as a JSON line.
    pub fn append(&self, receipt: &Receipt) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        serde_json::to_writer(&mut file, receipt)?;
        writeln!(file)?;
        Ok(())
    }

    /// Loads every receipt in journal order. A missing journal is empty.
    pub fn list(&self) -> Result<Vec<Receipt>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(fs::File::open(&self.path)?);
        reader
            .lines()
            .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .map(|line| {
                let line = line?;
                serde_json::from_str(&line).map_err(StorageError::Json)
            })
            .collect()
    }

    /// Returns the most recent earlier receipt for the same applicant.
    pub fn find_duplicate(&self, receipt: &Receipt) -> Result<Option<Receipt>, StorageError> {
        Ok(self
            .list()?
            .into_iter()
            .rev()
            .find(|r| r.same_applicant(receipt)))
    }
}
