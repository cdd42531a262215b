//! Local persistence: the receipt journal of delivered registrations.
//!
//! Receipts live in a single `receipts.jsonl` file, one JSON object per line,
//! so recording a delivery is a single-line append.

mod error;
mod receipts;

use std::path::PathBuf;

pub use error::StorageError;
pub use receipts::{Receipt, ReceiptStore};

/// Returns the application data directory (`~/.local/share/santri` on Linux).
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    Ok(base.join("santri"))
}
