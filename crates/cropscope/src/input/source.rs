//! Provenance metadata for input files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{CropscopeError, Result};

/// Provenance record for one input file, carried into the result document so
/// an estimate can be traced back to the exact tables that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputProvenance {
    /// Path the file was loaded from.
    pub path: String,
    /// Content hash, `sha256:<hex>`.
    pub sha256: String,
    /// Number of data rows parsed.
    pub rows: usize,
}

impl InputProvenance {
    pub(crate) fn new(path: &Path, sha256: String, rows: usize) -> Self {
        Self {
            path: path.display().to_string(),
            sha256,
            rows,
        }
    }
}

/// Read a file fully into memory and hash its contents.
///
/// Returns the raw bytes and the `sha256:<hex>` digest. Loaders parse from
/// the returned buffer so the hash always matches what was parsed.
pub(crate) fn read_with_provenance(path: &Path) -> Result<(Vec<u8>, String)> {
    let mut file = File::open(path).map_err(|e| CropscopeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut contents = Vec::new();
    file.read_to_end(&mut contents).map_err(|e| CropscopeError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    let hash = format!("sha256:{:x}", hasher.finalize());

    Ok((contents, hash))
}
