//! Persistence for result documents - save/load JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{CropscopeError, Result};

use super::CombinedResult;

impl CombinedResult {
    /// Save the result document to a JSON file.
    ///
    /// The file handle is scoped and explicitly flushed, so a failed write
    /// surfaces as an error instead of a truncated document.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn example(result: &cropscope::CombinedResult) -> cropscope::Result<()> {
    /// result.save("corrected_cropland_area_estimates.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| CropscopeError::Persistence {
                    path: path.to_path_buf(),
                    message: format!("failed to create directory '{}': {}", parent.display(), e),
                })?;
            }
        }

        let file = File::create(path).map_err(|e| CropscopeError::Persistence {
            path: path.to_path_buf(),
            message: format!("failed to create file: {}", e),
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| {
            CropscopeError::Persistence {
                path: path.to_path_buf(),
                message: format!("failed to serialize result: {}", e),
            }
        })?;
        writer.flush().map_err(|e| CropscopeError::Persistence {
            path: path.to_path_buf(),
            message: format!("failed to flush result: {}", e),
        })?;

        Ok(())
    }

    /// Load a previously saved result document.
    ///
    /// The loaded document is structurally validated (footprint branches,
    /// uniform year keys); a malformed document fails with the offending key
    /// path rather than loading partially.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cropscope::CombinedResult;
    ///
    /// let result = CombinedResult::load("corrected_cropland_area_estimates.json").unwrap();
    /// println!("Computed at: {}", result.computed_at);
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| CropscopeError::Persistence {
            path: path.to_path_buf(),
            message: format!("failed to open file: {}", e),
        })?;

        let reader = BufReader::new(file);
        let result: CombinedResult =
            serde_json::from_reader(reader).map_err(|e| CropscopeError::Malformed {
                key_path: path.display().to_string(),
                message: e.to_string(),
            })?;

        result.validate()?;
        Ok(result)
    }
}
