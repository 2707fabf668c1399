//! Index constituents files downloaded from nseindia.com.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use screen_core::{DataError, Result, Symbol, UniverseProvider};
use tracing::info;

use crate::table::symbols_from_table;

/// Default constituents file name for the NIFTY 500 index.
pub const DEFAULT_CONSTITUENTS_FILE: &str = "nifty_500_constituents.csv";

/// A local constituents CSV.
#[derive(Clone, Debug)]
pub struct ConstituentsFile {
    path: PathBuf,
    source_name: String,
}

impl ConstituentsFile {
    /// Constituents file at `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let source_name = path.display().to_string();
        Self { path, source_name }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UniverseProvider for ConstituentsFile {
    fn source_name(&self) -> &str {
        &self.source_name
    }

    async fn universe(&self) -> Result<Vec<Symbol>> {
        let contents = tokio::fs::read(&self.path).await.map_err(|e| {
            let reason = if e.kind() == std::io::ErrorKind::NotFound {
                "file not found; download the index constituents CSV from nseindia.com \
                 (Market Data > Indices > select the index > Download (.csv)) and save it under this name"
                    .to_string()
            } else {
                e.to_string()
            };
            DataError::source_unavailable(&self.source_name, reason)
        })?;

        let symbols = symbols_from_table(contents.as_slice(), &self.source_name)?;
        info!(
            count = symbols.len(),
            file = %self.source_name,
            "Loaded constituents"
        );
        Ok(symbols)
    }
}
