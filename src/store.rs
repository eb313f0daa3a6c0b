use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::claim::ClaimTable;
use crate::error::ClaimsError;
use crate::loader::load_claims;

/// In-memory claims table, loaded once and replaced on explicit refresh.
///
/// Requests take a snapshot and never observe a half-loaded table: a reload
/// is built off to the side and swapped in only once it succeeds.
pub struct ClaimStore {
    source: PathBuf,
    table: RwLock<Arc<ClaimTable>>,
}

impl ClaimStore {
    /// Load the table from `source`. Failure here is fatal to startup.
    pub fn open(source: impl Into<PathBuf>) -> Result<Self, ClaimsError> {
        let source = source.into();
        let table = load_claims(&source)?;
        Ok(Self::with_table(source, table))
    }

    /// Wrap an already loaded table; `refresh` still reads from `source`.
    pub fn with_table(source: impl Into<PathBuf>, table: ClaimTable) -> Self {
        ClaimStore {
            source: source.into(),
            table: RwLock::new(Arc::new(table)),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn snapshot(&self) -> Arc<ClaimTable> {
        let guard = self.table.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Reload from the source file, returning the new row count.
    ///
    /// On failure the previous table stays in service.
    pub fn refresh(&self) -> Result<usize, ClaimsError> {
        match load_claims(&self.source) {
            Ok(table) => {
                let rows = table.len();
                let mut guard = self.table.write().unwrap_or_else(PoisonError::into_inner);
                *guard = Arc::new(table);
                info!("refreshed claims from {}: {} rows", self.source.display(), rows);
                Ok(rows)
            }
            Err(e) => {
                error!("refresh from {} failed, keeping previous data: {}", self.source.display(), e);
                Err(e)
            }
        }
    }
}
