//! Swap ledger persistence.
//!
//! The ledger owns the authoritative in-memory list of swap requests and
//! hands the full list to a [`SwapStore`] after every change. The store only
//! has to persist and return records in the [`SwapRequest`] schema.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::SwapRequest;

/// Persistence boundary for swap requests.
pub trait SwapStore: Send + Sync {
    /// Returns every persisted swap request in creation order.
    fn load(&self) -> EngineResult<Vec<SwapRequest>>;

    /// Replaces the persisted swap requests.
    fn save(&self, swaps: &[SwapRequest]) -> EngineResult<()>;
}

/// Keeps swap requests in memory only.
#[derive(Debug, Default)]
pub struct MemorySwapStore {
    swaps: RwLock<Vec<SwapRequest>>,
}

impl MemorySwapStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with records.
    pub fn with_swaps(swaps: Vec<SwapRequest>) -> Self {
        Self {
            swaps: RwLock::new(swaps),
        }
    }

    /// Returns a copy of the last saved records.
    pub fn snapshot(&self) -> Vec<SwapRequest> {
        self.swaps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SwapStore for MemorySwapStore {
    fn load(&self) -> EngineResult<Vec<SwapRequest>> {
        Ok(self.snapshot())
    }

    fn save(&self, swaps: &[SwapRequest]) -> EngineResult<()> {
        *self.swaps.write().unwrap_or_else(PoisonError::into_inner) = swaps.to_vec();
        Ok(())
    }
}

/// Persists swap requests as a JSON array in a single file.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so readers never observe a partially written ledger.
///
/// # Example
///
/// ```no_run
/// use rotation_engine::ledger::{JsonFileSwapStore, SwapStore};
///
/// let store = JsonFileSwapStore::new("./data/swaps.json");
/// let swaps = store.load().unwrap();
/// println!("{} swap requests", swaps.len());
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileSwapStore {
    path: PathBuf,
}

impl JsonFileSwapStore {
    /// Creates a store backed by `path`. The file is created on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> EngineError {
        EngineError::Storage {
            message: format!("failed to {} '{}': {}", action, self.path.display(), err),
        }
    }
}

impl SwapStore for JsonFileSwapStore {
    fn load(&self) -> EngineResult<Vec<SwapRequest>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Swap ledger file absent, starting empty");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error("read", e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| self.storage_error("parse", e))
    }

    fn save(&self, swaps: &[SwapRequest]) -> EngineResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error("create directory for", e))?;
        }
        let json =
            serde_json::to_string_pretty(swaps).map_err(|e| self.storage_error("serialize", e))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.storage_error("write", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.storage_error("replace", e))?;

        debug!(path = %self.path.display(), swaps = swaps.len(), "Saved swap ledger");
        Ok(())
    }
}
