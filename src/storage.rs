use crate::store::EntryStore;
use std::{env, io, path::Path, path::PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::error;

/// Fixed key the whole store is persisted under.
pub const STORAGE_KEY: &str = "diaryEntries";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to encode diary entries: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("DIARY_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data").join(format!("{STORAGE_KEY}.json"))
}

/// Reads the persisted store. A missing, unreadable or malformed blob yields an
/// empty store.
pub async fn load_entries(path: &Path) -> EntryStore {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(store) => store,
            Err(err) => {
                error!("failed to parse diary entries: {err}");
                EntryStore::default()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => EntryStore::default(),
        Err(err) => {
            error!("failed to read diary entries: {err}");
            EntryStore::default()
        }
    }
}

/// Overwrites the persisted blob with the whole store.
pub async fn persist_entries(path: &Path, store: &EntryStore) -> Result<(), StorageError> {
    let payload = serde_json::to_vec_pretty(store)?;
    fs::write(path, payload)
        .await
        .map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}
