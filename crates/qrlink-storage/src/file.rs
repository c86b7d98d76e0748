use async_trait::async_trait;
use qrlink_core::store::{LinkStore, Result};
use qrlink_core::{LinkTable, StorageError};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Link table persisted as one pretty-printed JSON document.
///
/// Saves go through a sibling temporary file that is fsynced and then renamed
/// over the data file, so a concurrent or later `load` sees either the old or
/// the new document. A missing file reads as an empty table; a file that
/// exists but cannot be parsed is reported as [`StorageError::InvalidData`]
/// and is never overwritten by the failed operation.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    temp_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "links.json".to_string());
        let temp_path = path.with_file_name(format!(".{file_name}.tmp"));
        Self { path, temp_path }
    }

    /// Returns the path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_atomically(&self, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&self.temp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(err) = fs::rename(&self.temp_path, &self.path).await {
            if let Err(cleanup) = fs::remove_file(&self.temp_path).await {
                warn!(path = %self.temp_path.display(), error = %cleanup, "failed to remove temporary file");
            }
            return Err(err);
        }
        Ok(())
    }
}

fn map_io_error(path: &Path, err: io::Error) -> StorageError {
    let message = format!("{}: {err}", path.display());
    match err.kind() {
        io::ErrorKind::InvalidData => StorageError::InvalidData(message),
        _ => StorageError::Unavailable(message),
    }
}

#[async_trait]
impl LinkStore for JsonFileStore {
    async fn load(&self) -> Result<LinkTable> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "data file not found, starting with an empty table");
                return Ok(LinkTable::new());
            }
            Err(err) => return Err(map_io_error(&self.path, err)),
        };

        if contents.trim().is_empty() {
            return Ok(LinkTable::new());
        }

        let table: LinkTable = serde_json::from_str(&contents).map_err(|e| {
            StorageError::InvalidData(format!("{}: {e}", self.path.display()))
        })?;
        table.validate()?;

        debug!(path = %self.path.display(), records = table.len(), "loaded link table");
        Ok(table)
    }

    async fn save(&self, table: &LinkTable) -> Result<()> {
        let json = serde_json::to_string_pretty(table)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.write_atomically(json.as_bytes())
            .await
            .map_err(|e| map_io_error(&self.path, e))?;

        debug!(path = %self.path.display(), records = table.len(), "saved link table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_sits_next_to_the_data_file() {
        let store = JsonFileStore::new("/var/lib/qrlink/qr_codes.json");
        assert_eq!(
            store.temp_path,
            PathBuf::from("/var/lib/qrlink/.qr_codes.json.tmp")
        );

        let store = JsonFileStore::new("qr_codes.json");
        assert_eq!(store.temp_path, PathBuf::from(".qr_codes.json.tmp"));
    }
}
