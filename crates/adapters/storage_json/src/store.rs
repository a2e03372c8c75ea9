use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use vcontrol_app::ports::CatalogueStore;
use vcontrol_domain::catalogue::Catalogue;
use vcontrol_domain::error::VControlError;

use crate::error::StorageError;

/// Schema version written to and accepted from disk.
pub const STORAGE_VERSION: u32 = 1;
/// Identifier stored alongside the data.
pub const STORAGE_KEY: &str = "vcontrol.catalogue";

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    key: &'a str,
    data: &'a Catalogue,
}

#[derive(Deserialize)]
struct Document {
    version: u32,
    #[serde(default)]
    key: Option<String>,
    data: serde_json::Value,
}

/// [`CatalogueStore`] backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonCatalogueStore {
    path: PathBuf,
}

impl JsonCatalogueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read(&self) -> Result<Catalogue, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no catalogue on disk yet");
                return Ok(Catalogue::new());
            }
            Err(err) => return Err(StorageError::io(&self.path, err)),
        };

        let document: Document = serde_json::from_slice(&bytes)?;
        if document.version != STORAGE_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: document.version,
                expected: STORAGE_VERSION,
            });
        }
        if let Some(key) = document.key.as_deref()
            && key != STORAGE_KEY
        {
            tracing::warn!(key, expected = STORAGE_KEY, "unexpected catalogue key");
        }

        let catalogue: Catalogue = serde_json::from_value(document.data)?;
        tracing::debug!(path = %self.path.display(), known = catalogue.len(), "catalogue read");
        Ok(catalogue)
    }

    async fn write(&self, catalogue: &Catalogue) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(&DocumentRef {
            version: STORAGE_VERSION,
            key: STORAGE_KEY,
            data: catalogue,
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::io(parent, err))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes)
            .await
            .map_err(|err| StorageError::io(&temp, err))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|err| StorageError::io(&self.path, err))?;

        tracing::debug!(path = %self.path.display(), known = catalogue.len(), "catalogue written");
        Ok(())
    }
}

impl CatalogueStore for JsonCatalogueStore {
    async fn load(&self) -> Result<Catalogue, VControlError> {
        Ok(self.read().await?)
    }

    async fn save(&self, catalogue: &Catalogue) -> Result<(), VControlError> {
        Ok(self.write(catalogue).await?)
    }
}
