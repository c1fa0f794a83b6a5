//! Local JSON snapshots of the last successful responses.
//!
//! Snapshots are only ever read back as a fallback when the server cannot be
//! reached; they are never sent anywhere.

use rozgar_core::api::{StateSummaryResponse, TopDistrict};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Client-side errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{resource} unavailable: {message}")]
    Unavailable { resource: String, message: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Name of a persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotKey {
    Districts,
    District(String),
    Historical(String),
    StateBundle,
}

impl SnapshotKey {
    /// Storage name without extension.
    pub fn name(&self) -> String {
        match self {
            Self::Districts => "districts".to_string(),
            Self::District(code) => format!("district_{code}"),
            Self::Historical(code) => format!("historical_{code}"),
            Self::StateBundle => "state_bundle".to_string(),
        }
    }

    fn file_name(&self) -> String {
        // District codes come from the server; keep them out of path syntax.
        let name: String = self
            .name()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        format!("{name}.json")
    }
}

/// State summary and ranking saved together with the time they were fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBundle {
    pub state_summary: StateSummaryResponse,
    #[serde(default)]
    pub top_districts: Vec<TopDistrict>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Directory of JSON snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &SnapshotKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Read a snapshot. A missing file is `Ok(None)`.
    pub async fn load<T: DeserializeOwned>(&self, key: &SnapshotKey) -> ClientResult<Option<T>> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ClientError::Io { path, source }),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| ClientError::Corrupt { path, source })
    }

    /// Replace a snapshot via a temporary file and rename.
    pub async fn save<T: Serialize>(&self, key: &SnapshotKey, value: &T) -> ClientResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ClientError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(key);
        let bytes = serde_json::to_vec(value).map_err(|source| ClientError::Corrupt {
            path: path.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| ClientError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| ClientError::Io { path, source })
    }
}
