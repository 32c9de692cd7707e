use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use tracing::info;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    #[error("invalid download name `{name}`")]
    InvalidName { name: String },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Destination for converted files.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Stores `bytes` under `file_name` and returns where they went.
    async fn save(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, DownloadError>;
}

/// Writes downloads into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryDownloadSink {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectoryDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target(&self, file_name: &str) -> Result<PathBuf, DownloadError> {
        let name = Path::new(file_name);
        // Only bare names; a download never escapes the directory.
        match name.file_name() {
            Some(base) if base == name.as_os_str() => Ok(self.dir.join(base)),
            _ => Err(DownloadError::InvalidName {
                name: file_name.to_string(),
            }),
        }
    }
}

#[async_trait]
impl DownloadSink for DirectoryDownloadSink {
    async fn save(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, DownloadError> {
        let path = self.target(file_name)?;

        fs::create_dir_all(&self.dir).await.map_err(|source| {
            DownloadError::Io {
                path: self.dir.clone(),
                source,
            }
        })?;

        let mut options = fs::OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&path).await.map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                DownloadError::AlreadyExists { path: path.clone() }
            } else {
                DownloadError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let io_err = |source: io::Error| DownloadError::Io {
            path: path.clone(),
            source,
        };
        file.write_all(bytes).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        info!(path = %path.display(), bytes = bytes.len(), "saved download");
        Ok(path)
    }
}
