//! List sharing: hand a JSON snapshot of the items to an export sink.
//!
//! Export is the only suspending operation. It can be cancelled through a
//! [`CancelSignal`]; list mutations cannot.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export cancelled")]
    Cancelled,

    #[error("failed to serialize grocery list: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export sink rejected file: {0}")]
    Sink(String),
}

/// Owner side of a cancellation signal.
#[derive(Debug)]
pub struct CancellationSource {
    tx: watch::Sender<bool>,
}

impl CancellationSource {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is requested; pends forever otherwise.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Source dropped without cancelling.
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Destination for a shared grocery list.
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn save_file(
        &self,
        file_name: &str,
        contents: &str,
        cancel: &CancelSignal,
    ) -> Result<(), ExportError>;
}

/// Writes exports into a directory.
#[derive(Debug, Clone)]
pub struct FileExportSink {
    dir: PathBuf,
}

impl FileExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ExportSink for FileExportSink {
    async fn save_file(
        &self,
        file_name: &str,
        contents: &str,
        cancel: &CancelSignal,
    ) -> Result<(), ExportError> {
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }

        let path = self.dir.join(file_name);
        debug!(path = %path.display(), bytes = contents.len(), "writing grocery list export");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ExportError::Cancelled),
            res = tokio::fs::write(&path, contents) => {
                res.map_err(|source| ExportError::Io { path: path.clone(), source })
            }
        }
    }
}

/// Keeps exports in memory. Can be told to reject the next writes.
#[derive(Debug, Default)]
pub struct MemoryExportSink {
    files: Mutex<Vec<(String, String)>>,
    reject_with: Mutex<Option<String>>,
}

impl MemoryExportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every write with `reason` until cleared with `None`.
    pub fn reject_with(&self, reason: Option<String>) {
        if let Ok(mut slot) = self.reject_with.lock() {
            *slot = reason;
        }
    }

    /// Saved `(file_name, contents)` pairs, oldest first.
    pub fn files(&self) -> Vec<(String, String)> {
        self.files.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ExportSink for MemoryExportSink {
    async fn save_file(
        &self,
        file_name: &str,
        contents: &str,
        cancel: &CancelSignal,
    ) -> Result<(), ExportError> {
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        let rejection = self
            .reject_with
            .lock()
            .map_err(|_| ExportError::Sink("sink lock poisoned".to_string()))?
            .clone();
        if let Some(reason) = rejection {
            return Err(ExportError::Sink(reason));
        }
        let mut files = self
            .files
            .lock()
            .map_err(|_| ExportError::Sink("sink lock poisoned".to_string()))?;
        files.push((file_name.to_string(), contents.to_string()));
        Ok(())
    }
}
