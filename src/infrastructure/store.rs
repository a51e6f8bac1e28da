//! JSON file document store
//!
//! One file per document: `<data_dir>/<name>.json`, holding the forest in
//! its wire format (array of `{id, symbol, text, children, isExpanded}`).

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, JsonResultExt};
use crate::domain::{Forest, Node};
use crate::infrastructure::traits::{DocumentStore, FileSystem};

const EXTENSION: &str = "json";

/// Reject names that would escape the data directory or hide the file.
pub fn validate_document_name(name: &str) -> ApplicationResult<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@'));
    if valid {
        Ok(())
    } else {
        Err(ApplicationError::InvalidDocument {
            name: name.to_string(),
            message: "names may only contain letters, digits, '_', '-', '.', '@' and must not start with '.'".into(),
        })
    }
}

/// Documents as JSON files below a data directory.
pub struct JsonDocumentStore {
    fs: Arc<dyn FileSystem>,
    data_dir: PathBuf,
    pretty: bool,
}

impl JsonDocumentStore {
    pub fn new(fs: Arc<dyn FileSystem>, data_dir: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            fs,
            data_dir: data_dir.into(),
            pretty,
        }
    }

    /// File backing the document `name`.
    pub fn document_path(&self, name: &str) -> ApplicationResult<PathBuf> {
        validate_document_name(name)?;
        Ok(self.data_dir.join(format!("{name}.{EXTENSION}")))
    }
}

impl DocumentStore for JsonDocumentStore {
    fn load(&self, name: &str) -> ApplicationResult<Forest> {
        let path = self.document_path(name)?;
        if !self.fs.exists(&path) {
            debug!("load: {} does not exist yet", path.display());
            return Ok(Vec::new());
        }
        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read document", &path)?;
        let forest: Forest = serde_json::from_str(&content).with_document(name)?;
        debug!("load: {} roots from {}", forest.len(), path.display());
        Ok(forest)
    }

    fn save(&self, name: &str, forest: &[Node]) -> ApplicationResult<()> {
        let path = self.document_path(name)?;
        self.fs
            .create_dir_all(&self.data_dir)
            .with_path_context("create data directory", &self.data_dir)?;
        let encoded = if self.pretty {
            serde_json::to_string_pretty(forest)
        } else {
            serde_json::to_string(forest)
        };
        let content = encoded.with_document(name)?;
        self.fs
            .write(&path, &content)
            .with_path_context("write document", &path)?;
        debug!("save: {} roots to {}", forest.len(), path.display());
        Ok(())
    }

    fn list(&self) -> ApplicationResult<Vec<String>> {
        if !self.fs.exists(&self.data_dir) {
            return Ok(Vec::new());
        }
        let files = self
            .fs
            .list_files(&self.data_dir, EXTENSION)
            .with_path_context("list documents", &self.data_dir)?;
        Ok(files
            .iter()
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect())
    }
}
