//! Directory of JSON artifacts as a document store.
//!
//! Layout:
//!
//! ```text
//! <root>/
//!   <category>_index.json   one per category (summaries + graph slice)
//!   documents.json          all documents in full
//!   master_index.json       written last; marks a complete save
//! ```
//!
//! Every file is written to a `.tmp` sibling and renamed into place. Category
//! indices left over from an earlier save are removed once the master index
//! has been written.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use wave_resonance_core::artifacts::DOCUMENTS_FILE_NAME;
use wave_resonance_core::{
    CategoryIndex, Document, DocumentStore, IndexSnapshot, MasterIndex, ResonanceError,
    ResonanceGraph, ResonanceResult,
};

use crate::error::{StorageError, StorageResult};

const CATEGORY_INDEX_SUFFIX: &str = "_index.json";
const TMP_EXTENSION: &str = "tmp";

/// Stores snapshots as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonDirectoryStore {
    root: PathBuf,
}

impl JsonDirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write all artifacts of `snapshot`, replacing the previous contents.
    pub async fn save_snapshot(&self, snapshot: &IndexSnapshot) -> StorageResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| self.unavailable(e))?;

        let indices = snapshot.category_indices();
        for index in &indices {
            self.write_json(&index.file_name(), index).await?;
        }
        self.write_json(DOCUMENTS_FILE_NAME, snapshot.documents()).await?;
        self.write_json(MasterIndex::FILE_NAME, snapshot.master()).await?;

        // only after the master is in place: a failed save keeps every old category
        let keep: Vec<String> = indices.iter().map(CategoryIndex::file_name).collect();
        for stale in self.category_files().await? {
            let name = file_name(&stale);
            if !keep.contains(&name) {
                debug!(file = %name, "Removing stale category index");
                fs::remove_file(&stale).await.map_err(|e| write_failed(&stale, e))?;
            }
        }

        info!(
            root = %self.root.display(),
            documents = snapshot.len(),
            categories = indices.len(),
            "Index saved"
        );
        Ok(())
    }

    /// Read the stored snapshot; a store that was never written is empty.
    pub async fn load_snapshot(&self) -> StorageResult<IndexSnapshot> {
        let documents_path = self.root.join(DOCUMENTS_FILE_NAME);
        if !exists(&documents_path).await {
            debug!(root = %self.root.display(), "No stored index");
            return Ok(IndexSnapshot::empty());
        }

        let documents: Vec<Document> = self.read_json(DOCUMENTS_FILE_NAME).await?;
        let master_path = self.root.join(MasterIndex::FILE_NAME);
        if !exists(&master_path).await {
            return Err(StorageError::IndexCorrupted {
                file: MasterIndex::FILE_NAME.to_string(),
                details: "missing while documents are present".to_string(),
            });
        }
        let master: MasterIndex = self.read_json(MasterIndex::FILE_NAME).await?;
        if master.total_documents != documents.len() {
            return Err(StorageError::IndexCorrupted {
                file: MasterIndex::FILE_NAME.to_string(),
                details: format!(
                    "total_documents {} but {} documents stored",
                    master.total_documents,
                    documents.len()
                ),
            });
        }

        let mut graph = ResonanceGraph::new();
        for path in self.category_files().await? {
            let name = file_name(&path);
            let index: CategoryIndex = self.read_json(&name).await?;
            if index.document_count != index.documents.len() {
                return Err(StorageError::IndexCorrupted {
                    file: name,
                    details: format!(
                        "document_count {} but {} summaries",
                        index.document_count,
                        index.documents.len()
                    ),
                });
            }
            debug!(category = %index.category, documents = index.document_count, "Loaded category index");
            graph.merge(index.resonance_graph);
        }

        let snapshot =
            IndexSnapshot::from_parts(documents, graph, master).map_err(|e| match e {
                ResonanceError::DuplicateDocument(id) => StorageError::IndexCorrupted {
                    file: DOCUMENTS_FILE_NAME.to_string(),
                    details: format!("duplicate document ID {}", id),
                },
                other => StorageError::IndexCorrupted {
                    file: DOCUMENTS_FILE_NAME.to_string(),
                    details: other.to_string(),
                },
            })?;

        info!(
            root = %self.root.display(),
            documents = snapshot.len(),
            nodes = snapshot.graph().len(),
            "Index loaded"
        );
        Ok(snapshot)
    }

    /// Category index files present, sorted by name.
    async fn category_files(&self) -> StorageResult<Vec<PathBuf>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.unavailable(e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| self.unavailable(e))? {
            let path = entry.path();
            let name = file_name(&path);
            if name.ends_with(CATEGORY_INDEX_SUFFIX) && name != MasterIndex::FILE_NAME {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    async fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> StorageResult<()> {
        let path = self.root.join(name);
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| StorageError::Serialization {
            file: name.to_string(),
            message: e.to_string(),
        })?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".");
        tmp.push(TMP_EXTENSION);
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| write_failed(&tmp, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| write_failed(&path, e))?;

        debug!(file = name, bytes = bytes.len(), "Wrote artifact");
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> StorageResult<T> {
        let path = self.root.join(name);
        let bytes = fs::read(&path).await.map_err(|e| StorageError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization {
            file: name.to_string(),
            message: e.to_string(),
        })
    }

    fn unavailable(&self, e: std::io::Error) -> StorageError {
        StorageError::DirectoryUnavailable {
            path: self.root.display().to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for JsonDirectoryStore {
    async fn save(&self, snapshot: &IndexSnapshot) -> ResonanceResult<()> {
        Ok(self.save_snapshot(snapshot).await?)
    }

    async fn load(&self) -> ResonanceResult<IndexSnapshot> {
        Ok(self.load_snapshot().await?)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_failed(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::WriteFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
