//! Storage-agnostic repository seam for documents
//!
//! The query engine and template renderer only ever see in-memory
//! documents; this trait is the boundary behind which any storage
//! backend (SQL, remote API, test fixture) can sit. The in-memory
//! implementation is the reference backend used by tests and embedders.

use std::collections::BTreeMap;
use std::sync::RwLock;

use shared_types::Document;
use thiserror::Error;

use crate::criteria::DocumentCriteria;
use crate::engine::query_documents;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// CRUD boundary for document storage
pub trait DocumentRepository: Send + Sync {
    /// All documents in insertion order
    fn list(&self) -> Result<Vec<Document>, RepositoryError>;

    fn get(&self, id: &str) -> Result<Option<Document>, RepositoryError>;

    /// Store a new document; the id must be unused
    fn create(&self, document: Document) -> Result<Document, RepositoryError>;

    /// Replace an existing document by id
    fn update(&self, document: Document) -> Result<Document, RepositoryError>;

    fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// List filtered and sorted through the query engine
    fn query(&self, criteria: &DocumentCriteria) -> Result<Vec<Document>, RepositoryError> {
        Ok(query_documents(&self.list()?, criteria))
    }
}

/// In-memory reference backend
///
/// Insertion order is preserved via a sequence number so that unsorted
/// queries see documents in creation order.
#[derive(Default)]
pub struct InMemoryRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    // id -> (insertion sequence, document)
    documents: BTreeMap<String, (u64, Document)>,
    next_seq: u64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a repository from existing documents
    pub fn with_documents(documents: Vec<Document>) -> Result<Self, RepositoryError> {
        let repo = Self::new();
        for document in documents {
            repo.create(document)?;
        }
        Ok(repo)
    }
}

impl DocumentRepository for InMemoryRepository {
    fn list(&self) -> Result<Vec<Document>, RepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| RepositoryError::Storage("poisoned lock".to_string()))?;
        let mut entries: Vec<&(u64, Document)> = inner.documents.values().collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, doc)| doc.clone()).collect())
    }

    fn get(&self, id: &str) -> Result<Option<Document>, RepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| RepositoryError::Storage("poisoned lock".to_string()))?;
        Ok(inner.documents.get(id).map(|(_, doc)| doc.clone()))
    }

    fn create(&self, document: Document) -> Result<Document, RepositoryError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| RepositoryError::Storage("poisoned lock".to_string()))?;
        if inner.documents.contains_key(&document.id) {
            return Err(RepositoryError::AlreadyExists(document.id));
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        tracing::debug!(id = %document.id, "document created");
        inner
            .documents
            .insert(document.id.clone(), (seq, document.clone()));
        Ok(document)
    }

    fn update(&self, document: Document) -> Result<Document, RepositoryError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| RepositoryError::Storage("poisoned lock".to_string()))?;
        match inner.documents.get_mut(&document.id) {
            Some((_, existing)) => {
                *existing = document.clone();
                tracing::debug!(id = %document.id, "document updated");
                Ok(document)
            }
            None => Err(RepositoryError::NotFound(document.id)),
        }
    }

    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| RepositoryError::Storage("poisoned lock".to_string()))?;
        if inner.documents.remove(id).is_none() {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        tracing::debug!(id = %id, "document deleted");
        Ok(())
    }
}
