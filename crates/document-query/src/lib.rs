//! Document list querying and storage seam
//!
//! This crate owns the pure filter/sort engine used by document list
//! views, the transient criteria values that drive it, and the
//! `DocumentRepository` trait that keeps the engine independent of any
//! particular storage backend.

pub mod criteria;
pub mod engine;
pub mod repository;

pub use criteria::{DocumentCriteria, SortKey};
pub use engine::query_documents;
pub use repository::{DocumentRepository, InMemoryRepository, RepositoryError};
