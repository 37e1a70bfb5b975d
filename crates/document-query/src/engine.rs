//! Pure filter/sort engine over in-memory document collections
//!
//! The engine never touches storage: callers hand it already-resolved
//! documents and get a new, ordered vector back. The input is not
//! mutated.

use std::cmp::Ordering;

use shared_types::Document;

use crate::criteria::{DocumentCriteria, SortKey};

/// Compute the visible, ordered subset of `documents` for `criteria`.
///
/// Sorting is stable: documents that compare equal keep their input
/// relative order. With no sort key the input order is preserved.
pub fn query_documents(documents: &[Document], criteria: &DocumentCriteria) -> Vec<Document> {
    let mut visible: Vec<Document> = documents
        .iter()
        .filter(|doc| matches(doc, criteria))
        .cloned()
        .collect();

    if let Some(key) = criteria.sort {
        visible.sort_by(|a, b| compare(a, b, key));
    }

    visible
}

fn matches(doc: &Document, criteria: &DocumentCriteria) -> bool {
    if let Some(status) = criteria.status {
        if doc.status != status {
            return false;
        }
    }
    if let Some(priority) = criteria.priority {
        if doc.priority != priority {
            return false;
        }
    }
    if let Some(confidentiality) = criteria.confidentiality {
        if doc.confidentiality != confidentiality {
            return false;
        }
    }
    matches_search(doc, &criteria.search)
}

/// Case-insensitive substring match against title, description, or any tag
fn matches_search(doc: &Document, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    doc.title.to_lowercase().contains(&needle)
        || doc.description.to_lowercase().contains(&needle)
        || doc.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
}

fn compare(a: &Document, b: &Document, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAsc => a.created_at.cmp(&b.created_at),
        SortKey::CreatedDesc => b.created_at.cmp(&a.created_at),
        SortKey::UpdatedAsc => a.updated_at.cmp(&b.updated_at),
        SortKey::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
        SortKey::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
        SortKey::PriorityAsc => a.priority.rank().cmp(&b.priority.rank()),
        SortKey::PriorityDesc => b.priority.rank().cmp(&a.priority.rank()),
    }
}
