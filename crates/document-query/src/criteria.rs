//! Filter and sort criteria for document list views
//!
//! Transient values built per list request; nothing here is persisted.

use serde::{Deserialize, Serialize};
use shared_types::{Confidentiality, DocumentStatus, Priority};

/// Sort order for a document list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CreatedAsc,
    CreatedDesc,
    UpdatedAsc,
    UpdatedDesc,
    TitleAsc,
    TitleDesc,
    PriorityAsc,
    PriorityDesc,
}

impl SortKey {
    /// Parse a list-view sort parameter.
    ///
    /// Unrecognized values mean "no sort": the list keeps its input order.
    pub fn from_param(value: &str) -> Option<SortKey> {
        match value {
            "created_asc" => Some(SortKey::CreatedAsc),
            "created_desc" => Some(SortKey::CreatedDesc),
            "updated_asc" => Some(SortKey::UpdatedAsc),
            "updated_desc" => Some(SortKey::UpdatedDesc),
            "title_asc" => Some(SortKey::TitleAsc),
            "title_desc" => Some(SortKey::TitleDesc),
            "priority_asc" => Some(SortKey::PriorityAsc),
            "priority_desc" => Some(SortKey::PriorityDesc),
            _ => None,
        }
    }
}

/// Filter/sort criteria for a document list request
///
/// `None` filters mean "all"; an empty search matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentCriteria {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub confidentiality: Option<Confidentiality>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_criteria_is_all_pass() {
        let criteria = DocumentCriteria::default();
        assert_eq!(criteria.search, "");
        assert_eq!(criteria.status, None);
        assert_eq!(criteria.priority, None);
        assert_eq!(criteria.confidentiality, None);
        assert_eq!(criteria.sort, None);
    }

    #[test]
    fn test_sort_param_parses_known_keys() {
        assert_eq!(SortKey::from_param("created_asc"), Some(SortKey::CreatedAsc));
        assert_eq!(SortKey::from_param("updated_desc"), Some(SortKey::UpdatedDesc));
        assert_eq!(SortKey::from_param("title_asc"), Some(SortKey::TitleAsc));
        assert_eq!(
            SortKey::from_param("priority_desc"),
            Some(SortKey::PriorityDesc)
        );
    }

    #[test]
    fn test_unknown_sort_param_means_input_order() {
        assert_eq!(SortKey::from_param("by_author"), None);
        assert_eq!(SortKey::from_param(""), None);
    }
}
