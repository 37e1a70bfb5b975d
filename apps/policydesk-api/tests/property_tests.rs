//! Property-based tests for policydesk-api
//!
//! Tests the list-query parsing invariants using proptest.

use proptest::prelude::*;

use document_query::SortKey;
use policydesk_api::models::ListDocumentsQuery;
use shared_types::{DocumentStatus, Priority};

// ============================================================
// Strategies
// ============================================================

fn valid_status_string() -> impl Strategy<Value = String> {
    prop::sample::select(
        DocumentStatus::ALL
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>(),
    )
}

fn valid_priority_string() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "low".to_string(),
        "medium".to_string(),
        "high".to_string(),
        "urgent".to_string(),
    ])
}

fn valid_sort_string() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "created_asc".to_string(),
        "created_desc".to_string(),
        "updated_asc".to_string(),
        "updated_desc".to_string(),
        "title_asc".to_string(),
        "title_desc".to_string(),
        "priority_asc".to_string(),
        "priority_desc".to_string(),
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Filter Parsing
    // ============================================================

    #[test]
    fn valid_status_filters_parse(status in valid_status_string()) {
        let query = ListDocumentsQuery {
            status: Some(status.clone()),
            ..Default::default()
        };
        let criteria = query.into_criteria().unwrap();
        prop_assert_eq!(criteria.status.map(|s| s.to_string()), Some(status));
    }

    #[test]
    fn valid_priority_filters_parse(priority in valid_priority_string()) {
        let query = ListDocumentsQuery {
            priority: Some(priority.clone()),
            ..Default::default()
        };
        let criteria = query.into_criteria().unwrap();
        prop_assert_eq!(criteria.priority.map(|p| p.to_string()), Some(priority));
    }

    #[test]
    fn all_keyword_disables_every_filter(search in "[a-z]{0,10}") {
        let query = ListDocumentsQuery {
            search: Some(search.clone()),
            status: Some("all".to_string()),
            priority: Some("all".to_string()),
            confidentiality: Some("all".to_string()),
            sort: None,
        };
        let criteria = query.into_criteria().unwrap();
        prop_assert_eq!(criteria.status, None);
        prop_assert_eq!(criteria.priority, None);
        prop_assert_eq!(criteria.confidentiality, None);
        prop_assert_eq!(criteria.search, search);
    }

    #[test]
    fn garbage_status_filters_are_rejected(garbage in "[A-Z]{1,12}") {
        // Wire names are snake_case, so uppercase strings never parse
        let query = ListDocumentsQuery {
            status: Some(garbage),
            ..Default::default()
        };
        prop_assert!(query.into_criteria().is_err());
    }

    // ============================================================
    // Sort Parsing
    // ============================================================

    #[test]
    fn known_sort_strings_parse(sort in valid_sort_string()) {
        let query = ListDocumentsQuery {
            sort: Some(sort.clone()),
            ..Default::default()
        };
        let criteria = query.into_criteria().unwrap();
        prop_assert!(criteria.sort.is_some(), "sort '{}' should parse", sort);
    }

    #[test]
    fn unknown_sort_strings_mean_input_order(garbage in "[a-z_]{1,20}") {
        prop_assume!(SortKey::from_param(&garbage).is_none());
        let query = ListDocumentsQuery {
            sort: Some(garbage),
            ..Default::default()
        };
        let criteria = query.into_criteria().unwrap();
        prop_assert_eq!(criteria.sort, None);
    }

    // ============================================================
    // Priority Rank Table
    // ============================================================

    #[test]
    fn priority_ranks_match_fixed_table(priority in valid_priority_string()) {
        let parsed: Priority = priority.parse().unwrap();
        let expected = match priority.as_str() {
            "urgent" => 4,
            "high" => 3,
            "medium" => 2,
            "low" => 1,
            _ => unreachable!(),
        };
        prop_assert_eq!(parsed.rank(), expected);
    }
}
