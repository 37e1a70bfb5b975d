use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing a wire-format enum value fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized value: {0}")]
pub struct UnknownValue(pub String);

/// Document lifecycle status
///
/// Transitions are explicit user actions; there is no automatic
/// transition logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    InReview,
    PendingApproval,
    Approved,
    Published,
    Archived,
    Rejected,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 7] = [
        DocumentStatus::Draft,
        DocumentStatus::InReview,
        DocumentStatus::PendingApproval,
        DocumentStatus::Approved,
        DocumentStatus::Published,
        DocumentStatus::Archived,
        DocumentStatus::Rejected,
    ];
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Draft => write!(f, "draft"),
            DocumentStatus::InReview => write!(f, "in_review"),
            DocumentStatus::PendingApproval => write!(f, "pending_approval"),
            DocumentStatus::Approved => write!(f, "approved"),
            DocumentStatus::Published => write!(f, "published"),
            DocumentStatus::Archived => write!(f, "archived"),
            DocumentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DocumentStatus::Draft),
            "in_review" => Ok(DocumentStatus::InReview),
            "pending_approval" => Ok(DocumentStatus::PendingApproval),
            "approved" => Ok(DocumentStatus::Approved),
            "published" => Ok(DocumentStatus::Published),
            "archived" => Ok(DocumentStatus::Archived),
            "rejected" => Ok(DocumentStatus::Rejected),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

/// Document priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Fixed ordering rank: urgent > high > medium > low
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

/// Document sensitivity classification
///
/// Filter/display attribute only; carries no enforcement logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidentiality {
    Public,
    Internal,
    Confidential,
    Restricted,
}

impl fmt::Display for Confidentiality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidentiality::Public => write!(f, "public"),
            Confidentiality::Internal => write!(f, "internal"),
            Confidentiality::Confidential => write!(f, "confidential"),
            Confidentiality::Restricted => write!(f, "restricted"),
        }
    }
}

impl FromStr for Confidentiality {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Confidentiality::Public),
            "internal" => Ok(Confidentiality::Internal),
            "confidential" => Ok(Confidentiality::Confidential),
            "restricted" => Ok(Confidentiality::Restricted),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

/// A compliance policy document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: DocumentStatus,
    pub priority: Priority,
    pub confidentiality: Confidentiality,
    /// HTML body, authored directly or generated from a template
    pub content: String,
    /// Starts at 1, bumped on content-bearing updates
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An HTML policy template with `{{placeholder}}` tokens
///
/// Immutable for the duration of a render pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyTemplate {
    pub id: String,
    pub name: String,
    pub body: String,
    /// Placeholder name to default value
    pub defaults: BTreeMap<String, String>,
}
