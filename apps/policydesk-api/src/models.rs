//! Data models for PolicyDesk API

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use document_query::{DocumentCriteria, SortKey};
use shared_types::audit::AuditChain;
use shared_types::{Confidentiality, Document, Priority};
use template_engine::{RenderOptions, UnboundPolicy, ValueMode};

use crate::error::ApiError;

fn default_actor() -> String {
    "system".to_string()
}

/// Query string for document list requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDocumentsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub confidentiality: Option<String>,
    pub sort: Option<String>,
}

impl ListDocumentsQuery {
    /// Build engine criteria from raw query parameters.
    ///
    /// The literal value `"all"` (or absence) disables a filter. Unknown
    /// filter values are a 400 since they can never match a document;
    /// unknown sort values fall back to input order.
    pub fn into_criteria(self) -> Result<DocumentCriteria, ApiError> {
        Ok(DocumentCriteria {
            search: self.search.unwrap_or_default(),
            status: parse_filter(self.status.as_deref(), "status")?,
            priority: parse_filter(self.priority.as_deref(), "priority")?,
            confidentiality: parse_filter(self.confidentiality.as_deref(), "confidentiality")?,
            sort: self.sort.as_deref().and_then(SortKey::from_param),
        })
    }
}

fn parse_filter<T: FromStr>(value: Option<&str>, field: &str) -> Result<Option<T>, ApiError> {
    match value {
        None | Some("all") => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| ApiError::InvalidRequest(format!("Invalid {} filter: {}", field, v))),
    }
}

/// Request to create a document directly
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub priority: Priority,
    pub confidentiality: Confidentiality,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_actor")]
    pub actor: String,
}

/// Partial update of a document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub confidentiality: Option<Confidentiality>,
    pub content: Option<String>,
    #[serde(default = "default_actor")]
    pub actor: String,
}

/// Explicit status transition
#[derive(Debug, Clone, Deserialize)]
pub struct SetStatusRequest {
    pub status: shared_types::DocumentStatus,
    #[serde(default = "default_actor")]
    pub actor: String,
}

/// Request to preview a template render
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderPreviewRequest {
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
    /// "keep" (default), "blank", or "error"
    pub unbound: Option<String>,
    /// Insert binding values verbatim instead of HTML-escaping them
    #[serde(default)]
    pub raw_values: bool,
}

impl RenderPreviewRequest {
    pub fn render_options(&self) -> Result<RenderOptions, ApiError> {
        let unbound = match self.unbound.as_deref() {
            None | Some("keep") => UnboundPolicy::Keep,
            Some("blank") => UnboundPolicy::Blank,
            Some("error") => UnboundPolicy::Error,
            Some(other) => {
                return Err(ApiError::InvalidRequest(format!(
                    "Invalid unbound policy: {}",
                    other
                )))
            }
        };
        let values = if self.raw_values {
            ValueMode::Raw
        } else {
            ValueMode::EscapeHtml
        };
        Ok(RenderOptions { unbound, values })
    }
}

/// Response for a template render preview
#[derive(Debug, Clone, Serialize)]
pub struct RenderPreviewResponse {
    pub html: String,
    /// Placeholders that had neither a binding nor a default
    pub unbound: Vec<String>,
}

/// Request to generate a document from a registry template
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateDocumentRequest {
    pub template: String,
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub priority: Option<Priority>,
    pub confidentiality: Option<Confidentiality>,
    #[serde(default = "default_actor")]
    pub actor: String,
}

/// Document row stored in the database
#[derive(Debug, Clone, FromRow)]
pub struct DbDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags_json: String,
    pub status: String,
    pub priority: String,
    pub confidentiality: String,
    pub content: String,
    pub version: i64,
    pub audit_json: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbDocument {
    /// Decode the row into the domain model plus its audit chain
    pub fn into_parts(self) -> Result<(Document, AuditChain), ApiError> {
        let tags: Vec<String> = serde_json::from_str(&self.tags_json).unwrap_or_default();
        let audit = AuditChain::from_json(&self.audit_json).unwrap_or_default();

        let status = self
            .status
            .parse()
            .map_err(|e: shared_types::UnknownValue| ApiError::Internal(e.into()))?;
        let priority = self
            .priority
            .parse()
            .map_err(|e: shared_types::UnknownValue| ApiError::Internal(e.into()))?;
        let confidentiality = self
            .confidentiality
            .parse()
            .map_err(|e: shared_types::UnknownValue| ApiError::Internal(e.into()))?;

        let document = Document {
            id: self.id,
            title: self.title,
            description: self.description,
            tags,
            status,
            priority,
            confidentiality,
            content: self.content,
            version: self.version as u32,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        Ok((document, audit))
    }

    pub fn into_document(self) -> Result<Document, ApiError> {
        self.into_parts().map(|(document, _)| document)
    }
}
