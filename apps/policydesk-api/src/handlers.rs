//! HTTP handlers for PolicyDesk API

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use document_query::query_documents;
use shared_types::audit::{hash_document, AuditAction, AuditChain};
use shared_types::{Document, DocumentStatus};
use template_engine::{render_policy, unbound_placeholders, UnboundPolicy};

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

const SELECT_DOCUMENT: &str = r#"
    SELECT id, title, description, tags_json, status, priority, confidentiality,
           content, version, audit_json, created_at, updated_at
    FROM documents
"#;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

async fn fetch_db_document(state: &AppState, id: &str) -> Result<DbDocument, ApiError> {
    let row: Option<DbDocument> =
        sqlx::query_as(&format!("{} WHERE id = ?", SELECT_DOCUMENT))
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    row.ok_or_else(|| ApiError::DocumentNotFound(id.to_string()))
}

async fn insert_document(
    state: &AppState,
    document: &Document,
    audit: &AuditChain,
) -> Result<(), ApiError> {
    let tags_json =
        serde_json::to_string(&document.tags).map_err(|e| ApiError::Internal(e.into()))?;
    let audit_json = audit.to_json().map_err(|e| ApiError::Internal(e.into()))?;

    sqlx::query(
        r#"
        INSERT INTO documents (id, title, description, tags_json, status, priority,
                               confidentiality, content, version, audit_json,
                               created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&document.id)
    .bind(&document.title)
    .bind(&document.description)
    .bind(&tags_json)
    .bind(document.status.to_string())
    .bind(document.priority.to_string())
    .bind(document.confidentiality.to_string())
    .bind(&document.content)
    .bind(document.version as i64)
    .bind(&audit_json)
    .bind(document.created_at.to_rfc3339())
    .bind(document.updated_at.to_rfc3339())
    .execute(&state.db)
    .await?;

    Ok(())
}

/// List documents filtered and sorted by the query engine
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let criteria = query.into_criteria()?;

    // rowid order keeps the unsorted view in insertion order
    let rows: Vec<DbDocument> = sqlx::query_as(&format!("{} ORDER BY rowid", SELECT_DOCUMENT))
        .fetch_all(&state.db)
        .await?;

    let documents = rows
        .into_iter()
        .map(DbDocument::into_document)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(query_documents(&documents, &criteria)))
}

/// Create a document directly
pub async fn create_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<Json<Document>, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Title must not be empty".into()));
    }

    let now = Utc::now();
    let document = Document {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        description: req.description,
        tags: req.tags,
        status: DocumentStatus::Draft,
        priority: req.priority,
        confidentiality: req.confidentiality,
        content: req.content,
        version: 1,
        created_at: now,
        updated_at: now,
    };

    let mut audit = AuditChain::new(&document.id);
    audit.append(
        AuditAction::Created,
        &req.actor,
        &hash_document(&document.content),
        None,
    );

    insert_document(&state, &document, &audit).await?;

    tracing::info!("Created document: {}", document.id);
    Ok(Json(document))
}

/// Get a document by ID
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let row = fetch_db_document(&state, &id).await?;
    Ok(Json(row.into_document()?))
}

/// Get the audit trail for a document
pub async fn get_audit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AuditChain>, ApiError> {
    let row = fetch_db_document(&state, &id).await?;
    let (_, audit) = row.into_parts()?;
    Ok(Json(audit))
}

/// Partially update a document
pub async fn update_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, ApiError> {
    let row = fetch_db_document(&state, &id).await?;
    let (mut document, mut audit) = row.into_parts()?;

    let mut content_bearing = false;
    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Title must not be empty".into()));
        }
        content_bearing |= title != document.title;
        document.title = title;
    }
    if let Some(description) = req.description {
        content_bearing |= description != document.description;
        document.description = description;
    }
    if let Some(content) = req.content {
        content_bearing |= content != document.content;
        document.content = content;
    }
    if let Some(tags) = req.tags {
        document.tags = tags;
    }
    if let Some(priority) = req.priority {
        document.priority = priority;
    }
    if let Some(confidentiality) = req.confidentiality {
        document.confidentiality = confidentiality;
    }

    if content_bearing {
        document.version += 1;
        audit.append(
            AuditAction::Updated {
                version: document.version,
            },
            &req.actor,
            &hash_document(&document.content),
            None,
        );
    }
    document.updated_at = Utc::now();

    persist_document(&state, &document, &audit).await?;

    tracing::info!("Updated document: {} (v{})", document.id, document.version);
    Ok(Json(document))
}

/// Explicit status transition
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<Document>, ApiError> {
    let row = fetch_db_document(&state, &id).await?;
    let (mut document, mut audit) = row.into_parts()?;

    let from = document.status;
    document.status = req.status;
    document.updated_at = Utc::now();

    audit.append(
        AuditAction::StatusChanged {
            from,
            to: req.status,
        },
        &req.actor,
        &hash_document(&document.content),
        None,
    );

    persist_document(&state, &document, &audit).await?;

    tracing::info!(
        "Status of document {} changed: {} -> {}",
        document.id,
        from,
        document.status
    );
    Ok(Json(document))
}

async fn persist_document(
    state: &AppState,
    document: &Document,
    audit: &AuditChain,
) -> Result<(), ApiError> {
    let tags_json =
        serde_json::to_string(&document.tags).map_err(|e| ApiError::Internal(e.into()))?;
    let audit_json = audit.to_json().map_err(|e| ApiError::Internal(e.into()))?;

    sqlx::query(
        r#"
        UPDATE documents
        SET title = ?, description = ?, tags_json = ?, status = ?, priority = ?,
            confidentiality = ?, content = ?, version = ?, audit_json = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&document.title)
    .bind(&document.description)
    .bind(&tags_json)
    .bind(document.status.to_string())
    .bind(document.priority.to_string())
    .bind(document.confidentiality.to_string())
    .bind(&document.content)
    .bind(document.version as i64)
    .bind(&audit_json)
    .bind(document.updated_at.to_rfc3339())
    .bind(&document.id)
    .execute(&state.db)
    .await?;

    Ok(())
}

/// Delete a document
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::DocumentNotFound(id));
    }

    tracing::info!("Deleted document: {}", id);
    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// List available templates
pub async fn list_templates() -> Json<Vec<template_engine::TemplateInfo>> {
    Json(template_engine::list_templates())
}

/// Preview a template render with caller bindings
pub async fn render_template(
    Path(name): Path<String>,
    Json(req): Json<RenderPreviewRequest>,
) -> Result<Json<RenderPreviewResponse>, ApiError> {
    let options = req.render_options()?;
    let template = template_engine::instantiate(&name)?;

    // Report what would stay unbound after defaults are overlaid
    let mut effective = template.defaults.clone();
    for (key, value) in &req.bindings {
        effective.insert(key.clone(), value.clone());
    }
    let unbound = unbound_placeholders(&template.body, &effective);

    let html = render_policy(&template, &req.bindings, options)?;
    Ok(Json(RenderPreviewResponse { html, unbound }))
}

/// Generate a draft document from a registry template
pub async fn generate_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateDocumentRequest>,
) -> Result<Json<Document>, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Title must not be empty".into()));
    }

    let info = template_engine::get_template_info(&req.template)?;
    let missing = info.missing_required_inputs(&req.bindings);
    if !missing.is_empty() {
        return Err(template_engine::TemplateError::MissingRequiredInputs(missing).into());
    }

    // Optional inputs without a default render as empty in the final policy
    let template = template_engine::instantiate(&req.template)?;
    let options = template_engine::RenderOptions {
        unbound: UnboundPolicy::Blank,
        ..Default::default()
    };
    let content = render_policy(&template, &req.bindings, options)?;

    let now = Utc::now();
    let document = Document {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        description: req.description,
        tags: req.tags,
        status: DocumentStatus::Draft,
        priority: req.priority.unwrap_or(shared_types::Priority::Medium),
        confidentiality: req
            .confidentiality
            .unwrap_or(shared_types::Confidentiality::Internal),
        content,
        version: 1,
        created_at: now,
        updated_at: now,
    };

    let mut audit = AuditChain::new(&document.id);
    audit.append(
        AuditAction::Generated {
            template: req.template.clone(),
        },
        &req.actor,
        &hash_document(&document.content),
        None,
    );

    insert_document(&state, &document, &audit).await?;

    tracing::info!(
        "Generated document {} from template {}",
        document.id,
        req.template
    );
    Ok(Json(document))
}
