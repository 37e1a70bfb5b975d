//! Error types for template lookup and rendering

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Missing required inputs: {}", .0.join(", "))]
    MissingRequiredInputs(Vec<String>),

    #[error("Unbound placeholders: {}", .0.join(", "))]
    UnboundPlaceholders(Vec<String>),
}
