//! HTML policy template engine
//!
//! This crate provides `{{placeholder}}` template rendering and the
//! registry of built-in policy templates:
//! - Single-pass placeholder substitution with explicit unbound-token and
//!   HTML-escaping policies
//! - Placeholder scanning (declared-input validation, unbound detection)
//! - Embedded healthcare policy templates with required/optional inputs

pub mod embedded;
pub mod errors;
pub mod render;
pub mod registry;

pub use errors::TemplateError;
pub use render::{
    placeholders, render_policy, render_template, render_template_with, unbound_placeholders,
    Bindings, RenderOptions, UnboundPolicy, ValueMode,
};
pub use registry::{
    get_template_info, get_template_source, instantiate, list_templates, TemplateInfo,
};
