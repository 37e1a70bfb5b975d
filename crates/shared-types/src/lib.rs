pub mod audit;
pub mod types;

pub use types::{
    Confidentiality, Document, DocumentStatus, PolicyTemplate, Priority, UnknownValue,
};
