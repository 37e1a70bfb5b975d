//! Tamper-evident audit log for document events

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::types::DocumentStatus;

/// Types of auditable events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Created,
    Updated {
        version: u32,
    },
    StatusChanged {
        from: DocumentStatus,
        to: DocumentStatus,
    },
    Generated {
        template: String,
    },
    Deleted,
}

/// Audit chain verification failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("chain broken at event {index}: {reason}")]
pub struct ChainBroken {
    pub index: usize,
    pub reason: String,
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: String,
    pub timestamp: String,
    pub action: AuditAction,
    pub actor: String,
    pub document_hash: String,
    pub previous_hash: Option<String>,
    pub detail: Option<String>,
}

impl AuditEvent {
    /// Create a new audit event
    pub fn new(
        action: AuditAction,
        actor: &str,
        document_hash: &str,
        previous_hash: Option<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            action,
            actor: actor.to_string(),
            document_hash: document_hash.to_string(),
            previous_hash,
            detail,
        }
    }

    /// Compute the hash of this event (for chain linking)
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.event_id.as_bytes());
        hasher.update(self.timestamp.as_bytes());
        hasher.update(format!("{:?}", self.action).as_bytes());
        hasher.update(self.actor.as_bytes());
        hasher.update(self.document_hash.as_bytes());
        if let Some(ref prev) = self.previous_hash {
            hasher.update(prev.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Chain of audit events with hash linking
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AuditChain {
    pub events: Vec<AuditEvent>,
    pub document_id: String,
    pub created_at: String,
}

impl AuditChain {
    /// Create a new audit chain for a document
    pub fn new(document_id: &str) -> Self {
        Self {
            events: Vec::new(),
            document_id: document_id.to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Get the hash of the last event (for linking)
    pub fn last_hash(&self) -> Option<String> {
        self.events.last().map(|e| e.compute_hash())
    }

    /// Append an event, automatically linking to the previous hash
    pub fn append(
        &mut self,
        action: AuditAction,
        actor: &str,
        document_hash: &str,
        detail: Option<String>,
    ) -> &AuditEvent {
        let previous_hash = self.last_hash();
        let event = AuditEvent::new(action, actor, document_hash, previous_hash, detail);
        self.events.push(event);
        // push above guarantees a last element
        &self.events[self.events.len() - 1]
    }

    /// Verify the integrity of the chain
    pub fn verify(&self) -> Result<(), ChainBroken> {
        let mut expected_prev: Option<String> = None;

        for (i, event) in self.events.iter().enumerate() {
            if event.previous_hash != expected_prev {
                return Err(ChainBroken {
                    index: i,
                    reason: format!(
                        "expected prev {:?}, got {:?}",
                        expected_prev, event.previous_hash
                    ),
                });
            }
            expected_prev = Some(event.compute_hash());
        }

        Ok(())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Compute SHA-256 hash of document content
pub fn hash_document(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_integrity() {
        let mut chain = AuditChain::new("doc-123");

        chain.append(AuditAction::Created, "alice@clinic.org", "hash1", None);
        chain.append(
            AuditAction::Updated { version: 2 },
            "alice@clinic.org",
            "hash2",
            Some("Revised retention schedule".to_string()),
        );
        chain.append(
            AuditAction::StatusChanged {
                from: DocumentStatus::Draft,
                to: DocumentStatus::InReview,
            },
            "bob@clinic.org",
            "hash2",
            None,
        );

        assert!(chain.verify().is_ok());
        assert_eq!(chain.events.len(), 3);
    }

    #[test]
    fn test_chain_tamper_detection() {
        let mut chain = AuditChain::new("doc-123");

        chain.append(AuditAction::Created, "alice@clinic.org", "hash1", None);
        chain.append(AuditAction::Deleted, "alice@clinic.org", "hash1", None);

        // Tamper with the first event
        chain.events[0].actor = "mallory@evil.com".to_string();

        assert!(chain.verify().is_err());
    }

    #[test]
    fn test_generated_action() {
        let mut chain = AuditChain::new("doc-123");

        chain.append(
            AuditAction::Generated {
                template: "hipaa_privacy".to_string(),
            },
            "compliance@clinic.org",
            "hash1",
            None,
        );

        assert!(chain.verify().is_ok());
        assert_eq!(chain.events.len(), 1);
    }

    #[test]
    fn test_hash_document_is_hex_sha256() {
        let hash = hash_document("policy body");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
