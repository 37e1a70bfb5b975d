//! Template registry and metadata

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::PolicyTemplate;

use crate::embedded;
use crate::errors::TemplateError;
use crate::render::Bindings;

/// Information about an available template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Template name (used in API paths)
    pub name: String,
    /// Human-readable title
    pub title: String,
    /// Human-readable description
    pub description: String,
    /// Required input fields
    pub required_inputs: Vec<String>,
    /// Optional input fields
    pub optional_inputs: Vec<String>,
    /// Default values for optional inputs
    pub defaults: BTreeMap<String, String>,
}

impl TemplateInfo {
    /// Required inputs with no entry in `bindings`
    pub fn missing_required_inputs(&self, bindings: &Bindings) -> Vec<String> {
        self.required_inputs
            .iter()
            .filter(|name| !bindings.contains_key(*name))
            .cloned()
            .collect()
    }
}

fn defaults(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// List all available templates
pub fn list_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            name: "hipaa_privacy".to_string(),
            title: "HIPAA Privacy Policy".to_string(),
            description: "Privacy Rule policy: permitted uses and disclosures, \
                          minimum necessary, designated Privacy Officer"
                .to_string(),
            required_inputs: vec![
                "organization_name".to_string(),
                "privacy_officer".to_string(),
                "effective_date".to_string(),
            ],
            optional_inputs: vec![
                "contact_email".to_string(),
                "contact_phone".to_string(),
                "review_cycle".to_string(),
            ],
            defaults: defaults(&[("review_cycle", "annually")]),
        },
        TemplateInfo {
            name: "hipaa_security".to_string(),
            title: "HIPAA Security Policy".to_string(),
            description: "Security Rule policy: safeguards for ePHI, access \
                          control, audit controls, designated Security Officer"
                .to_string(),
            required_inputs: vec![
                "organization_name".to_string(),
                "security_officer".to_string(),
                "effective_date".to_string(),
            ],
            optional_inputs: vec![
                "contact_email".to_string(),
                "password_min_length".to_string(),
                "workstation_lock_minutes".to_string(),
                "review_cycle".to_string(),
            ],
            defaults: defaults(&[
                ("password_min_length", "12"),
                ("workstation_lock_minutes", "15"),
                ("review_cycle", "annually"),
            ]),
        },
        TemplateInfo {
            name: "incident_response".to_string(),
            title: "Security Incident Response Plan".to_string(),
            description: "Incident reporting, triage, containment timeline, and \
                          post-incident review"
                .to_string(),
            required_inputs: vec![
                "organization_name".to_string(),
                "incident_commander".to_string(),
                "effective_date".to_string(),
            ],
            optional_inputs: vec![
                "hotline_number".to_string(),
                "escalation_email".to_string(),
                "response_time_hours".to_string(),
            ],
            defaults: defaults(&[("response_time_hours", "24")]),
        },
        TemplateInfo {
            name: "breach_notification".to_string(),
            title: "Breach Notification Policy".to_string(),
            description: "Breach Notification Rule (45 CFR 164.400-414): risk \
                          assessment, individual and regulator notification windows"
                .to_string(),
            required_inputs: vec![
                "organization_name".to_string(),
                "privacy_officer".to_string(),
                "effective_date".to_string(),
            ],
            optional_inputs: vec![
                "notification_window_days".to_string(),
                "regulator_name".to_string(),
                "contact_email".to_string(),
            ],
            defaults: defaults(&[
                ("notification_window_days", "60"),
                (
                    "regulator_name",
                    "the Secretary of Health and Human Services",
                ),
            ]),
        },
        TemplateInfo {
            name: "data_retention".to_string(),
            title: "Data Retention and Destruction Policy".to_string(),
            description: "Retention schedule, records officer responsibilities, \
                          destruction method and litigation holds"
                .to_string(),
            required_inputs: vec![
                "organization_name".to_string(),
                "records_officer".to_string(),
                "effective_date".to_string(),
            ],
            optional_inputs: vec![
                "retention_years".to_string(),
                "destruction_method".to_string(),
            ],
            defaults: defaults(&[
                ("retention_years", "6"),
                (
                    "destruction_method",
                    "cross-cut shredding or certified digital erasure",
                ),
            ]),
        },
        TemplateInfo {
            name: "employee_training".to_string(),
            title: "Workforce Compliance Training Policy".to_string(),
            description: "Training cadence, new-hire deadlines, and completion \
                          tracking"
                .to_string(),
            required_inputs: vec![
                "organization_name".to_string(),
                "training_coordinator".to_string(),
                "effective_date".to_string(),
            ],
            optional_inputs: vec![
                "frequency".to_string(),
                "completion_deadline_days".to_string(),
            ],
            defaults: defaults(&[
                ("frequency", "annual"),
                ("completion_deadline_days", "30"),
            ]),
        },
    ]
}

/// Get metadata for a template by name
pub fn get_template_info(name: &str) -> Result<TemplateInfo, TemplateError> {
    list_templates()
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| TemplateError::TemplateNotFound(name.to_string()))
}

/// Get the HTML body for a template by name
pub fn get_template_source(name: &str) -> Result<String, TemplateError> {
    embedded::get_embedded_template(name)
        .ok_or_else(|| TemplateError::TemplateNotFound(name.to_string()))
}

/// Build a [`PolicyTemplate`] from a registry entry
pub fn instantiate(name: &str) -> Result<PolicyTemplate, TemplateError> {
    let info = get_template_info(name)?;
    let body = get_template_source(name)?;
    Ok(PolicyTemplate {
        id: info.name.clone(),
        name: info.title,
        body,
        defaults: info.defaults,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::placeholders;

    #[test]
    fn test_list_templates() {
        let templates = list_templates();
        assert!(!templates.is_empty());

        // Check that hipaa_privacy exists
        assert!(templates.iter().any(|t| t.name == "hipaa_privacy"));
    }

    #[test]
    fn test_get_template_source() {
        let source = get_template_source("hipaa_privacy");
        assert!(source.is_ok());

        let source = source.unwrap();
        assert!(source.contains("HIPAA Privacy Policy"));
    }

    #[test]
    fn test_unknown_template_errors() {
        let err = get_template_source("nonexistent").unwrap_err();
        assert_eq!(
            err,
            TemplateError::TemplateNotFound("nonexistent".to_string())
        );
        assert!(get_template_info("nonexistent").is_err());
        assert!(instantiate("nonexistent").is_err());
    }

    #[test]
    fn test_all_templates_have_source() {
        for info in list_templates() {
            let source = get_template_source(&info.name);
            assert!(
                source.is_ok(),
                "Template '{}' should have a body. Error: {:?}",
                info.name,
                source.err()
            );
            assert!(
                !source.unwrap().is_empty(),
                "Template '{}' body should not be empty",
                info.name
            );
        }
    }

    #[test]
    fn test_every_placeholder_is_a_declared_input() {
        for info in list_templates() {
            let body = get_template_source(&info.name).unwrap();
            for name in placeholders(&body) {
                assert!(
                    info.required_inputs.contains(&name)
                        || info.optional_inputs.contains(&name),
                    "Template '{}' uses undeclared placeholder '{}'",
                    info.name,
                    name
                );
            }
        }
    }

    #[test]
    fn test_every_required_input_appears_in_body() {
        for info in list_templates() {
            let body = get_template_source(&info.name).unwrap();
            let used = placeholders(&body);
            for name in &info.required_inputs {
                assert!(
                    used.contains(name),
                    "Template '{}' declares required input '{}' it never uses",
                    info.name,
                    name
                );
            }
        }
    }

    #[test]
    fn test_defaults_are_declared_inputs() {
        for info in list_templates() {
            for key in info.defaults.keys() {
                assert!(
                    info.required_inputs.contains(key) || info.optional_inputs.contains(key),
                    "Template '{}' has a default for undeclared input '{}'",
                    info.name,
                    key
                );
            }
        }
    }

    #[test]
    fn test_missing_required_inputs() {
        let info = get_template_info("hipaa_privacy").unwrap();

        let mut bindings = Bindings::new();
        bindings.insert("organization_name".to_string(), "Clinic".to_string());

        let missing = info.missing_required_inputs(&bindings);
        assert_eq!(
            missing,
            vec!["privacy_officer".to_string(), "effective_date".to_string()]
        );

        bindings.insert("privacy_officer".to_string(), "J. Rivers".to_string());
        bindings.insert("effective_date".to_string(), "2026-01-01".to_string());
        assert!(info.missing_required_inputs(&bindings).is_empty());
    }

    #[test]
    fn test_instantiate_carries_defaults() {
        let template = instantiate("data_retention").unwrap();
        assert_eq!(template.id, "data_retention");
        assert_eq!(
            template.defaults.get("retention_years").map(String::as_str),
            Some("6")
        );
        assert!(template.body.contains("{{retention_years}}"));
    }

    #[test]
    fn test_template_names_are_unique() {
        let templates = list_templates();
        let mut names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), templates.len());
    }
}
