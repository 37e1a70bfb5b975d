//! Embedded template loader
//!
//! Loads the built-in policy templates from external files at compile
//! time, embedding them directly in the binary.

/// HIPAA Privacy Policy - loaded from templates/hipaa_privacy.html
const HIPAA_PRIVACY_TEMPLATE: &str = include_str!("../templates/hipaa_privacy.html");

/// HIPAA Security Policy - loaded from templates/hipaa_security.html
const HIPAA_SECURITY_TEMPLATE: &str = include_str!("../templates/hipaa_security.html");

/// Security Incident Response Plan - loaded from templates/incident_response.html
const INCIDENT_RESPONSE_TEMPLATE: &str = include_str!("../templates/incident_response.html");

/// Breach Notification Policy - loaded from templates/breach_notification.html
const BREACH_NOTIFICATION_TEMPLATE: &str = include_str!("../templates/breach_notification.html");

/// Data Retention and Destruction Policy - loaded from templates/data_retention.html
const DATA_RETENTION_TEMPLATE: &str = include_str!("../templates/data_retention.html");

/// Workforce Compliance Training Policy - loaded from templates/employee_training.html
const EMPLOYEE_TRAINING_TEMPLATE: &str = include_str!("../templates/employee_training.html");

/// Get an embedded template body by name
pub fn get_embedded_template(name: &str) -> Option<String> {
    match name {
        "hipaa_privacy" => Some(HIPAA_PRIVACY_TEMPLATE.to_string()),
        "hipaa_security" => Some(HIPAA_SECURITY_TEMPLATE.to_string()),
        "incident_response" => Some(INCIDENT_RESPONSE_TEMPLATE.to_string()),
        "breach_notification" => Some(BREACH_NOTIFICATION_TEMPLATE.to_string()),
        "data_retention" => Some(DATA_RETENTION_TEMPLATE.to_string()),
        "employee_training" => Some(EMPLOYEE_TRAINING_TEMPLATE.to_string()),
        _ => None,
    }
}
