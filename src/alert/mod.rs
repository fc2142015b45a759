//! Alert delivery interface.
//!
//! Delivery transport is external; the scheduler only sees [`AlertSink`].
//! [`LogAlertSink`] stands in for a real transport in the demo binary.

use async_trait::async_trait;
use thiserror::Error;

pub mod log;

pub use self::log::LogAlertSink;

#[cfg(test)]
use mockall::automock;

/// A fire-and-forget critical-status notification. No delivery receipt is
/// tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalAlert {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl CriticalAlert {
    /// Build an alert addressed to the admin plus, when known, the patient.
    pub fn new(admin_email: &str, patient_email: Option<&str>, body: String) -> Self {
        let mut recipients = vec![admin_email.to_string()];
        if let Some(email) = patient_email {
            recipients.push(email.to_string());
        }
        Self {
            recipients,
            subject: "critical patient status".to_string(),
            body,
        }
    }
}

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert delivery failed: {0}")]
    Delivery(String),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, alert: &CriticalAlert) -> Result<(), AlertError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_addresses_admin_and_patient() {
        let alert = CriticalAlert::new(
            "admin@clinic.example",
            Some("patient@example.com"),
            "patient Orlova Maria pulse 125".to_string(),
        );
        assert_eq!(
            alert.recipients,
            ["admin@clinic.example", "patient@example.com"]
        );
        assert_eq!(alert.subject, "critical patient status");
    }

    #[test]
    fn alert_without_patient_email_goes_to_admin_only() {
        let alert = CriticalAlert::new("admin@clinic.example", None, "body".to_string());
        assert_eq!(alert.recipients, ["admin@clinic.example"]);
    }
}
