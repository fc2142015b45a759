use async_trait::async_trait;
use tracing::info;

use crate::alert::{AlertError, AlertSink, CriticalAlert};

/// Sink that writes alerts to the log instead of a mail transport.
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl LogAlertSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn send(&self, alert: &CriticalAlert) -> Result<(), AlertError> {
        info!(
            recipients = %alert.recipients.join(","),
            subject = %alert.subject,
            body = %alert.body,
            "alert dispatched"
        );
        Ok(())
    }
}
