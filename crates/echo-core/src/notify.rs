//! # Notification
//!
//! Formats the e-mail and in-app alert lines sent when an analysis is
//! persisted. Nothing is delivered; the receipt is the whole effect.

use crate::config::NotifierConfig;
use crate::system::StageKind;
use crate::types::preview;
use serde::{Deserialize, Serialize};

/// Summary line of every successful notification.
pub const NOTIFICATION_SUCCESS: &str = "NOTIFICATION SUCCESS: Email and in-app alert dispatched.";

/// The two status lines produced by a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub recipient: String,
    pub email_status: String,
    pub alert_status: String,
    pub message: String,
}

/// Notification capability (stage 4, second half). Always succeeds.
pub trait Notifier {
    fn notify(&self, recipient: &str, policy_text: &str) -> NotificationReceipt;
}

/// Formats alerts; quotes a bounded preview of the policy text.
#[derive(Debug, Clone, Default)]
pub struct AlertNotifier {
    config: NotifierConfig,
}

impl AlertNotifier {
    #[must_use]
    pub fn new(config: NotifierConfig) -> Self {
        Self { config }
    }
}

impl Notifier for AlertNotifier {
    fn notify(&self, recipient: &str, policy_text: &str) -> NotificationReceipt {
        let recipient = if recipient.trim().is_empty() {
            self.config.fallback_recipient.as_str()
        } else {
            recipient
        };
        let quoted = preview(policy_text, self.config.preview_chars);

        let email_status = format!(
            "EMAIL SENT to {}. Subject: Policy Analysis Complete for '{}...'",
            recipient, quoted
        );
        let alert_status = format!(
            "ALERT GENERATED: Policy '{}...' analysis is ready for review.",
            quoted
        );

        tracing::info!(tool = StageKind::Persistence.secondary_tool_name(), "{}", email_status);
        tracing::info!(tool = StageKind::Persistence.secondary_tool_name(), "{}", alert_status);

        NotificationReceipt {
            recipient: recipient.to_string(),
            email_status,
            alert_status,
            message: NOTIFICATION_SUCCESS.to_string(),
        }
    }
}
