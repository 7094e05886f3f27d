//! Fire-and-forget client for the contact inbox.
//!
//! The inbox is a separate service from the recipe store. Outcomes never
//! escalate past a [`ContactStatus`]: the caller shows the status line and
//! moves on.

use std::fmt;

use serde::Serialize;

/// Payload for the contact side channel.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub subject: String,
    pub email: String,
    pub message: String,
}

/// Progress of a contact submission, phrased exactly as the form shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    Sending,
    Sent,
    Rejected,
    Unreachable,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Sending => "Sending...",
            ContactStatus::Sent => "Message sent successfully!",
            ContactStatus::Rejected => "Failed to send the message.",
            ContactStatus::Unreachable => "Error: Unable to connect to the server.",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ContactClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// POST the message to the inbox. A non-success status becomes
    /// [`ContactStatus::Rejected`]; a transport failure becomes
    /// [`ContactStatus::Unreachable`]. Details land in the log only.
    pub async fn send(&self, message: &ContactMessage) -> ContactStatus {
        tracing::debug!(endpoint = %self.endpoint, subject = %message.subject, "sending contact message");
        match self.http.post(&self.endpoint).json(message).send().await {
            Ok(response) if response.status().is_success() => ContactStatus::Sent,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "contact inbox rejected the message");
                ContactStatus::Rejected
            }
            Err(e) => {
                tracing::warn!(error = %e, "contact inbox unreachable");
                ContactStatus::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines_match_the_form_copy() {
        assert_eq!(ContactStatus::Sending.as_str(), "Sending...");
        assert_eq!(ContactStatus::Sent.as_str(), "Message sent successfully!");
        assert_eq!(ContactStatus::Rejected.as_str(), "Failed to send the message.");
        assert_eq!(
            ContactStatus::Unreachable.as_str(),
            "Error: Unable to connect to the server."
        );
        assert_eq!(ContactStatus::Sent.to_string(), ContactStatus::Sent.as_str());
    }

    #[test]
    fn test_message_serializes_flat() {
        let message = ContactMessage {
            subject: "Hello".to_string(),
            email: "cook@example.com".to_string(),
            message: "Love the app".to_string(),
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["subject"], "Hello");
        assert_eq!(value["email"], "cook@example.com");
        assert_eq!(value["message"], "Love the app");
    }
}
