// Best-effort error e-mails.
//
// Nothing in here is allowed to fail the caller: alerts are sent from error
// paths, so a broken alert pipeline is only ever logged.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

const SUBJECT_PREFIX: &str = "🚨 Lum Bot Error: ";
const SUBJECT_MESSAGE_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Alert request failed: {0}")]
    Http(String),
    #[error("Alert rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// What went wrong, captured at the moment it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAlert {
    pub occurred_at: DateTime<Utc>,
    pub context: Option<String>,
    pub message: String,
    pub details: String,
}

impl ErrorAlert {
    pub fn from_error(error: &(dyn std::error::Error + 'static), context: Option<&str>) -> Self {
        Self::at(Utc::now(), error, context)
    }

    pub fn at(
        occurred_at: DateTime<Utc>,
        error: &(dyn std::error::Error + 'static),
        context: Option<&str>,
    ) -> Self {
        let mut details = vec![error.to_string()];
        let mut source = error.source();
        while let Some(cause) = source {
            details.push(format!("caused by: {}", cause));
            source = cause.source();
        }

        Self {
            occurred_at,
            context: context.map(str::to_string),
            message: error.to_string(),
            details: details.join("\n"),
        }
    }

    pub fn to_email(&self) -> EmailAlert {
        let short: String = self.message.chars().take(SUBJECT_MESSAGE_CHARS).collect();

        let html = format!(
            "<h2>Bot Error Alert</h2>\n\
             <p><strong>Time:</strong> {}</p>\n\
             <p><strong>Context:</strong> {}</p>\n\
             <p><strong>Error:</strong> {}</p>\n\
             <pre>{}</pre>\n",
            self.occurred_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            escape_html(self.context.as_deref().unwrap_or("Unknown")),
            escape_html(&self.message),
            escape_html(&self.details),
        );

        EmailAlert {
            subject: format!("{}{}", SUBJECT_PREFIX, short),
            html,
        }
    }
}

/// Rendered e-mail, ready for an `AlertSender`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAlert {
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait AlertSender: Send + Sync {
    async fn send(&self, alert: &EmailAlert) -> Result<(), AlertError>;
}

pub struct AlertService<S: AlertSender> {
    sender: Option<S>,
}

impl<S: AlertSender> AlertService<S> {
    pub fn new(sender: Option<S>) -> Self {
        Self { sender }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Report an error by e-mail. Never fails.
    pub async fn notify(
        &self,
        error: &(dyn std::error::Error + Send + Sync + 'static),
        context: Option<&str>,
    ) {
        self.notify_alert(ErrorAlert::from_error(error, context)).await;
    }

    pub async fn notify_alert(&self, alert: ErrorAlert) {
        let Some(sender) = &self.sender else {
            tracing::error!("Missing RESEND_API_KEY or ALERT_DESTINATION, skipping email");
            return;
        };

        let email = alert.to_email();
        match sender.send(&email).await {
            Ok(()) => tracing::info!(subject = %email.subject, "Error alert sent"),
            Err(e) => tracing::error!("Failed to send error alert: {}", e),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fmt;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "command <lum> failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "connection reset")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    impl std::error::Error for Inner {}

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<EmailAlert>>,
        fail: bool,
    }

    #[async_trait]
    impl AlertSender for RecordingSender {
        async fn send(&self, alert: &EmailAlert) -> Result<(), AlertError> {
            self.sent.lock().unwrap().push(alert.clone());
            if self.fail {
                return Err(AlertError::Rejected {
                    status: 422,
                    body: "bad sender".to_string(),
                });
            }
            Ok(())
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_alert_collects_source_chain() {
        let alert = ErrorAlert::at(fixed_time(), &Outer(Inner), Some("event:ready"));

        assert_eq!(alert.message, "command <lum> failed");
        assert_eq!(
            alert.details,
            "command <lum> failed\ncaused by: connection reset"
        );
        assert_eq!(alert.context.as_deref(), Some("event:ready"));
    }

    #[test]
    fn test_email_body_is_escaped() {
        let email = ErrorAlert::at(fixed_time(), &Outer(Inner), None).to_email();

        assert_eq!(email.subject, "🚨 Lum Bot Error: command <lum> failed");
        assert!(email.html.contains("<h2>Bot Error Alert</h2>"));
        assert!(email.html.contains("2024-03-01T12:30:00.000Z"));
        assert!(email.html.contains("<strong>Context:</strong> Unknown"));
        assert!(email.html.contains("command &lt;lum&gt; failed"));
        assert!(!email.html.contains("<lum>"));
    }

    #[test]
    fn test_subject_is_truncated_by_chars() {
        let alert = ErrorAlert {
            occurred_at: fixed_time(),
            context: None,
            message: "é".repeat(80),
            details: String::new(),
        };

        let subject = alert.to_email().subject;
        let message_part = subject.strip_prefix(SUBJECT_PREFIX).unwrap();
        assert_eq!(message_part.chars().count(), 50);
    }

    #[tokio::test]
    async fn test_notify_sends_email() {
        let service = AlertService::new(Some(RecordingSender::default()));
        service.notify(&Inner, Some("startup")).await;

        let sent = service.sender.as_ref().unwrap().sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "🚨 Lum Bot Error: connection reset");
        assert!(sent[0].html.contains("startup"));
    }

    #[tokio::test]
    async fn test_notify_swallows_failures() {
        let service = AlertService::new(Some(RecordingSender {
            fail: true,
            ..Default::default()
        }));
        service.notify(&Inner, None).await;

        assert_eq!(service.sender.as_ref().unwrap().sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_notify_without_sender_is_a_no_op() {
        let service: AlertService<RecordingSender> = AlertService::new(None);
        assert!(!service.is_enabled());
        service.notify(&Inner, None).await;
    }
}
