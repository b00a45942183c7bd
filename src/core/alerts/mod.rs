pub mod alert_service;

pub use alert_service::{AlertError, AlertSender, AlertService, EmailAlert};
