#[path = "resend_client.rs"]
pub mod resend_client;

pub use resend_client::ResendClient;
