// Discord layer - slash commands, gateway events and command registration.

#[path = "bot_data.rs"]
pub mod data;

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "events/event_catalog.rs"]
pub mod events;

#[path = "registration/command_registration.rs"]
pub mod registration;

#[path = "gateway_handler.rs"]
pub mod gateway;

// Re-export shared types for convenience
pub use data::{Data, Error};
