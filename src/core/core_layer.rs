// The core module contains the platform-agnostic logic.
// Each concern gets its own submodule.

#[path = "access/access_policy.rs"]
pub mod access;

#[path = "alerts/mod.rs"]
pub mod alerts;

#[path = "booru/mod.rs"]
pub mod booru;

#[path = "commands/mod.rs"]
pub mod commands;

#[path = "config/bot_config.rs"]
pub mod config;
