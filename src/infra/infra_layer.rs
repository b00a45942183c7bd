// The infra module contains implementations of core traits.
// Each external API gets its own submodule.

#[path = "booru/mod.rs"]
pub mod booru;

#[path = "alerts/mod.rs"]
pub mod alerts;
