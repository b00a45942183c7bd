pub mod command_models;
pub mod command_sync;

pub use command_models::{
    ChoiceValue, CommandDefinition, CommandOption, OptionChoice, OptionKind, RemoteCommand,
};
pub use command_sync::{plan_sync, SyncAction};
