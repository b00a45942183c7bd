// Shared state handed to every command and event handler.

use std::sync::Arc;

use serenity::gateway::ShardManager;
use serenity::prelude::TypeMapKey;

use crate::core::access::AccessPolicy;
use crate::core::alerts::AlertService;
use crate::core::booru::BooruService;
use crate::core::config::BotConfig;
use crate::discord::commands::CommandCatalog;
use crate::discord::registration::CommandScope;
use crate::infra::alerts::ResendClient;
use crate::infra::booru::SakugabooruClient;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub struct Data {
    pub config: BotConfig,
    pub access: AccessPolicy,
    pub commands: CommandCatalog,
    pub booru: Arc<BooruService<SakugabooruClient>>,
    pub alerts: Arc<AlertService<ResendClient>>,
}

impl Data {
    /// Where slash commands get registered: the configured guild, or globally.
    pub fn command_scope(&self) -> CommandScope {
        CommandScope::from_guild_id(self.config.guild_id)
    }
}

/// Lets `/ping` read heartbeat latency from inside a handler.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}
