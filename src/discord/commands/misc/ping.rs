use std::time::Duration;

use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};

use super::SlashCommand;
use crate::core::commands::CommandDefinition;
use crate::discord::data::ShardManagerContainer;
use crate::discord::{Data, Error};

/// Replies with the gateway heartbeat latency.
pub struct Ping;

#[async_trait]
impl SlashCommand for Ping {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("ping", "ping the bot")
    }

    async fn run(
        &self,
        ctx: &Context,
        interaction: &CommandInteraction,
        _data: &Data,
    ) -> Result<(), Error> {
        let latency = shard_latency(ctx).await;
        let message = CreateInteractionResponseMessage::new().content(pong_message(latency));

        interaction
            .create_response(&ctx.http, CreateInteractionResponse::Message(message))
            .await?;

        Ok(())
    }
}

/// Last heartbeat round-trip of the shard this context belongs to.
async fn shard_latency(ctx: &Context) -> Option<Duration> {
    let type_map = ctx.data.read().await;
    let manager = type_map.get::<ShardManagerContainer>()?;
    let runners = manager.runners.lock().await;
    runners.get(&ctx.shard_id).and_then(|runner| runner.latency)
}

pub fn pong_message(latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("pong! {}ms", latency.as_millis()),
        // No heartbeat ACK yet right after connecting
        None => "pong! (latency not measured yet)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pong_message() {
        assert_eq!(pong_message(Some(Duration::from_millis(42))), "pong! 42ms");
        assert_eq!(pong_message(None), "pong! (latency not measured yet)");
    }

    #[test]
    fn test_definition() {
        let definition = Ping.definition();
        assert_eq!(definition.name, "ping");
        assert_eq!(definition.description, "ping the bot");
        assert!(definition.options.is_empty());
        assert!(!definition.dev_only && !definition.test_only && !definition.deleted);
    }
}
