use async_trait::async_trait;
use serenity::all::Context;

use super::{BotEvent, BotEventHandler};
use crate::discord::registration::sync_commands;
use crate::discord::{Data, Error};

/// Pushes the local command catalog to Discord once the session is ready.
pub struct RegisterCommands;

#[async_trait]
impl BotEventHandler for RegisterCommands {
    fn name(&self) -> &'static str {
        "register_commands"
    }

    async fn handle(&self, ctx: &Context, event: &BotEvent, data: &Data) -> Result<(), Error> {
        if !matches!(event, BotEvent::Ready(_)) {
            return Ok(());
        }

        tracing::info!("Registering commands...");
        sync_commands(&ctx.http, data.command_scope(), &data.commands).await?;
        Ok(())
    }
}
