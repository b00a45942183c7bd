use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, CommandType, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, Interaction,
};

use super::{BotEvent, BotEventHandler};
use crate::core::access::{AccessDenied, AccessPolicy};
use crate::discord::commands::{CatalogEntry, CommandCatalog};
use crate::discord::{Data, Error};

const GUILD_ONLY_TEXT: &str = "This command only works in servers.";

/// Routes chat-input commands to their catalog entry.
pub struct HandleCommands;

/// Where an incoming command ends up.
pub enum Route<'a> {
    Unknown,
    GuildOnly,
    Denied(AccessDenied),
    Run(&'a CatalogEntry),
}

pub fn route<'a>(
    catalog: &'a CommandCatalog,
    access: &AccessPolicy,
    name: &str,
    user_id: u64,
    guild_id: Option<u64>,
) -> Route<'a> {
    let Some(entry) = catalog.find(name) else {
        return Route::Unknown;
    };

    let Some(guild_id) = guild_id else {
        return Route::GuildOnly;
    };

    match access.check(entry.definition(), user_id, guild_id) {
        Ok(()) => Route::Run(entry),
        Err(denied) => Route::Denied(denied),
    }
}

async fn reply_ephemeral(
    ctx: &Context,
    interaction: &CommandInteraction,
    text: &str,
) -> Result<(), Error> {
    let message = CreateInteractionResponseMessage::new()
        .content(text)
        .ephemeral(true);
    interaction
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

#[async_trait]
impl BotEventHandler for HandleCommands {
    fn name(&self) -> &'static str {
        "handle_commands"
    }

    async fn handle(&self, ctx: &Context, event: &BotEvent, data: &Data) -> Result<(), Error> {
        let BotEvent::InteractionCreate(Interaction::Command(interaction)) = event else {
            return Ok(());
        };
        if interaction.data.kind != CommandType::ChatInput {
            return Ok(());
        }

        let name = interaction.data.name.as_str();
        let route = route(
            &data.commands,
            &data.access,
            name,
            interaction.user.id.get(),
            interaction.guild_id.map(|id| id.get()),
        );

        match route {
            Route::Unknown => {
                tracing::warn!(command = name, "Command not found");
                Ok(())
            }
            Route::GuildOnly => reply_ephemeral(ctx, interaction, GUILD_ONLY_TEXT).await,
            Route::Denied(denied) => {
                tracing::info!(
                    command = name,
                    user = %interaction.user.name,
                    "Command refused: {}",
                    denied
                );
                reply_ephemeral(ctx, interaction, &denied.to_string()).await
            }
            Route::Run(entry) => {
                tracing::info!(
                    command = name,
                    category = entry.category(),
                    user = %interaction.user.name,
                    "Running command"
                );
                entry.command().run(ctx, interaction, data).await
            }
        }
    }
}
