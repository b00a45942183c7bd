use async_trait::async_trait;
use serenity::all::{CommandInteraction, Context};

use super::booru_reply::{failure_text, post_embed, reply_text, reply_with_post};
use super::SlashCommand;
use crate::core::commands::CommandDefinition;
use crate::discord::{Data, Error};

/// Posts a random Lum clip from the configured booru tags.
pub struct Lum;

#[async_trait]
impl SlashCommand for Lum {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("lum", "want to see lum?")
    }

    async fn run(
        &self,
        ctx: &Context,
        interaction: &CommandInteraction,
        data: &Data,
    ) -> Result<(), Error> {
        interaction.defer(&ctx.http).await?;

        let post = match data.booru.random_post().await {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!(tags = data.booru.tags(), "lum lookup failed: {}", e);
                return reply_text(ctx, interaction, failure_text(&e)).await;
            }
        };

        let embed = post_embed("lum", &post, None);
        reply_with_post(ctx, interaction, data, embed, &post, "lum.mp4", "a lum video").await
    }
}
