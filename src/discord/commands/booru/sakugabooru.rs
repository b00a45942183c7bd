use async_trait::async_trait;
use serenity::all::{CommandInteraction, Context};

use super::booru_reply::{failure_text, post_embed, reply_text, reply_with_post};
use super::SlashCommand;
use crate::core::commands::{CommandDefinition, CommandOption, OptionKind};
use crate::discord::{Data, Error};

const TAGS_OPTION: &str = "tags";

/// Tag search: replies with the first matching post.
pub struct Sakugabooru;

#[async_trait]
impl SlashCommand for Sakugabooru {
    fn definition(&self) -> CommandDefinition {
        CommandDefinition::new("sakugabooru", "search sakugabooru").option(
            CommandOption::new(OptionKind::String, TAGS_OPTION, "search tags").required(true),
        )
    }

    async fn run(
        &self,
        ctx: &Context,
        interaction: &CommandInteraction,
        data: &Data,
    ) -> Result<(), Error> {
        let tags = interaction
            .data
            .options
            .iter()
            .find(|option| option.name == TAGS_OPTION)
            .and_then(|option| option.value.as_str())
            .unwrap_or_default();

        interaction.defer(&ctx.http).await?;

        let post = match data.booru.search(tags).await {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!(tags, "sakugabooru search failed: {}", e);
                return reply_text(ctx, interaction, failure_text(&e)).await;
            }
        };

        let embed = post_embed(tags, &post, post.file_url.as_deref());
        let file_name = attachment_name(post.id, post.file_extension());
        reply_with_post(ctx, interaction, data, embed, &post, &file_name, tags).await
    }
}

fn attachment_name(post_id: u64, extension: Option<&str>) -> String {
    format!("sakugabooru_{}.{}", post_id, extension.unwrap_or("mp4"))
}
