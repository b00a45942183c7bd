// Shared reply helpers for the booru commands.
//
// Both commands defer first (the booru can be slow), so every reply here is an
// edit of the deferred response.

use serenity::all::{
    CommandInteraction, Context, CreateAttachment, CreateEmbed, CreateEmbedAuthor,
    EditInteractionResponse,
};

use crate::core::booru::{BooruError, Post};
use crate::discord::{Data, Error};

const EMBED_COLOR: u32 = 0x66cdaa;
const AUTHOR_NAME: &str = "bt";
const AUTHOR_ICON_URL: &str =
    "https://y5w2vhen03.ufs.sh/f/fPOm9fGnm29kdV2iTG7oflIYyFOEqcSeUpgV96r0TBGnQ1Ak";
const AUTHOR_URL: &str = "https://github.com/burkemtaylor/lum-bot";
/// Discord caps embed titles at 256 characters.
const MAX_TITLE_CHARS: usize = 256;
/// Default upload limit for a bot in a guild without boosts.
const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// The text users see when a lookup goes wrong.
pub fn failure_text(err: &BooruError) -> &'static str {
    match err {
        BooruError::NoPosts => "No images found",
        BooruError::EmptyQuery => "Please provide at least one tag.",
        BooruError::Http(_) | BooruError::Status(_) | BooruError::Decode(_) => {
            "Failed to fetch image"
        }
    }
}

/// Embed for a post. `link` makes the title clickable.
pub fn post_embed(title: &str, post: &Post, link: Option<&str>) -> CreateEmbed {
    let title: String = title.chars().take(MAX_TITLE_CHARS).collect();

    let mut embed = CreateEmbed::new()
        .title(title)
        .author(
            CreateEmbedAuthor::new(AUTHOR_NAME)
                .icon_url(AUTHOR_ICON_URL)
                .url(AUTHOR_URL),
        )
        .color(EMBED_COLOR);

    if let Some(link) = link {
        embed = embed.url(link);
    }

    if let Some(preview) = &post.preview_url {
        embed = embed.thumbnail(preview);
    }

    embed
}

pub async fn reply_text(
    ctx: &Context,
    interaction: &CommandInteraction,
    text: &str,
) -> Result<(), Error> {
    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().content(text))
        .await?;
    Ok(())
}

/// Reply with the embed and the post's media attached as `file_name`.
///
/// When the media is over the upload limit or can't be downloaded or uploaded,
/// the embed is sent on its own with the file link in its description.
pub async fn reply_with_post(
    ctx: &Context,
    interaction: &CommandInteraction,
    data: &Data,
    embed: CreateEmbed,
    post: &Post,
    file_name: &str,
    file_description: &str,
) -> Result<(), Error> {
    if let Some(file_url) = &post.file_url {
        if data.booru.media_fits(file_url, MAX_UPLOAD_BYTES).await {
            match CreateAttachment::url(&ctx.http, file_url).await {
                Ok(mut attachment) => {
                    attachment.filename = file_name.to_string();
                    let attachment = attachment.description(file_description);
                    let response = EditInteractionResponse::new()
                        .embed(embed.clone())
                        .new_attachment(attachment);

                    match interaction.edit_response(&ctx.http, response).await {
                        Ok(_) => return Ok(()),
                        Err(e) => {
                            tracing::warn!(post = post.id, "Uploading booru media failed: {}", e)
                        }
                    }
                }
                Err(e) => tracing::warn!(post = post.id, "Downloading booru media failed: {}", e),
            }
        } else {
            tracing::info!(post = post.id, "Booru media over the upload limit, sending the link");
        }
    }

    let embed = match &post.file_url {
        Some(file_url) => embed.description(file_url),
        None => embed,
    };

    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: 321,
            file_url: Some("https://www.sakugabooru.com/data/abc.mp4".to_string()),
            preview_url: Some("https://www.sakugabooru.com/data/preview/abc.jpg".to_string()),
            preview_width: Some(150),
            preview_height: Some(84),
            ..Default::default()
        }
    }

    #[test]
    fn test_failure_text() {
        assert_eq!(failure_text(&BooruError::Status(500)), "Failed to fetch image");
        assert_eq!(
            failure_text(&BooruError::Http("timeout".to_string())),
            "Failed to fetch image"
        );
        assert_eq!(failure_text(&BooruError::NoPosts), "No images found");
        assert_eq!(
            failure_text(&BooruError::EmptyQuery),
            "Please provide at least one tag."
        );
    }

    #[test]
    fn test_post_embed_fields() {
        let embed = post_embed("lum", &sample_post(), None);
        let json = serde_json::to_string(&embed).unwrap();

        assert!(json.contains(r#""title":"lum""#));
        assert!(json.contains(r#""name":"bt""#));
        assert!(json.contains(AUTHOR_ICON_URL));
        assert!(json.contains(AUTHOR_URL));
        // 0x66cdaa
        assert!(json.contains("6737322"));
        assert!(json.contains("https://www.sakugabooru.com/data/preview/abc.jpg"));
    }

    #[test]
    fn test_post_embed_without_preview() {
        let post = Post {
            id: 1,
            ..Default::default()
        };
        let json = serde_json::to_string(&post_embed("lum", &post, None)).unwrap();
        assert!(!json.contains("preview"));
    }

    #[test]
    fn test_post_embed_link_and_long_title() {
        let title = "x".repeat(300);
        let embed = post_embed(&title, &sample_post(), Some("https://example.com/post"));
        let json = serde_json::to_string(&embed).unwrap();

        assert!(json.contains("https://example.com/post"));
        assert!(json.contains(&"x".repeat(256)));
        assert!(!json.contains(&"x".repeat(257)));
    }
}
