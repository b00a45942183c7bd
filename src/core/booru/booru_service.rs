// Picking posts from a booru. The HTTP side lives in `infra/booru`.

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

use super::booru_models::Post;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BooruError {
    #[error("Booru request failed: {0}")]
    Http(String),
    #[error("Booru returned status {0}")]
    Status(u16),
    #[error("Could not decode booru response: {0}")]
    Decode(String),
    #[error("No posts found")]
    NoPosts,
    #[error("No tags given")]
    EmptyQuery,
}

/// Anything that can list posts for a tag query, one page at a time.
#[async_trait]
pub trait BooruClient: Send + Sync {
    async fn fetch_posts(&self, tags: &str, page: u32) -> Result<Vec<Post>, BooruError>;

    /// Size in bytes of the file at `url`, when the server reports one.
    async fn media_size(&self, url: &str) -> Result<Option<u64>, BooruError>;
}

pub struct BooruService<C: BooruClient> {
    client: C,
    tags: String,
    max_page: u32,
    page_size: u32,
}

impl<C: BooruClient> BooruService<C> {
    pub fn new(client: C, tags: impl Into<String>, max_page: u32, page_size: u32) -> Self {
        Self {
            client,
            tags: tags.into(),
            max_page: max_page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    /// A random post for the configured tags.
    pub async fn random_post(&self) -> Result<Post, BooruError> {
        // ThreadRng isn't Send, so roll before the await
        let (page, index) = {
            let mut rng = rand::thread_rng();
            self.roll(&mut rng)
        };
        self.post_at(page, index).await
    }

    /// Pick a page in `1..=max_page` and a slot in `0..page_size`.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> (u32, usize) {
        let page = rng.gen_range(1..=self.max_page);
        let index = rng.gen_range(0..self.page_size) as usize;
        (page, index)
    }

    /// Fetch `page` and return the post at `index`, wrapping around short pages.
    pub async fn post_at(&self, page: u32, index: usize) -> Result<Post, BooruError> {
        tracing::debug!(tags = %self.tags, page, index, "Fetching booru page");
        let mut posts = self.client.fetch_posts(&self.tags, page).await?;

        if posts.is_empty() {
            return Err(BooruError::NoPosts);
        }

        let slot = index % posts.len();
        Ok(posts.swap_remove(slot))
    }

    /// Whether the media at `url` is small enough to upload. Sizes the server
    /// won't report are attempted anyway.
    pub async fn media_fits(&self, url: &str, max_bytes: u64) -> bool {
        match self.client.media_size(url).await {
            Ok(Some(size)) => size <= max_bytes,
            Ok(None) => true,
            Err(e) => {
                tracing::debug!(url, "Could not size booru media: {}", e);
                true
            }
        }
    }

    /// First post matching a user-supplied tag query.
    pub async fn search(&self, tags: &str) -> Result<Post, BooruError> {
        let tags = tags.split_whitespace().collect::<Vec<_>>().join(" ");
        if tags.is_empty() {
            return Err(BooruError::EmptyQuery);
        }

        tracing::debug!(tags = %tags, "Searching booru");
        self.client
            .fetch_posts(&tags, 1)
            .await?
            .into_iter()
            .next()
            .ok_or(BooruError::NoPosts)
    }
}
