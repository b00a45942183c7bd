use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
use reqwest::Client;

use crate::core::booru::{BooruClient, BooruError, Post};

/// Client for Moebooru-style `post.json` listings (Sakugabooru by default).
pub struct SakugabooruClient {
    client: Client,
    base_url: String,
}

impl SakugabooruClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BooruError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_static("LumBot/0.3"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BooruError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn posts_url(&self) -> String {
        format!("{}/post.json", self.base_url.trim_end_matches('/'))
    }

    fn parse_posts(body: &str) -> Result<Vec<Post>, BooruError> {
        serde_json::from_str(body).map_err(|e| BooruError::Decode(e.to_string()))
    }

    // Read the header directly, a HEAD response has no body to size.
    fn content_length(headers: &HeaderMap) -> Option<u64> {
        headers
            .get(CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()
    }
}

#[async_trait]
impl BooruClient for SakugabooruClient {
    async fn fetch_posts(&self, tags: &str, page: u32) -> Result<Vec<Post>, BooruError> {
        let page_param = page.to_string();
        let resp = self
            .client
            .get(self.posts_url())
            .query(&[("tags", tags), ("page", page_param.as_str())])
            .send()
            .await
            .map_err(|e| BooruError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, tags, page, "Booru returned an error status");
            return Err(BooruError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| BooruError::Http(e.to_string()))?;

        Self::parse_posts(&body)
    }

    async fn media_size(&self, url: &str) -> Result<Option<u64>, BooruError> {
        let resp = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| BooruError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BooruError::Status(status.as_u16()));
        }

        Ok(Self::content_length(resp.headers()))
    }
}
