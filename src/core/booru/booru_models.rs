use serde::{Deserialize, Serialize};

/// One post as returned by a Moebooru-style `post.json` endpoint.
/// Only the fields the bot looks at are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub preview_width: Option<u32>,
    #[serde(default)]
    pub preview_height: Option<u32>,
    #[serde(default)]
    pub sample_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
}

impl Post {
    /// Extension of the full-size media file, e.g. `mp4`.
    pub fn file_extension(&self) -> Option<&str> {
        let url = self.file_url.as_deref()?;
        let path = url.split(['?', '#']).next()?;
        let file = path.rsplit('/').next()?;
        let (_, ext) = file.rsplit_once('.')?;
        (!ext.is_empty()).then_some(ext)
    }
}
