// Runtime configuration, read from environment variables.
//
// `main` calls `dotenv` first, so everything here can also live in a `.env`
// file next to the binary.

use thiserror::Error;

pub const DEFAULT_ALERT_SENDER: &str = "Lum Bot <alerts@burketaylor.com>";
pub const DEFAULT_BOORU_BASE_URL: &str = "https://www.sakugabooru.com";
pub const DEFAULT_BOORU_TAGS: &str = "urusei_yatsura";
/// The booru API doesn't expose a page count, so this is hand-picked.
pub const DEFAULT_BOORU_MAX_PAGE: u32 = 35;
/// Default page size of the site.
pub const DEFAULT_BOORU_PAGE_SIZE: u32 = 18;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Credentials for the e-mail alert service. Only present when both the key
/// and the destination are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertConfig {
    pub api_key: String,
    pub destination: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooruConfig {
    pub base_url: String,
    pub tags: String,
    pub max_page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub discord_token: String,
    pub client_id: Option<u64>,
    pub guild_id: Option<u64>,
    pub dev_id: Option<u64>,
    pub alerts: Option<AlertConfig>,
    pub booru: BooruConfig,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let alerts = match (get("RESEND_API_KEY"), get("ALERT_DESTINATION")) {
            (Some(api_key), Some(destination)) => Some(AlertConfig {
                api_key,
                destination,
                sender: get("ALERT_SENDER").unwrap_or_else(|| DEFAULT_ALERT_SENDER.to_string()),
            }),
            _ => None,
        };

        let booru = BooruConfig {
            base_url: get("BOORU_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BOORU_BASE_URL.to_string()),
            tags: get("BOORU_TAGS").unwrap_or_else(|| DEFAULT_BOORU_TAGS.to_string()),
            max_page: parse_positive("BOORU_MAX_PAGE", get("BOORU_MAX_PAGE"))?
                .unwrap_or(DEFAULT_BOORU_MAX_PAGE),
            page_size: parse_positive("BOORU_PAGE_SIZE", get("BOORU_PAGE_SIZE"))?
                .unwrap_or(DEFAULT_BOORU_PAGE_SIZE),
        };

        Ok(Self {
            discord_token,
            client_id: parse_id("CLIENT_ID", get("CLIENT_ID"))?,
            guild_id: parse_id("GUILD_ID", get("GUILD_ID"))?,
            dev_id: parse_id("DEV_ID", get("DEV_ID"))?,
            alerts,
            booru,
        })
    }
}

/// Discord snowflakes are non-zero u64s.
fn parse_id(key: &'static str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    match value {
        None => Ok(None),
        Some(raw) => match raw.parse::<u64>() {
            Ok(id) if id != 0 => Ok(Some(id)),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
    }
}

fn parse_positive(key: &'static str, value: Option<String>) -> Result<Option<u32>, ConfigError> {
    match value {
        None => Ok(None),
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_token_is_required() {
        assert_eq!(load(&[]), Err(ConfigError::Missing("DISCORD_TOKEN")));
        assert_eq!(
            load(&[("DISCORD_TOKEN", "   ")]),
            Err(ConfigError::Missing("DISCORD_TOKEN"))
        );
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DISCORD_TOKEN", "abc")]).unwrap();

        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.client_id, None);
        assert_eq!(config.guild_id, None);
        assert_eq!(config.dev_id, None);
        assert!(config.alerts.is_none());
        assert_eq!(config.booru.base_url, DEFAULT_BOORU_BASE_URL);
        assert_eq!(config.booru.tags, DEFAULT_BOORU_TAGS);
        assert_eq!(config.booru.max_page, 35);
        assert_eq!(config.booru.page_size, 18);
    }

    #[test]
    fn test_ids_are_parsed() {
        let config = load(&[
            ("DISCORD_TOKEN", "abc"),
            ("CLIENT_ID", "111"),
            ("GUILD_ID", "222"),
            ("DEV_ID", "333"),
        ])
        .unwrap();

        assert_eq!(config.client_id, Some(111));
        assert_eq!(config.guild_id, Some(222));
        assert_eq!(config.dev_id, Some(333));
    }

    #[test]
    fn test_bad_id_is_rejected() {
        let err = load(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", "not-a-number")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "GUILD_ID",
                value: "not-a-number".to_string()
            }
        );

        // Zero is never a valid snowflake
        assert!(load(&[("DISCORD_TOKEN", "abc"), ("DEV_ID", "0")]).is_err());
    }

    #[test]
    fn test_alerts_need_key_and_destination() {
        let only_key = load(&[("DISCORD_TOKEN", "abc"), ("RESEND_API_KEY", "re_123")]).unwrap();
        assert!(only_key.alerts.is_none());

        let both = load(&[
            ("DISCORD_TOKEN", "abc"),
            ("RESEND_API_KEY", "re_123"),
            ("ALERT_DESTINATION", "me@example.com"),
        ])
        .unwrap();
        let alerts = both.alerts.unwrap();
        assert_eq!(alerts.api_key, "re_123");
        assert_eq!(alerts.destination, "me@example.com");
        assert_eq!(alerts.sender, DEFAULT_ALERT_SENDER);
    }

    #[test]
    fn test_booru_overrides() {
        let config = load(&[
            ("DISCORD_TOKEN", "abc"),
            ("BOORU_BASE_URL", "https://booru.example.com/"),
            ("BOORU_TAGS", "lum"),
            ("BOORU_MAX_PAGE", "3"),
            ("BOORU_PAGE_SIZE", "40"),
        ])
        .unwrap();

        assert_eq!(config.booru.base_url, "https://booru.example.com");
        assert_eq!(config.booru.tags, "lum");
        assert_eq!(config.booru.max_page, 3);
        assert_eq!(config.booru.page_size, 40);

        assert!(load(&[("DISCORD_TOKEN", "abc"), ("BOORU_MAX_PAGE", "0")]).is_err());
    }
}
