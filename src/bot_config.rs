//! # Bot Configuration Module
//!
//! Settings the bot needs at process start. Every value has an environment
//! variable source and a hardcoded fallback, so the bot starts with the
//! defaults when nothing is configured.

use anyhow::{Context, Result};
use reqwest::Url;
use teloxide::types::ChatId;

// Fallback values used when the environment does not provide one
pub const DEFAULT_BOT_TOKEN: &str = "PASTE_YOUR_BOT_TOKEN_HERE";
pub const DEFAULT_WEBAPP_URL: &str = "https://example.com/index.html";
pub const DEFAULT_ADMIN_CHAT_ID: i64 = 123_456_789;
pub const DEFAULT_MANAGER_USERNAME: &str = "oformitszakaz";
pub const DEFAULT_INSTAGRAM_URL: &str = "https://instagram.com/artholst_belarus";

/// Configuration structure for the order relay bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Token issued by @BotFather
    pub bot_token: String,
    /// Address of the storefront Mini App (index.html)
    pub webapp_url: Url,
    /// Chat that receives order notifications
    pub admin_chat_id: ChatId,
    /// Manager's Telegram username, without the leading `@`
    pub manager_username: String,
    /// Storefront Instagram page shown by /contact
    pub instagram_url: Url,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: DEFAULT_BOT_TOKEN.to_string(),
            webapp_url: Url::parse(DEFAULT_WEBAPP_URL).expect("default webapp url is valid"),
            admin_chat_id: ChatId(DEFAULT_ADMIN_CHAT_ID),
            manager_username: DEFAULT_MANAGER_USERNAME.to_string(),
            instagram_url: Url::parse(DEFAULT_INSTAGRAM_URL).expect("default instagram url is valid"),
        }
    }
}

impl BotConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset or blank keys fall back to the defaults; a value that is present
    /// but cannot be parsed is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(token) = get("BOT_TOKEN").or_else(|| get("TELEGRAM_BOT_TOKEN")) {
            config.bot_token = token;
        }

        if let Some(url) = get("WEBAPP_URL") {
            config.webapp_url =
                Url::parse(&url).with_context(|| format!("WEBAPP_URL is not a valid URL: {url}"))?;
        }

        if let Some(id) = get("ADMIN_CHAT_ID") {
            let id: i64 = id
                .parse()
                .with_context(|| format!("ADMIN_CHAT_ID must be a numeric chat id, got {id}"))?;
            config.admin_chat_id = ChatId(id);
        }

        if let Some(username) = get("MANAGER_USERNAME") {
            config.manager_username = username.trim_start_matches('@').to_string();
        }

        if let Some(url) = get("INSTAGRAM_URL") {
            config.instagram_url = Url::parse(&url)
                .with_context(|| format!("INSTAGRAM_URL is not a valid URL: {url}"))?;
        }

        Ok(config)
    }

    /// Public link to the manager's chat
    pub fn manager_url(&self) -> Url {
        // Usernames are restricted to [A-Za-z0-9_], so this cannot fail for real handles
        Url::parse(&format!("https://t.me/{}", self.manager_username))
            .unwrap_or_else(|_| Url::parse("https://t.me/").expect("static url is valid"))
    }

    /// Manager handle as shown in message texts
    pub fn manager_handle(&self) -> String {
        format!("@{}", self.manager_username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = BotConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bot_token, DEFAULT_BOT_TOKEN);
        assert_eq!(config.admin_chat_id, ChatId(DEFAULT_ADMIN_CHAT_ID));
        assert_eq!(config.webapp_url.as_str(), DEFAULT_WEBAPP_URL);
        assert_eq!(config.manager_username, DEFAULT_MANAGER_USERNAME);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "123:abc"),
            ("ADMIN_CHAT_ID", "-100500"),
            ("WEBAPP_URL", "https://shop.example.org/app/"),
            ("MANAGER_USERNAME", "@someone"),
        ]))
        .unwrap();

        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.admin_chat_id, ChatId(-100500));
        assert_eq!(config.webapp_url.as_str(), "https://shop.example.org/app/");
        assert_eq!(config.manager_username, "someone");
        assert_eq!(config.manager_handle(), "@someone");
        assert_eq!(config.manager_url().as_str(), "https://t.me/someone");
    }

    #[test]
    fn test_legacy_token_variable_is_honoured() {
        let config =
            BotConfig::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "42:legacy")])).unwrap();
        assert_eq!(config.bot_token, "42:legacy");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = BotConfig::from_lookup(lookup_from(&[("ADMIN_CHAT_ID", "   ")])).unwrap();
        assert_eq!(config.admin_chat_id, ChatId(DEFAULT_ADMIN_CHAT_ID));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(BotConfig::from_lookup(lookup_from(&[("ADMIN_CHAT_ID", "not-a-number")])).is_err());
        assert!(BotConfig::from_lookup(lookup_from(&[("WEBAPP_URL", "not a url")])).is_err());
    }
}
