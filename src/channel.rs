//! Outbound message channel.
//!
//! The relay only ever talks to Telegram through [`MessageChannel`], so the
//! order flow can run against an in-memory channel in tests.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Url;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::ui_builder::link_keyboard;

/// How the receiving client should interpret the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// Sent without a parse mode; any markup in the text shows literally
    Plain,
    /// Telegram HTML subset
    Html,
}

/// Quick-action button attached below a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkButton {
    /// Opens an external link, e.g. `https://t.me/<manager>`
    Url { text: String, url: Url },
    /// Opens the storefront Mini App inside Telegram
    WebApp { text: String, url: Url },
}

impl LinkButton {
    pub fn url(text: impl Into<String>, url: Url) -> Self {
        LinkButton::Url { text: text.into(), url }
    }

    pub fn web_app(text: impl Into<String>, url: Url) -> Self {
        LinkButton::WebApp { text: text.into(), url }
    }

    pub fn text(&self) -> &str {
        match self {
            LinkButton::Url { text, .. } | LinkButton::WebApp { text, .. } => text,
        }
    }
}

/// One message ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: ChatId,
    pub text: String,
    pub format: TextFormat,
    /// One button per keyboard row
    pub buttons: Vec<LinkButton>,
}

impl OutboundMessage {
    pub fn plain(recipient: ChatId, text: impl Into<String>) -> Self {
        Self {
            recipient,
            text: text.into(),
            format: TextFormat::Plain,
            buttons: Vec::new(),
        }
    }

    pub fn html(recipient: ChatId, text: impl Into<String>) -> Self {
        Self {
            format: TextFormat::Html,
            ..Self::plain(recipient, text)
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<LinkButton>) -> Self {
        self.buttons = buttons;
        self
    }
}

/// Capability to push a message to any chat
#[async_trait]
pub trait MessageChannel: Send + Sync {
    /// Deliver one message; errors carry the transport's diagnostic text
    async fn send(&self, message: OutboundMessage) -> Result<()>;
}

/// [`MessageChannel`] backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramChannel {
    bot: Bot,
}

impl TelegramChannel {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl MessageChannel for TelegramChannel {
    async fn send(&self, message: OutboundMessage) -> Result<()> {
        let mut request = self.bot.send_message(message.recipient, message.text);

        if let TextFormat::Html = message.format {
            request = request.parse_mode(ParseMode::Html);
        }

        if !message.buttons.is_empty() {
            request = request.reply_markup(link_keyboard(&message.buttons));
        }

        request.await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_builders() {
        let plain = OutboundMessage::plain(ChatId(1), "<b>raw</b>");
        assert_eq!(plain.format, TextFormat::Plain);
        assert!(plain.buttons.is_empty());

        let url = Url::parse("https://t.me/manager").unwrap();
        let html = OutboundMessage::html(ChatId(2), "<b>bold</b>")
            .with_buttons(vec![LinkButton::url("Manager", url.clone())]);
        assert_eq!(html.format, TextFormat::Html);
        assert_eq!(html.recipient, ChatId(2));
        assert_eq!(html.buttons, vec![LinkButton::Url { text: "Manager".to_string(), url }]);
        assert_eq!(html.buttons[0].text(), "Manager");
    }
}
