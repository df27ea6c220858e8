//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, UserId, WebAppInfo};
use teloxide::utils::html;

// Import localization
use crate::localization::{t, t_args, t_args_lang, t_lang};

use crate::bot_config::BotConfig;
use crate::channel::{LinkButton, OutboundMessage};
use crate::order_model::{format_amount, OrderSubmission};
use crate::relay_errors::RelayError;

/// Turn link buttons into an inline keyboard, one button per row
pub fn link_keyboard(buttons: &[LinkButton]) -> InlineKeyboardMarkup {
    let rows = buttons
        .iter()
        .map(|button| {
            vec![match button {
                LinkButton::Url { text, url } => InlineKeyboardButton::url(text.clone(), url.clone()),
                LinkButton::WebApp { text, url } => {
                    InlineKeyboardButton::web_app(text.clone(), WebAppInfo { url: url.clone() })
                }
            }]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(rows)
}

/// Text the admin receives for an order.
///
/// The storefront's own summary is forwarded untouched; only when it is
/// missing is a short summary built from the id and the total.
pub fn admin_notification(order: &OrderSubmission) -> String {
    match &order.message {
        Some(message) => message.clone(),
        None => t_args(
            "admin-order-fallback",
            &[
                ("order_id", order.order_id.as_str()),
                ("total", format_amount(order.total).as_str()),
                ("prepayment", format_amount(order.prepayment()).as_str()),
            ],
        ),
    }
}

/// HTML confirmation for the customer, with manager and new-order buttons
pub fn order_confirmation(
    recipient: ChatId,
    order: &OrderSubmission,
    config: &BotConfig,
    language_code: Option<&str>,
) -> OutboundMessage {
    let text = t_args_lang(
        "order-confirmation",
        &[
            ("order_id", html::escape(&order.order_id).as_str()),
            ("total", format_amount(order.total).as_str()),
            ("prepayment", format_amount(order.prepayment()).as_str()),
            ("manager", config.manager_handle().as_str()),
        ],
        language_code,
    );

    OutboundMessage::html(recipient, text).with_buttons(vec![
        LinkButton::url(t_lang("button-send-photo", language_code), config.manager_url()),
        LinkButton::web_app(t_lang("button-new-order", language_code), config.webapp_url.clone()),
    ])
}

/// Plain-text reply telling the customer their order did not go through
pub fn relay_error_reply(
    recipient: ChatId,
    error: &RelayError,
    config: &BotConfig,
    language_code: Option<&str>,
) -> OutboundMessage {
    let manager = config.manager_handle();
    let text = match error {
        RelayError::MalformedPayload(_) => t_lang("error-malformed-payload", language_code),
        RelayError::DeliveryFailure(detail) => t_args_lang(
            "error-delivery-failure",
            &[("detail", detail.as_str()), ("manager", manager.as_str())],
            language_code,
        ),
        RelayError::UnknownFailure(_) => {
            t_args_lang("error-unknown", &[("manager", manager.as_str())], language_code)
        }
    };

    OutboundMessage::plain(recipient, text)
}

/// Readiness notice for the admin
pub fn startup_notice(config: &BotConfig) -> OutboundMessage {
    OutboundMessage::plain(config.admin_chat_id, t("startup-notice"))
}

pub fn welcome_message(recipient: ChatId, config: &BotConfig, language_code: Option<&str>) -> OutboundMessage {
    OutboundMessage::html(recipient, t_lang("welcome", language_code)).with_buttons(vec![
        LinkButton::web_app(t_lang("button-open-shop", language_code), config.webapp_url.clone()),
        LinkButton::url(t_lang("button-write-manager", language_code), config.manager_url()),
    ])
}

pub fn help_message(recipient: ChatId, config: &BotConfig, language_code: Option<&str>) -> OutboundMessage {
    let text = t_args_lang(
        "help",
        &[
            ("manager", html::escape(&config.manager_handle()).as_str()),
            ("instagram", html::escape(config.instagram_url.as_str()).as_str()),
        ],
        language_code,
    );
    OutboundMessage::html(recipient, text)
}

pub fn contact_message(recipient: ChatId, config: &BotConfig, language_code: Option<&str>) -> OutboundMessage {
    OutboundMessage::html(recipient, t_lang("contact", language_code)).with_buttons(vec![
        LinkButton::url(t_lang("button-manager-telegram", language_code), config.manager_url()),
        LinkButton::url(t_lang("button-instagram", language_code), config.instagram_url.clone()),
    ])
}

/// Chat and user ids, so an operator can look up the admin id to configure
pub fn id_message(recipient: ChatId, user_id: Option<UserId>, language_code: Option<&str>) -> OutboundMessage {
    let user_id = user_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    let text = t_args_lang(
        "your-id",
        &[("chat_id", recipient.to_string().as_str()), ("user_id", user_id.as_str())],
        language_code,
    );
    OutboundMessage::html(recipient, text)
}

pub fn echo_prompt(recipient: ChatId, config: &BotConfig, language_code: Option<&str>) -> OutboundMessage {
    OutboundMessage::plain(recipient, t_lang("echo-prompt", language_code)).with_buttons(vec![
        LinkButton::web_app(t_lang("button-open-shop", language_code), config.webapp_url.clone()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::TextFormat;
    use rust_decimal::Decimal;

    fn order(message: Option<&str>, order_id: &str, total: i64) -> OrderSubmission {
        OrderSubmission {
            order_id: order_id.to_string(),
            message: message.map(str::to_string),
            total: Decimal::from(total),
            contact: None,
            user: None,
            details: None,
        }
    }

    #[test]
    fn test_admin_notification_forwards_message_verbatim() {
        let text = "🎨 НОВЫЙ ЗАКАЗ #AH-1\n<b>not markup</b>";
        assert_eq!(admin_notification(&order(Some(text), "AH-1", 10)), text);
    }

    #[test]
    fn test_admin_notification_fallback_mentions_id_and_total() {
        let text = admin_notification(&order(None, "7", 80));
        assert!(text.contains('7'));
        assert!(text.contains("80.00"));
        assert!(text.contains("40.00"));
    }

    #[test]
    fn test_confirmation_escapes_order_id() {
        let config = BotConfig::default();
        let message = order_confirmation(ChatId(5), &order(None, "<i>x</i>", 10), &config, None);

        assert_eq!(message.format, TextFormat::Html);
        assert!(message.text.contains("&lt;i&gt;x&lt;/i&gt;"));
        assert!(!message.text.contains("<i>x</i>"));
    }

    #[test]
    fn test_confirmation_keyboard_links_manager_and_storefront() {
        let config = BotConfig::default();
        let message = order_confirmation(ChatId(5), &order(None, "1", 10), &config, Some("en"));

        assert!(matches!(&message.buttons[0], LinkButton::Url { url, .. } if *url == config.manager_url()));
        assert!(matches!(&message.buttons[1], LinkButton::WebApp { url, .. } if *url == config.webapp_url));
        assert_eq!(link_keyboard(&message.buttons).inline_keyboard.len(), 2);
    }

    #[test]
    fn test_error_replies_are_plain_text() {
        let config = BotConfig::default();
        let reply = relay_error_reply(
            ChatId(9),
            &RelayError::DeliveryFailure("chat not found".to_string()),
            &config,
            None,
        );
        assert_eq!(reply.format, TextFormat::Plain);
        assert!(reply.text.contains("chat not found"));
        assert!(reply.text.contains(&config.manager_handle()));

        let reply = relay_error_reply(ChatId(9), &RelayError::UnknownFailure("boom".to_string()), &config, None);
        assert!(reply.text.contains(&config.manager_handle()));
        assert!(!reply.text.contains("boom"));
    }

    #[test]
    fn test_help_escapes_configured_links() {
        let config = BotConfig {
            instagram_url: reqwest::Url::parse("https://instagram.com/shop?utm_source=bot&lang=ru").unwrap(),
            ..BotConfig::default()
        };
        let message = help_message(ChatId(3), &config, None);

        assert_eq!(message.format, TextFormat::Html);
        assert!(message.text.contains("utm_source=bot&amp;lang=ru"));
        assert!(!message.text.contains("bot&lang"));
    }

    #[test]
    fn test_id_message_shows_both_ids() {
        let message = id_message(ChatId(-1001), Some(UserId(77)), None);
        assert!(message.text.contains("-1001"));
        assert!(message.text.contains("77"));
    }
}
