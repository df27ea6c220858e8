//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `command_handler`: Handles /start, /help, /contact, /id and plain messages
//! - `webapp_handler`: Handles order submissions from the storefront Mini App
//! - `ui_builder`: Creates keyboards and formats messages

pub mod command_handler;
pub mod ui_builder;
pub mod webapp_handler;

use std::sync::Arc;

use anyhow::Result;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{MenuButton, WebAppInfo};

use crate::channel::{MessageChannel, TelegramChannel};
use crate::localization::t_lang;
use crate::relay::OrderRelay;

// Re-export main handler functions for use in main.rs
pub use command_handler::{command_handler, command_menu, echo_handler, Command};
pub use webapp_handler::webapp_data_handler;

/// The relay as shared with every handler
pub type SharedRelay = Arc<OrderRelay<TelegramChannel>>;

/// Languages that get their own command menu besides the default one
const COMMAND_MENU_LANGUAGES: &[&str] = &["en"];

/// Dispatcher tree: web app data first, then commands, then everything else.
///
/// Handlers expect an `Arc<OrderRelay<C>>` in the dependencies.
pub fn schema<C: MessageChannel + 'static>() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .branch(
            dptree::filter_map(|msg: Message| msg.web_app_data().cloned())
                .endpoint(webapp_data_handler::<C>),
        )
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(command_handler::<C>),
        )
        .branch(dptree::endpoint(echo_handler::<C>))
}

/// Register the command menus and the storefront menu button
pub async fn configure_bot(bot: &Bot, relay: &SharedRelay) -> Result<()> {
    bot.set_my_commands(command_menu(None)).await?;
    for language in COMMAND_MENU_LANGUAGES {
        bot.set_my_commands(command_menu(Some(language)))
            .language_code(*language)
            .await?;
    }

    let config = relay.config();
    bot.set_chat_menu_button()
        .menu_button(MenuButton::WebApp {
            text: t_lang("menu-button", None),
            web_app: WebAppInfo {
                url: config.webapp_url.clone(),
            },
        })
        .await?;

    Ok(())
}
