//! Command Handler module for the static bot commands

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, UserId};
use teloxide::utils::command::BotCommands;
use tracing::debug;

use crate::bot_config::BotConfig;
use crate::channel::MessageChannel;
use crate::localization::t_lang;
use crate::relay::OrderRelay;

use super::ui_builder::{contact_message, echo_prompt, help_message, id_message, welcome_message};

/// Commands shown in the Telegram command menu
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    Start,
    Help,
    Contact,
    Id,
}

impl Command {
    pub const ALL: [Command; 4] = [Command::Start, Command::Help, Command::Contact, Command::Id];

    /// Command name without the leading slash
    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Contact => "contact",
            Command::Id => "id",
        }
    }
}

/// Command list with descriptions in the given language
pub fn command_menu(language_code: Option<&str>) -> Vec<BotCommand> {
    Command::ALL
        .iter()
        .map(|command| {
            let description = t_lang(&format!("command-{}", command.name()), language_code);
            BotCommand::new(command.name(), description)
        })
        .collect()
}

fn language_code(msg: &Message) -> Option<&str> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.as_ref())
        .map(|s| s.as_str())
}

/// Answer one command through any message channel
pub async fn answer_command<C: MessageChannel + ?Sized>(
    channel: &C,
    config: &BotConfig,
    chat_id: ChatId,
    user_id: Option<UserId>,
    language_code: Option<&str>,
    command: Command,
) -> Result<()> {
    debug!(user_id = %chat_id, command = ?command, "Received command from user");

    let reply = match command {
        Command::Start => welcome_message(chat_id, config, language_code),
        Command::Help => help_message(chat_id, config, language_code),
        Command::Contact => contact_message(chat_id, config, language_code),
        Command::Id => id_message(chat_id, user_id, language_code),
    };

    channel.send(reply).await
}

pub async fn command_handler<C: MessageChannel>(
    relay: Arc<OrderRelay<C>>,
    msg: Message,
    cmd: Command,
) -> Result<()> {
    let user_id = msg.from.as_ref().map(|user| user.id);
    answer_command(
        relay.channel(),
        relay.config(),
        msg.chat.id,
        user_id,
        language_code(&msg),
        cmd,
    )
    .await
}

/// Any other message: point the user at the storefront
pub async fn echo_handler<C: MessageChannel>(relay: Arc<OrderRelay<C>>, msg: Message) -> Result<()> {
    debug!(user_id = %msg.chat.id, "Received message without command or order data");
    relay
        .channel()
        .send(echo_prompt(msg.chat.id, relay.config(), language_code(&msg)))
        .await
}
