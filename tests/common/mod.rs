//! In-memory message channel shared by the integration tests

use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use teloxide::types::ChatId;

use artholst_bot::channel::{MessageChannel, OutboundMessage};

/// Records every delivered message; chats marked unreachable fail like a missing chat would
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<OutboundMessage>>,
    attempts: Mutex<Vec<ChatId>>,
    unreachable: Mutex<Vec<ChatId>>,
}

#[allow(dead_code)]
impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_unreachable(&self, chat_id: ChatId) {
        self.unreachable.lock().unwrap().push(chat_id);
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: ChatId) -> Vec<OutboundMessage> {
        self.sent()
            .into_iter()
            .filter(|message| message.recipient == chat_id)
            .collect()
    }

    pub fn attempts_to(&self, chat_id: ChatId) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|recipient| **recipient == chat_id)
            .count()
    }
}

#[async_trait]
impl MessageChannel for RecordingChannel {
    async fn send(&self, message: OutboundMessage) -> anyhow::Result<()> {
        self.attempts.lock().unwrap().push(message.recipient);
        if self.unreachable.lock().unwrap().contains(&message.recipient) {
            bail!("Bad Request: chat not found");
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
