//! Web app data handler for order submissions

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::WebAppData;
use tracing::debug;

use crate::channel::MessageChannel;
use crate::relay::{OrderRelay, Submitter};

impl From<&Message> for Submitter {
    fn from(msg: &Message) -> Self {
        let language_code = msg
            .from
            .as_ref()
            .and_then(|user| user.language_code.clone());

        Submitter::new(msg.chat.id).with_language(language_code)
    }
}

/// Relay an order the storefront submitted through `sendData`
pub async fn webapp_data_handler<C: MessageChannel>(
    relay: Arc<OrderRelay<C>>,
    msg: Message,
    data: WebAppData,
) -> Result<()> {
    debug!(user_id = %msg.chat.id, button_text = %data.button_text, "Received web app submission");

    let submitter = Submitter::from(&msg);
    // Failures are already reported to the customer and logged by the relay
    let _ = relay.handle_submission(&submitter, &data.data).await;

    Ok(())
}
