//! # Order Intake Relay
//!
//! Reads one storefront submission and produces exactly two outbound
//! messages: the order summary for the admin, then the confirmation for the
//! customer. The confirmation is only sent once the admin has the order, so
//! an order is never confirmed to a customer without the shop knowing about
//! it. Every failure ends in a single reply to the customer.

use rust_decimal::Decimal;
use teloxide::types::ChatId;
use tracing::{debug, error, info, warn};

use crate::bot::ui_builder::{admin_notification, order_confirmation, relay_error_reply, startup_notice};
use crate::bot_config::BotConfig;
use crate::channel::{MessageChannel, OutboundMessage};
use crate::order_model::OrderSubmission;
use crate::relay_errors::RelayError;

/// The customer a submission came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub chat_id: ChatId,
    pub language_code: Option<String>,
}

impl Submitter {
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            language_code: None,
        }
    }

    pub fn with_language(mut self, language_code: Option<String>) -> Self {
        self.language_code = language_code;
        self
    }
}

/// Summary of a successfully relayed order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReceipt {
    pub order_id: String,
    pub total: Decimal,
    pub prepayment: Decimal,
}

/// Relays storefront orders through a [`MessageChannel`]
pub struct OrderRelay<C> {
    channel: C,
    config: BotConfig,
}

impl<C: MessageChannel> OrderRelay<C> {
    pub fn new(channel: C, config: BotConfig) -> Self {
        Self { channel, config }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Relay one submission and report any failure back to the customer.
    ///
    /// The returned error has already been handled; it is only informative.
    pub async fn handle_submission(
        &self,
        submitter: &Submitter,
        payload: &str,
    ) -> Result<RelayReceipt, RelayError> {
        let result = self.relay(submitter, payload).await;

        match &result {
            Ok(receipt) => {
                info!(
                    user_id = %submitter.chat_id,
                    order_id = %receipt.order_id,
                    total = %receipt.total,
                    "Order relayed to admin and confirmed to customer"
                );
            }
            Err(e) => {
                error!(
                    user_id = %submitter.chat_id,
                    error_kind = e.kind(),
                    error = %e,
                    "Order submission failed"
                );
                self.reply_with_error(submitter, e).await;
            }
        }

        result
    }

    /// Decode, notify the admin, then confirm to the customer.
    ///
    /// Sends nothing to the customer on failure; see [`Self::handle_submission`].
    pub async fn relay(&self, submitter: &Submitter, payload: &str) -> Result<RelayReceipt, RelayError> {
        debug!(user_id = %submitter.chat_id, payload_length = payload.len(), "Received web app data");

        let order = OrderSubmission::parse(payload)?;
        info!(
            user_id = %submitter.chat_id,
            reported_user_id = ?order.reported_user_id(),
            order_id = %order.order_id,
            "New order received"
        );

        // Plain text: the storefront summary is user-influenced and must not be parsed as markup
        let admin_message = OutboundMessage::plain(self.config.admin_chat_id, admin_notification(&order));
        self.channel
            .send(admin_message)
            .await
            .map_err(|e| RelayError::DeliveryFailure(e.to_string()))?;
        debug!(order_id = %order.order_id, admin_chat_id = %self.config.admin_chat_id, "Admin notified");

        let language_code = submitter.language_code.as_deref();
        let confirmation = order_confirmation(submitter.chat_id, &order, &self.config, language_code);
        self.channel
            .send(confirmation)
            .await
            .map_err(|e| RelayError::UnknownFailure(format!("confirmation not delivered: {e}")))?;

        Ok(RelayReceipt {
            prepayment: order.prepayment(),
            total: order.total,
            order_id: order.order_id,
        })
    }

    async fn reply_with_error(&self, submitter: &Submitter, error: &RelayError) {
        let reply = relay_error_reply(
            submitter.chat_id,
            error,
            &self.config,
            submitter.language_code.as_deref(),
        );
        if let Err(e) = self.channel.send(reply).await {
            warn!(user_id = %submitter.chat_id, error = %e, "Could not deliver error reply to customer");
        }
    }

    /// Tell the admin the bot is ready. Failures are ignored.
    pub async fn announce_startup(&self) {
        match self.channel.send(startup_notice(&self.config)).await {
            Ok(()) => info!(admin_chat_id = %self.config.admin_chat_id, "Startup notice sent to admin"),
            Err(e) => debug!(error = %e, "Startup notice not delivered"),
        }
    }
}
