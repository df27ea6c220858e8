//! # Relay Error Types Module
//!
//! Every failure while relaying an order submission falls into one of three
//! kinds. None of them stop the bot: each is turned into a single reply to
//! the customer by [`crate::relay::OrderRelay`].

use thiserror::Error;

/// Failure kinds for one order submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The web app payload could not be decoded into an order
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    /// The admin notification could not be delivered
    #[error("Delivery failure: {0}")]
    DeliveryFailure(String),
    /// Anything else that went wrong while processing the order
    #[error("Unknown failure: {0}")]
    UnknownFailure(String),
}

impl RelayError {
    /// Short machine-friendly name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MalformedPayload(_) => "malformed_payload",
            RelayError::DeliveryFailure(_) => "delivery_failure",
            RelayError::UnknownFailure(_) => "unknown_failure",
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::MalformedPayload(err.to_string())
    }
}
