//! # Order Model Module
//!
//! Typed view of the order payload the storefront Mini App submits through
//! `Telegram.WebApp.sendData`. The payload is untrusted: it is decoded into a
//! schema-checked record and anything of the wrong shape is rejected as a
//! [`RelayError::MalformedPayload`].

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use serde_json::Value;

use crate::relay_errors::RelayError;

/// Order id used when the payload does not carry one
pub const MISSING_ORDER_ID: &str = "N/A";

/// The only submission type the storefront sends
pub const ORDER_SUBMISSION_TYPE: &str = "order";

/// Wire shape of a submission, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubmission {
    #[serde(rename = "type")]
    kind: Option<String>,
    order_id: Option<RawOrderId>,
    message: Option<String>,
    text: Option<String>,
    total: Option<f64>,
    contact: Option<Value>,
    user: Option<Value>,
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOrderId {
    Text(String),
    Number(serde_json::Number),
}

/// A validated order submission
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    /// Storefront-generated id, e.g. `AH-1X2Y3Z`
    pub order_id: String,
    /// Pre-formatted admin text; `None` when absent or blank
    pub message: Option<String>,
    /// Order total in currency units
    pub total: Decimal,
    /// Customer contact block, passed through untouched
    pub contact: Option<Value>,
    /// Telegram user block, passed through untouched
    pub user: Option<Value>,
    /// Full order details (items, delivery, promo, totals)
    pub details: Option<Value>,
}

impl OrderSubmission {
    /// Decode a raw web app payload.
    ///
    /// Absent optional fields take their defaults; fields that are present
    /// with the wrong type fail the whole submission.
    pub fn parse(payload: &str) -> Result<Self, RelayError> {
        let value: Value = serde_json::from_str(payload)?;
        if !value.is_object() {
            return Err(RelayError::MalformedPayload(
                "submission must be a JSON object".to_string(),
            ));
        }

        let raw: RawSubmission = serde_json::from_value(value)?;

        if let Some(kind) = raw.kind.as_deref() {
            if kind != ORDER_SUBMISSION_TYPE {
                return Err(RelayError::MalformedPayload(format!(
                    "unsupported submission type: {kind}"
                )));
            }
        }

        let order_id = match raw.order_id {
            Some(RawOrderId::Text(id)) if !id.trim().is_empty() => id,
            Some(RawOrderId::Number(id)) => id.to_string(),
            _ => MISSING_ORDER_ID.to_string(),
        };

        let total = match raw.total {
            Some(total) => Some(total),
            None => nested_total(raw.data.as_ref())?,
        };
        let total = match total {
            Some(total) => amount_from_f64(total)?,
            None => Decimal::ZERO,
        };

        // The storefront sends its summary as `text`; `message` wins when both are present
        let message = raw
            .message
            .filter(|text| !text.trim().is_empty())
            .or_else(|| raw.text.filter(|text| !text.trim().is_empty()));

        Ok(Self {
            order_id,
            message,
            total,
            contact: raw.contact,
            user: raw.user,
            details: raw.data,
        })
    }

    /// Half of the total, rounded to cents with half-cents going up
    pub fn prepayment(&self) -> Decimal {
        round_cents(self.total / Decimal::TWO)
    }

    /// Telegram user id the storefront reported, if any
    pub fn reported_user_id(&self) -> Option<i64> {
        self.user.as_ref()?.get("id")?.as_i64()
    }
}

/// Total from the storefront's nested `data.totals.total` block
fn nested_total(data: Option<&Value>) -> Result<Option<f64>, RelayError> {
    let Some(total) = data
        .and_then(|data| data.get("totals"))
        .and_then(|totals| totals.get("total"))
    else {
        return Ok(None);
    };

    if total.is_null() {
        return Ok(None);
    }

    total.as_f64().map(Some).ok_or_else(|| {
        RelayError::MalformedPayload("data.totals.total must be a number".to_string())
    })
}

fn amount_from_f64(amount: f64) -> Result<Decimal, RelayError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(RelayError::MalformedPayload(format!(
            "total must be a non-negative number, got {amount}"
        )));
    }

    Decimal::from_f64(amount).ok_or_else(|| {
        RelayError::MalformedPayload(format!("total is out of range: {amount}"))
    })
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount with exactly two decimal places
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_cents(amount);
    rounded.rescale(2);
    rounded.to_string()
}
