//! Payment type: an actual payout made to a chatter.

use crate::domain::{Money, TimeMs, UserId};
use serde::{Deserialize, Serialize};

/// Channel through which a payout was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Crypto,
    WireTransfer,
    Paypal,
    Other,
}

impl PaymentMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CRYPTO" => Some(PaymentMethod::Crypto),
            "WIRE_TRANSFER" => Some(PaymentMethod::WireTransfer),
            "PAYPAL" => Some(PaymentMethod::Paypal),
            "OTHER" => Some(PaymentMethod::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Crypto => "CRYPTO",
            PaymentMethod::WireTransfer => "WIRE_TRANSFER",
            PaymentMethod::Paypal => "PAYPAL",
            PaymentMethod::Other => "OTHER",
        }
    }
}

/// A payout row. Only ever entered by a human; goal achievement never
/// creates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub user_id: UserId,
    pub amount: Money,
    pub payment_date: TimeMs,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
}

impl Payment {
    pub fn new(
        user_id: UserId,
        amount: Money,
        payment_date: TimeMs,
        payment_method: PaymentMethod,
        note: Option<String>,
    ) -> Self {
        Payment {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            amount,
            payment_date,
            payment_method,
            note,
        }
    }
}
