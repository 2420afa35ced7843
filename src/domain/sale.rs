//! Sale type: a single logged transaction attributed to a chatter and creator.

use crate::domain::{CreatorId, Money, TimeMs, UserId};
use serde::{Deserialize, Serialize};

/// Kind of sale being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleType {
    Cam,
    Tip,
    Ppv,
    Initial,
    Custom,
    /// Non-commissionable base compensation line for the chatter.
    Base,
    MassMessage,
}

impl SaleType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CAM" => Some(SaleType::Cam),
            "TIP" => Some(SaleType::Tip),
            "PPV" => Some(SaleType::Ppv),
            "INITIAL" => Some(SaleType::Initial),
            "CUSTOM" => Some(SaleType::Custom),
            "BASE" => Some(SaleType::Base),
            "MASS_MESSAGE" => Some(SaleType::MassMessage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::Cam => "CAM",
            SaleType::Tip => "TIP",
            SaleType::Ppv => "PPV",
            SaleType::Initial => "INITIAL",
            SaleType::Custom => "CUSTOM",
            SaleType::Base => "BASE",
            SaleType::MassMessage => "MASS_MESSAGE",
        }
    }
}

/// Whether the sale was logged in real time or backdated.
///
/// Set once at creation by the classifier and frozen; editing a sale never
/// recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    Online,
    Offline,
}

impl SaleStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ONLINE" => Some(SaleStatus::Online),
            "OFFLINE" => Some(SaleStatus::Offline),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Online => "ONLINE",
            SaleStatus::Offline => "OFFLINE",
        }
    }
}

/// A logged sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    /// Owning chatter.
    pub user_id: UserId,
    pub creator_id: CreatorId,
    /// Positive amount in the agency's accounting currency.
    pub amount: Money,
    pub sale_type: SaleType,
    pub status: SaleStatus,
    /// Attributed business timestamp; may be in the past for backdated sales.
    pub sale_date: TimeMs,
    /// Actual insert time, kept for audit.
    pub created_at: TimeMs,
}

impl Sale {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        creator_id: CreatorId,
        amount: Money,
        sale_type: SaleType,
        status: SaleStatus,
        sale_date: TimeMs,
        created_at: TimeMs,
    ) -> Self {
        Sale {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            creator_id,
            amount,
            sale_type,
            status,
            sale_date,
            created_at,
        }
    }
}
