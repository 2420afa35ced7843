//! Domain types for the agency ledger.
//!
//! This module provides:
//! - Lossless monetary amounts via the Money wrapper
//! - Domain primitives: TimeMs, UserId, CreatorId, Period
//! - Entity types: User, Creator, Sale, MonthlyFinancial, Payment, Goal

pub mod creator;
pub mod financial;
pub mod goal;
pub mod money;
pub mod payment;
pub mod primitives;
pub mod sale;
pub mod user;

pub use creator::{CompensationType, Creator};
pub use financial::{CustomCost, MonthlyFinancial};
pub use goal::{Goal, GoalScope, GoalType};
pub use money::Money;
pub use payment::{Payment, PaymentMethod};
pub use primitives::{CreatorId, Period, TimeMs, UserId};
pub use sale::{Sale, SaleStatus, SaleType};
pub use user::{Role, User};
