//! Pure computation core: commission, creator financials, goals, status.
//!
//! Every function here is a synchronous pure function over rows the storage
//! layer already fetched. No I/O, no shared state, no retries; identical
//! inputs always produce identical outputs.

use thiserror::Error;

pub mod commission;
pub mod creator_financials;
pub mod goals;
pub mod status;

pub use commission::{compute_user_earnings, daily_salary_share, UserEarnings};
pub use creator_financials::{compute_creator_financials, CreatorFinancials};
pub use goals::{bonus_description, compute_progress, GoalProgress};
pub use status::{can_edit, classify_status};

/// Errors from the computation core. Deterministic and local; nothing here
/// is retryable.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Contradictory or incomplete compensation configuration.
    #[error("invalid compensation configuration: {0}")]
    InvalidCompensation(String),
}
