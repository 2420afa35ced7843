//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by entity family:
//! - `users.rs` - User rows
//! - `creators.rs` - Creator rows
//! - `sales.rs` - Sale rows and period filters
//! - `financials.rs` - Monthly financial upserts
//! - `payments.rs` - Payment rows and payout sums
//! - `goals.rs` - Goal rows

mod creators;
mod financials;
mod goals;
mod payments;
mod sales;
mod users;

pub use sales::SaleFilter;

use crate::domain::Money;
use sqlx::sqlite::SqlitePool;
use std::str::FromStr;
use tracing::warn;

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// Connectivity check for the readiness probe.
    ///
    /// # Errors
    /// Returns an error if the database cannot answer a trivial query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Parse a stored canonical money string, logging and defaulting to zero on
/// corruption rather than failing the whole query.
fn parse_money(column: &str, raw: &str) -> Money {
    Money::from_str(raw).unwrap_or_else(|e| {
        warn!(
            column = column,
            value = raw,
            error = %e,
            "Failed to parse stored money value, using zero"
        );
        Money::zero()
    })
}

/// Parse an optional stored money column.
fn parse_money_opt(column: &str, raw: Option<String>) -> Option<Money> {
    raw.map(|s| parse_money(column, &s))
}
