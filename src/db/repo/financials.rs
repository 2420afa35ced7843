//! Monthly financial row operations for the repository.

use crate::domain::{CreatorId, CustomCost, MonthlyFinancial, TimeMs};
use sqlx::Row;
use tracing::warn;

use super::{parse_money, Repository};

fn row_to_financial(row: &sqlx::sqlite::SqliteRow) -> MonthlyFinancial {
    let gross: String = row.get("gross_revenue");
    let marketing: String = row.get("marketing_costs");
    let tools: String = row.get("tool_costs");
    let other: String = row.get("other_costs");
    let custom_json: String = row.get("custom_costs");

    let custom_costs: Vec<CustomCost> =
        serde_json::from_str(&custom_json).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to parse stored custom costs, using empty list");
            Vec::new()
        });

    MonthlyFinancial {
        creator_id: CreatorId::new(row.get("creator_id")),
        year: row.get("year"),
        month: row.get::<i64, _>("month") as u32,
        gross_revenue: parse_money("gross_revenue", &gross),
        marketing_costs: parse_money("marketing_costs", &marketing),
        tool_costs: parse_money("tool_costs", &tools),
        other_costs: parse_money("other_costs", &other),
        custom_costs,
    }
}

impl Repository {
    /// Upsert the financial record for (creator, year, month). Last writer
    /// wins; there is no optimistic concurrency control.
    ///
    /// # Errors
    /// Returns an error if the upsert fails.
    pub async fn upsert_monthly_financial(
        &self,
        financial: &MonthlyFinancial,
    ) -> Result<(), sqlx::Error> {
        let custom_json = serde_json::to_string(&financial.custom_costs)
            .unwrap_or_else(|_| "[]".to_string());

        sqlx::query(
            r#"
            INSERT INTO monthly_financials (
                creator_id, year, month, gross_revenue, marketing_costs,
                tool_costs, other_costs, custom_costs, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(creator_id, year, month) DO UPDATE SET
                gross_revenue = excluded.gross_revenue,
                marketing_costs = excluded.marketing_costs,
                tool_costs = excluded.tool_costs,
                other_costs = excluded.other_costs,
                custom_costs = excluded.custom_costs,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(financial.creator_id.as_str())
        .bind(financial.year)
        .bind(financial.month as i64)
        .bind(financial.gross_revenue.to_canonical_string())
        .bind(financial.marketing_costs.to_canonical_string())
        .bind(financial.tool_costs.to_canonical_string())
        .bind(financial.other_costs.to_canonical_string())
        .bind(custom_json)
        .bind(TimeMs::now().as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the financial record for (creator, year, month), if entered.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_monthly_financial(
        &self,
        creator_id: &CreatorId,
        year: i32,
        month: u32,
    ) -> Result<Option<MonthlyFinancial>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT creator_id, year, month, gross_revenue, marketing_costs,
                   tool_costs, other_costs, custom_costs
            FROM monthly_financials
            WHERE creator_id = ? AND year = ? AND month = ?
            "#,
        )
        .bind(creator_id.as_str())
        .bind(year)
        .bind(month as i64)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_financial))
    }
}
