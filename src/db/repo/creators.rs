//! Creator row operations for the repository.

use crate::domain::{CompensationType, Creator, CreatorId, Money, TimeMs};
use sqlx::Row;

use super::{parse_money, parse_money_opt, Repository};

fn row_to_creator(row: &sqlx::sqlite::SqliteRow) -> Creator {
    let comp_str: String = row.get("compensation_type");
    let platform_str: String = row.get("onlyfans_commission_percent");
    Creator {
        id: CreatorId::new(row.get("id")),
        name: row.get("name"),
        compensation_type: CompensationType::parse(&comp_str)
            .unwrap_or(CompensationType::Percentage),
        revenue_share_percent: parse_money_opt(
            "revenue_share_percent",
            row.get("revenue_share_percent"),
        ),
        fixed_salary_cost: parse_money_opt("fixed_salary_cost", row.get("fixed_salary_cost")),
        onlyfans_commission_percent: parse_money("onlyfans_commission_percent", &platform_str),
    }
}

impl Repository {
    /// Insert a creator. Fails on duplicate name (unique constraint).
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_creator(&self, creator: &Creator) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO creators (
                id, name, compensation_type, revenue_share_percent,
                fixed_salary_cost, onlyfans_commission_percent, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(creator.id.as_str())
        .bind(&creator.name)
        .bind(creator.compensation_type.as_str())
        .bind(
            creator
                .revenue_share_percent
                .map(|m| m.to_canonical_string()),
        )
        .bind(creator.fixed_salary_cost.map(|m| m.to_canonical_string()))
        .bind(creator.onlyfans_commission_percent.to_canonical_string())
        .bind(TimeMs::now().as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a creator by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_creator(&self, id: &CreatorId) -> Result<Option<Creator>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, name, compensation_type, revenue_share_percent,
                   fixed_salary_cost, onlyfans_commission_percent
            FROM creators WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_creator))
    }

    /// Get a creator by unique name.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_creator_by_name(&self, name: &str) -> Result<Option<Creator>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, name, compensation_type, revenue_share_percent,
                   fixed_salary_cost, onlyfans_commission_percent
            FROM creators WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_creator))
    }

    /// List all creators ordered by name.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_creators(&self) -> Result<Vec<Creator>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, compensation_type, revenue_share_percent,
                   fixed_salary_cost, onlyfans_commission_percent
            FROM creators ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_creator).collect())
    }
}
