//! Sale row operations and period filters for the repository.

use crate::domain::{CreatorId, Sale, SaleStatus, SaleType, TimeMs, UserId};
use sqlx::Row;

use super::{parse_money, Repository};

/// Optional filters for sale queries. Time bounds are half-open:
/// `from_ms <= sale_date < to_ms`.
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    pub user_id: Option<UserId>,
    pub creator_id: Option<CreatorId>,
    pub from_ms: Option<TimeMs>,
    pub to_ms: Option<TimeMs>,
}

fn row_to_sale(row: &sqlx::sqlite::SqliteRow) -> Sale {
    let amount_str: String = row.get("amount");
    let type_str: String = row.get("sale_type");
    let status_str: String = row.get("status");
    Sale {
        id: row.get("id"),
        user_id: UserId::new(row.get("user_id")),
        creator_id: CreatorId::new(row.get("creator_id")),
        amount: parse_money("amount", &amount_str),
        sale_type: SaleType::parse(&type_str).unwrap_or(SaleType::Custom),
        status: SaleStatus::parse(&status_str).unwrap_or(SaleStatus::Offline),
        sale_date: TimeMs::new(row.get("sale_date")),
        created_at: TimeMs::new(row.get("created_at")),
    }
}

impl Repository {
    /// Insert a sale.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_sale(&self, sale: &Sale) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO sales (
                id, user_id, creator_id, amount, sale_type, status, sale_date, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.user_id.as_str())
        .bind(sale.creator_id.as_str())
        .bind(sale.amount.to_canonical_string())
        .bind(sale.sale_type.as_str())
        .bind(sale.status.as_str())
        .bind(sale.sale_date.as_i64())
        .bind(sale.created_at.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a sale by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_sale(&self, id: &str) -> Result<Option<Sale>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, creator_id, amount, sale_type, status, sale_date, created_at
            FROM sales WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_sale))
    }

    /// Update the mutable fields of a sale. Status is frozen at creation and
    /// deliberately not touched here.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn update_sale(
        &self,
        id: &str,
        amount: crate::domain::Money,
        sale_type: SaleType,
        sale_date: TimeMs,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sales SET amount = ?, sale_type = ?, sale_date = ? WHERE id = ?",
        )
        .bind(amount.to_canonical_string())
        .bind(sale_type.as_str())
        .bind(sale_date.as_i64())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Query sales matching a filter, ordered by sale date.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn query_sales(&self, filter: &SaleFilter) -> Result<Vec<Sale>, sqlx::Error> {
        let mut sql = String::from(
            r#"
            SELECT id, user_id, creator_id, amount, sale_type, status, sale_date, created_at
            FROM sales WHERE 1=1
            "#,
        );
        if filter.user_id.is_some() {
            sql.push_str(" AND user_id = ?");
        }
        if filter.creator_id.is_some() {
            sql.push_str(" AND creator_id = ?");
        }
        sql.push_str(" AND sale_date >= ? AND sale_date < ?");
        sql.push_str(" ORDER BY sale_date ASC, id ASC");

        let mut query = sqlx::query(&sql);
        if let Some(user_id) = &filter.user_id {
            query = query.bind(user_id.as_str());
        }
        if let Some(creator_id) = &filter.creator_id {
            query = query.bind(creator_id.as_str());
        }
        query = query
            .bind(filter.from_ms.unwrap_or(TimeMs::new(0)).as_i64())
            .bind(filter.to_ms.unwrap_or(TimeMs::new(i64::MAX)).as_i64());

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_sale).collect())
    }

    /// Distinct (year, month) keys of months in which a user recorded sales.
    ///
    /// Used by the owed-amount roll-up to count salary months.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn count_active_sale_months(&self, user_id: &UserId) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(DISTINCT strftime('%Y-%m', sale_date / 1000, 'unixepoch')) AS months
            FROM sales WHERE user_id = ?
            "#,
        )
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("months"))
    }
}
