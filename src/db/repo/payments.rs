//! Payment row operations for the repository.

use crate::domain::{Money, Payment, PaymentMethod, TimeMs, UserId};
use sqlx::Row;

use super::{parse_money, Repository};

fn row_to_payment(row: &sqlx::sqlite::SqliteRow) -> Payment {
    let amount_str: String = row.get("amount");
    let method_str: String = row.get("payment_method");
    Payment {
        id: row.get("id"),
        user_id: UserId::new(row.get("user_id")),
        amount: parse_money("amount", &amount_str),
        payment_date: TimeMs::new(row.get("payment_date")),
        payment_method: PaymentMethod::parse(&method_str).unwrap_or(PaymentMethod::Other),
        note: row.get("note"),
    }
}

impl Repository {
    /// Insert a payment.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_payment(&self, payment: &Payment) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, user_id, amount, payment_date, payment_method, note)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payment.id)
        .bind(payment.user_id.as_str())
        .bind(payment.amount.to_canonical_string())
        .bind(payment.payment_date.as_i64())
        .bind(payment.payment_method.as_str())
        .bind(payment.note.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List payments for a user, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_payments(&self, user_id: &UserId) -> Result<Vec<Payment>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, amount, payment_date, payment_method, note
            FROM payments WHERE user_id = ?
            ORDER BY payment_date DESC, id DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_payment).collect())
    }

    /// Sum of all payments ever made to a user.
    ///
    /// Summed in Rust rather than with SQL SUM: SQLite's aggregate returns
    /// REAL and would lose decimal precision.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn sum_payments(&self, user_id: &UserId) -> Result<Money, sqlx::Error> {
        let rows = sqlx::query("SELECT amount FROM payments WHERE user_id = ? ORDER BY payment_date ASC, id ASC")
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        let mut sum = Money::zero();
        for row in rows {
            let amount_str: String = row.get("amount");
            sum = sum + parse_money("amount", &amount_str);
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::init_db;
    use crate::domain::{Role, User};
    use std::str::FromStr;
    use tempfile::TempDir;

    async fn setup_test_db() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }

    async fn seed_user(repo: &Repository) -> UserId {
        let user = User {
            id: UserId::generate(),
            name: "dana".to_string(),
            role: Role::Chatter,
            commission_percent: None,
            fixed_salary: None,
        };
        repo.insert_user(&user).await.unwrap();
        user.id
    }

    #[tokio::test]
    async fn test_insert_and_list_payments() {
        let (repo, _temp) = setup_test_db().await;
        let user_id = seed_user(&repo).await;

        let p1 = Payment::new(
            user_id.clone(),
            Money::from_str("100").unwrap(),
            TimeMs::new(1000),
            PaymentMethod::Crypto,
            Some("march payout".to_string()),
        );
        let p2 = Payment::new(
            user_id.clone(),
            Money::from_str("200").unwrap(),
            TimeMs::new(2000),
            PaymentMethod::WireTransfer,
            None,
        );
        repo.insert_payment(&p1).await.unwrap();
        repo.insert_payment(&p2).await.unwrap();

        let payments = repo.list_payments(&user_id).await.unwrap();
        assert_eq!(payments, vec![p2, p1]);
    }

    #[tokio::test]
    async fn test_sum_payments() {
        let (repo, _temp) = setup_test_db().await;
        let user_id = seed_user(&repo).await;

        for amount in ["100.10", "200.20", "0.03"] {
            repo.insert_payment(&Payment::new(
                user_id.clone(),
                Money::from_str(amount).unwrap(),
                TimeMs::new(1000),
                PaymentMethod::Paypal,
                None,
            ))
            .await
            .unwrap();
        }

        let sum = repo.sum_payments(&user_id).await.unwrap();
        assert_eq!(sum.to_canonical_string(), "300.33");
    }

    #[tokio::test]
    async fn test_sum_with_no_payments_is_zero() {
        let (repo, _temp) = setup_test_db().await;
        let user_id = seed_user(&repo).await;
        assert!(repo.sum_payments(&user_id).await.unwrap().is_zero());
    }
}
