//! User row operations for the repository.

use crate::domain::{Role, TimeMs, User, UserId};
use sqlx::Row;

use super::{parse_money_opt, Repository};

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
    let role_str: String = row.get("role");
    User {
        id: UserId::new(row.get("id")),
        name: row.get("name"),
        // Unknown role strings cannot be written through the API; default
        // to the least privileged role if a row was hand-edited.
        role: Role::parse(&role_str).unwrap_or(Role::Chatter),
        commission_percent: parse_money_opt("commission_percent", row.get("commission_percent")),
        fixed_salary: parse_money_opt("fixed_salary", row.get("fixed_salary")),
    }
}

impl Repository {
    /// Insert a user.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_user(&self, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, role, commission_percent, fixed_salary, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.commission_percent.map(|m| m.to_canonical_string()))
        .bind(user.fixed_salary.map(|m| m.to_canonical_string()))
        .bind(TimeMs::now().as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a user by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, name, role, commission_percent, fixed_salary FROM users WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_user))
    }

    /// List all users ordered by name.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_users(&self) -> Result<Vec<User>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, name, role, commission_percent, fixed_salary FROM users ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_user).collect())
    }
}
