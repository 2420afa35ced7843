//! Goal row operations for the repository.

use crate::domain::{CreatorId, Goal, GoalScope, GoalType, TimeMs, UserId};
use sqlx::Row;

use super::{parse_money, parse_money_opt, Repository};

fn row_to_goal(row: &sqlx::sqlite::SqliteRow) -> Goal {
    let user_id: Option<String> = row.get("user_id");
    let creator_id: Option<String> = row.get("creator_id");
    let scope = match (user_id, creator_id) {
        (Some(uid), _) => GoalScope::User(UserId::new(uid)),
        (None, Some(cid)) => GoalScope::Creator(CreatorId::new(cid)),
        (None, None) => GoalScope::Global,
    };

    let type_str: String = row.get("goal_type");
    let target_str: String = row.get("target");
    Goal {
        id: row.get("id"),
        scope,
        goal_type: GoalType::parse(&type_str).unwrap_or(GoalType::Sales),
        target: parse_money("target", &target_str),
        year: row.get("year"),
        month: row.get::<i64, _>("month") as u32,
        bonus_amount: parse_money_opt("bonus_amount", row.get("bonus_amount")),
    }
}

impl Repository {
    /// Insert a goal.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_goal(&self, goal: &Goal) -> Result<(), sqlx::Error> {
        let (user_id, creator_id) = match &goal.scope {
            GoalScope::Global => (None, None),
            GoalScope::User(uid) => (Some(uid.as_str()), None),
            GoalScope::Creator(cid) => (None, Some(cid.as_str())),
        };

        sqlx::query(
            r#"
            INSERT INTO goals (
                id, user_id, creator_id, goal_type, target, year, month, bonus_amount, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&goal.id)
        .bind(user_id)
        .bind(creator_id)
        .bind(goal.goal_type.as_str())
        .bind(goal.target.to_canonical_string())
        .bind(goal.year)
        .bind(goal.month as i64)
        .bind(goal.bonus_amount.map(|m| m.to_canonical_string()))
        .bind(TimeMs::now().as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List goals for a (year, month) key. `month = 0` rows are yearly goals
    /// and are returned for any month of their year.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_goals(&self, year: i32, month: u32) -> Result<Vec<Goal>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, creator_id, goal_type, target, year, month, bonus_amount
            FROM goals
            WHERE year = ? AND (month = ? OR month = 0)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(year)
        .bind(month as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_goal).collect())
    }
}
