use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::goals::repo_types::{Goal, GoalRow, GoalStatus};

const COLUMNS: &str =
    "id, user_id, name, target_amount, current_amount, deadline, status, created_at";

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Goal>> {
    let rows = sqlx::query_as::<_, GoalRow>(&format!(
        "SELECT {COLUMNS} FROM goals WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list goals")?;
    rows.into_iter().map(Goal::try_from).collect()
}

pub async fn find(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Goal>> {
    let row = sqlx::query_as::<_, GoalRow>(&format!(
        "SELECT {COLUMNS} FROM goals WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("find goal")?;
    row.map(Goal::try_from).transpose()
}

pub async fn insert(db: &PgPool, goal: &Goal) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO goals (id, user_id, name, target_amount, current_amount, deadline, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(goal.id)
    .bind(goal.user_id)
    .bind(&goal.name)
    .bind(goal.target_amount)
    .bind(goal.current_amount)
    .bind(goal.deadline)
    .bind(goal.status.as_str())
    .bind(goal.created_at)
    .execute(db)
    .await
    .context("insert goal")?;
    Ok(())
}

/// Plain overwrite of progress fields: concurrent contributions can lose an update.
pub async fn update_progress(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    current_amount: f64,
    status: GoalStatus,
) -> anyhow::Result<Option<Goal>> {
    let row = sqlx::query_as::<_, GoalRow>(&format!(
        "UPDATE goals SET current_amount = $3, status = $4 \
         WHERE id = $1 AND user_id = $2 \
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(user_id)
    .bind(current_amount)
    .bind(status.as_str())
    .fetch_optional(db)
    .await
    .context("update goal progress")?;
    row.map(Goal::try_from).transpose()
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM goals WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete goal")?;
    Ok(res.rows_affected() > 0)
}
