use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::categories::repo_types::Category;

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, user_id, name, color, icon, is_default, created_at
        FROM categories
        WHERE user_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list categories")?;
    Ok(rows)
}

pub async fn insert(db: &PgPool, category: &Category) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO categories (id, user_id, name, color, icon, is_default, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(category.id)
    .bind(category.user_id)
    .bind(&category.name)
    .bind(&category.color)
    .bind(&category.icon)
    .bind(category.is_default)
    .bind(category.created_at)
    .execute(db)
    .await
    .context("insert category")?;
    Ok(())
}

/// Returns false when nothing owned by `user_id` matched.
pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM categories WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete category")?;
    Ok(res.rows_affected() > 0)
}
