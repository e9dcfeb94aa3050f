use anyhow::Context;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::transactions::repo_types::{Transaction, TransactionFields, TransactionRow};

const COLUMNS: &str = "id, user_id, amount, kind, category_id, description, date, created_at";

fn convert(rows: Vec<TransactionRow>) -> anyhow::Result<Vec<Transaction>> {
    rows.into_iter().map(Transaction::try_from).collect()
}

/// All of a user's transactions, newest business date first.
pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Transaction>> {
    let rows = sqlx::query_as::<_, TransactionRow>(&format!(
        "SELECT {COLUMNS} FROM transactions WHERE user_id = $1 ORDER BY date DESC, created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list transactions")?;
    convert(rows)
}

/// Transactions with `start <= date < end`.
pub async fn list_between(
    db: &PgPool,
    user_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<Vec<Transaction>> {
    let rows = sqlx::query_as::<_, TransactionRow>(&format!(
        "SELECT {COLUMNS} FROM transactions \
         WHERE user_id = $1 AND date >= $2 AND date < $3 \
         ORDER BY date ASC"
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .context("list transactions in range")?;
    convert(rows)
}

pub async fn insert(db: &PgPool, txn: &Transaction) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO transactions (id, user_id, amount, kind, category_id, description, date, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(txn.id)
    .bind(txn.user_id)
    .bind(txn.amount)
    .bind(txn.kind.as_str())
    .bind(txn.category_id)
    .bind(&txn.description)
    .bind(txn.date)
    .bind(txn.created_at)
    .execute(db)
    .await
    .context("insert transaction")?;
    Ok(())
}

/// Overwrites the caller-controlled fields; `None` when no owned row matched.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    fields: &TransactionFields,
) -> anyhow::Result<Option<Transaction>> {
    let row = sqlx::query_as::<_, TransactionRow>(&format!(
        "UPDATE transactions \
         SET amount = $3, kind = $4, category_id = $5, description = $6, date = $7 \
         WHERE id = $1 AND user_id = $2 \
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(user_id)
    .bind(fields.amount)
    .bind(fields.kind.as_str())
    .bind(fields.category_id)
    .bind(&fields.description)
    .bind(fields.date)
    .fetch_optional(db)
    .await
    .context("update transaction")?;
    row.map(Transaction::try_from).transpose()
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM transactions WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete transaction")?;
    Ok(res.rows_affected() > 0)
}
