use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{Session, User};

/// Find a user by email.
pub async fn find_user_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, name, picture, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
    .context("find user by email")?;
    Ok(user)
}

pub async fn find_user_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, name, picture, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find user by id")?;
    Ok(user)
}

pub async fn insert_user(db: &PgPool, user: &User) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, email, name, picture, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.picture)
    .bind(user.created_at)
    .execute(db)
    .await
    .context("insert user")?;
    Ok(())
}

pub async fn insert_session(db: &PgPool, session: &Session) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO sessions (id, user_id, session_token, expires_at, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(session.id)
    .bind(session.user_id)
    .bind(&session.session_token)
    .bind(session.expires_at)
    .bind(session.created_at)
    .execute(db)
    .await
    .context("insert session")?;
    Ok(())
}

/// A token issued twice resolves to its longest-lived session.
pub async fn find_session_by_token(db: &PgPool, token: &str) -> anyhow::Result<Option<Session>> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, user_id, session_token, expires_at, created_at
        FROM sessions
        WHERE session_token = $1
        ORDER BY expires_at DESC
        LIMIT 1
        "#,
    )
    .bind(token)
    .fetch_optional(db)
    .await
    .context("find session by token")?;
    Ok(session)
}

pub async fn delete_sessions_by_token(db: &PgPool, token: &str) -> anyhow::Result<u64> {
    let res = sqlx::query(r#"DELETE FROM sessions WHERE session_token = $1"#)
        .bind(token)
        .execute(db)
        .await
        .context("delete sessions by token")?;
    Ok(res.rows_affected())
}
