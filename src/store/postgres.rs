use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::Store;
use crate::{
    auth::{
        self,
        repo_types::{Session, User},
    },
    categories::{self, repo_types::Category},
    goals::{
        self,
        repo_types::{Goal, GoalStatus},
    },
    transactions::{
        self,
        repo_types::{Transaction, TransactionFields},
    },
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        auth::repo::find_user_by_id(&self.pool, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        auth::repo::find_user_by_email(&self.pool, email).await
    }

    async fn insert_user(&self, user: &User) -> anyhow::Result<()> {
        auth::repo::insert_user(&self.pool, user).await
    }

    async fn insert_session(&self, session: &Session) -> anyhow::Result<()> {
        auth::repo::insert_session(&self.pool, session).await
    }

    async fn find_session_by_token(&self, token: &str) -> anyhow::Result<Option<Session>> {
        auth::repo::find_session_by_token(&self.pool, token).await
    }

    async fn delete_sessions_by_token(&self, token: &str) -> anyhow::Result<u64> {
        auth::repo::delete_sessions_by_token(&self.pool, token).await
    }

    async fn list_categories(&self, user_id: Uuid) -> anyhow::Result<Vec<Category>> {
        categories::repo::list_by_user(&self.pool, user_id).await
    }

    async fn insert_category(&self, category: &Category) -> anyhow::Result<()> {
        categories::repo::insert(&self.pool, category).await
    }

    async fn delete_category(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        categories::repo::delete(&self.pool, user_id, id).await
    }

    async fn list_transactions(&self, user_id: Uuid) -> anyhow::Result<Vec<Transaction>> {
        transactions::repo::list_by_user(&self.pool, user_id).await
    }

    async fn list_transactions_between(
        &self,
        user_id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> anyhow::Result<Vec<Transaction>> {
        transactions::repo::list_between(&self.pool, user_id, start, end).await
    }

    async fn insert_transaction(&self, txn: &Transaction) -> anyhow::Result<()> {
        transactions::repo::insert(&self.pool, txn).await
    }

    async fn update_transaction(
        &self,
        user_id: Uuid,
        id: Uuid,
        fields: &TransactionFields,
    ) -> anyhow::Result<Option<Transaction>> {
        transactions::repo::update(&self.pool, user_id, id, fields).await
    }

    async fn delete_transaction(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        transactions::repo::delete(&self.pool, user_id, id).await
    }

    async fn list_goals(&self, user_id: Uuid) -> anyhow::Result<Vec<Goal>> {
        goals::repo::list_by_user(&self.pool, user_id).await
    }

    async fn find_goal(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Goal>> {
        goals::repo::find(&self.pool, user_id, id).await
    }

    async fn insert_goal(&self, goal: &Goal) -> anyhow::Result<()> {
        goals::repo::insert(&self.pool, goal).await
    }

    async fn update_goal_progress(
        &self,
        user_id: Uuid,
        id: Uuid,
        current_amount: f64,
        status: GoalStatus,
    ) -> anyhow::Result<Option<Goal>> {
        goals::repo::update_progress(&self.pool, user_id, id, current_amount, status).await
    }

    async fn delete_goal(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        goals::repo::delete(&self.pool, user_id, id).await
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}
