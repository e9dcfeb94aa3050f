//! Persistence seam shared by every feature module.
//!
//! Each call is a single independent statement; nothing here spans more
//! than one record atomically.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::repo_types::{Session, User},
    categories::repo_types::Category,
    goals::repo_types::{Goal, GoalStatus},
    transactions::repo_types::{Transaction, TransactionFields},
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn insert_user(&self, user: &User) -> anyhow::Result<()>;

    async fn insert_session(&self, session: &Session) -> anyhow::Result<()>;
    async fn find_session_by_token(&self, token: &str) -> anyhow::Result<Option<Session>>;
    async fn delete_sessions_by_token(&self, token: &str) -> anyhow::Result<u64>;

    async fn list_categories(&self, user_id: Uuid) -> anyhow::Result<Vec<Category>>;
    async fn insert_category(&self, category: &Category) -> anyhow::Result<()>;
    async fn delete_category(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool>;

    async fn list_transactions(&self, user_id: Uuid) -> anyhow::Result<Vec<Transaction>>;
    async fn list_transactions_between(
        &self,
        user_id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> anyhow::Result<Vec<Transaction>>;
    async fn insert_transaction(&self, txn: &Transaction) -> anyhow::Result<()>;
    async fn update_transaction(
        &self,
        user_id: Uuid,
        id: Uuid,
        fields: &TransactionFields,
    ) -> anyhow::Result<Option<Transaction>>;
    async fn delete_transaction(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool>;

    async fn list_goals(&self, user_id: Uuid) -> anyhow::Result<Vec<Goal>>;
    async fn find_goal(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Goal>>;
    async fn insert_goal(&self, goal: &Goal) -> anyhow::Result<()>;
    async fn update_goal_progress(
        &self,
        user_id: Uuid,
        id: Uuid,
        current_amount: f64,
        status: GoalStatus,
    ) -> anyhow::Result<Option<Goal>>;
    async fn delete_goal(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool>;

    /// Releases underlying connections. Called once after the server stops.
    async fn close(&self) {}
}
