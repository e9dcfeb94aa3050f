use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::Store;
use crate::{
    auth::repo_types::{Session, User},
    categories::repo_types::Category,
    goals::repo_types::{Goal, GoalStatus},
    transactions::repo_types::{Transaction, TransactionFields},
};

/// In-process store used by unit tests. Mirrors the filtering and ordering
/// of the SQL queries.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    sessions: Mutex<Vec<Session>>,
    categories: Mutex<Vec<Category>>,
    transactions: Mutex<Vec<Transaction>>,
    goals: Mutex<Vec<Goal>>,
    session_lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn session_lookups(&self) -> usize {
        self.session_lookups.load(Ordering::SeqCst)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: &User) -> anyhow::Result<()> {
        let mut users = self.users.lock().unwrap();
        anyhow::ensure!(
            users.iter().all(|u| u.email != user.email),
            "duplicate email"
        );
        users.push(user.clone());
        Ok(())
    }

    async fn insert_session(&self, session: &Session) -> anyhow::Result<()> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn find_session_by_token(&self, token: &str) -> anyhow::Result<Option<Session>> {
        self.session_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.session_token == token)
            .max_by_key(|s| s.expires_at)
            .cloned())
    }

    async fn delete_sessions_by_token(&self, token: &str) -> anyhow::Result<u64> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.session_token != token);
        Ok((before - sessions.len()) as u64)
    }

    async fn list_categories(&self, user_id: Uuid) -> anyhow::Result<Vec<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_category(&self, category: &Category) -> anyhow::Result<()> {
        self.categories.lock().unwrap().push(category.clone());
        Ok(())
    }

    async fn delete_category(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(categories.len() < before)
    }

    async fn list_transactions(&self, user_id: Uuid) -> anyhow::Result<Vec<Transaction>> {
        let mut out: Vec<Transaction> = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(out)
    }

    async fn list_transactions_between(
        &self,
        user_id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> anyhow::Result<Vec<Transaction>> {
        let mut out: Vec<Transaction> = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id && t.date >= start && t.date < end)
            .cloned()
            .collect();
        out.sort_by_key(|t| t.date);
        Ok(out)
    }

    async fn insert_transaction(&self, txn: &Transaction) -> anyhow::Result<()> {
        self.transactions.lock().unwrap().push(txn.clone());
        Ok(())
    }

    async fn update_transaction(
        &self,
        user_id: Uuid,
        id: Uuid,
        fields: &TransactionFields,
    ) -> anyhow::Result<Option<Transaction>> {
        let mut txns = self.transactions.lock().unwrap();
        Ok(txns
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
            .map(|t| {
                t.apply(fields);
                t.clone()
            }))
    }

    async fn delete_transaction(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut txns = self.transactions.lock().unwrap();
        let before = txns.len();
        txns.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(txns.len() < before)
    }

    async fn list_goals(&self, user_id: Uuid) -> anyhow::Result<Vec<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_goal(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Goal>> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id && g.user_id == user_id)
            .cloned())
    }

    async fn insert_goal(&self, goal: &Goal) -> anyhow::Result<()> {
        self.goals.lock().unwrap().push(goal.clone());
        Ok(())
    }

    async fn update_goal_progress(
        &self,
        user_id: Uuid,
        id: Uuid,
        current_amount: f64,
        status: GoalStatus,
    ) -> anyhow::Result<Option<Goal>> {
        let mut goals = self.goals.lock().unwrap();
        Ok(goals
            .iter_mut()
            .find(|g| g.id == id && g.user_id == user_id)
            .map(|g| {
                g.current_amount = current_amount;
                g.status = status;
                g.clone()
            }))
    }

    async fn delete_goal(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut goals = self.goals.lock().unwrap();
        let before = goals.len();
        goals.retain(|g| !(g.id == id && g.user_id == user_id));
        Ok(goals.len() < before)
    }
}
