use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => anyhow::bail!("unknown transaction type {other:?}"),
        }
    }
}

/// Fields a caller controls; shared by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFields {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_id: Uuid,
    pub description: String,
    #[serde(with = "crate::timefmt")]
    pub date: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_id: Uuid,
    pub description: String,
    #[serde(with = "crate::timefmt")]
    pub date: OffsetDateTime,
    #[serde(with = "crate::timefmt")]
    pub created_at: OffsetDateTime,
}

impl Transaction {
    pub fn new(user_id: Uuid, fields: TransactionFields, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            amount: fields.amount,
            kind: fields.kind,
            category_id: fields.category_id,
            description: fields.description,
            date: fields.date,
            created_at: now,
        }
    }

    #[cfg(test)]
    pub fn apply(&mut self, fields: &TransactionFields) {
        self.amount = fields.amount;
        self.kind = fields.kind;
        self.category_id = fields.category_id;
        self.description = fields.description.clone();
        self.date = fields.date;
    }
}

#[derive(Debug, FromRow)]
pub struct TransactionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub kind: String,
    pub category_id: Uuid,
    pub description: String,
    pub date: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = anyhow::Error;

    fn try_from(r: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            amount: r.amount,
            kind: r.kind.parse()?,
            category_id: r.category_id,
            description: r.description,
            date: r.date,
            created_at: r.created_at,
        })
    }
}
