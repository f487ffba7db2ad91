//! Domain model for a finance transaction.
use chrono::{DateTime, NaiveDate, Utc};
use shared::TransactionType;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub amount: Option<f64>,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<NaiveDate>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
}

impl Transaction {
    pub fn from_new(id: String, new: NewTransaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            amount: new.amount,
            transaction_type: new.transaction_type,
            date: new.date,
            description: new.description,
            category: new.category,
            created_at,
        }
    }

    pub fn apply(&mut self, update: TransactionUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(transaction_type) = update.transaction_type {
            self.transaction_type = transaction_type;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
    }
}
