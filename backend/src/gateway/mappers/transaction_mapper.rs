use crate::domain::models::{NewTransaction, Transaction, TransactionUpdate};
use crate::gateway::error::schema_error;
use crate::gateway::rows::{NewTransactionRow, TransactionPatchRow, TransactionRow};
use crate::gateway::{Collection, RemoteError};

use super::{format_date, parse_date, parse_enum, parse_timestamp};

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_domain(row: TransactionRow) -> Result<Transaction, RemoteError> {
        if !row.amount.is_finite() {
            return Err(schema_error(
                Collection::Transactions,
                format!("amount: {} is not a finite number", row.amount),
            ));
        }

        Ok(Transaction {
            transaction_type: parse_enum(Collection::Transactions, &row.kind)?,
            date: parse_date(Collection::Transactions, "date", &row.date)?,
            created_at: parse_timestamp(Collection::Transactions, "created_at", &row.created_at)?,
            id: row.id,
            amount: row.amount,
            description: row.description,
            category: row.category,
        })
    }

    pub fn to_insert_row(transaction: &NewTransaction) -> NewTransactionRow {
        NewTransactionRow {
            amount: transaction.amount,
            kind: transaction.transaction_type.as_str().to_string(),
            date: format_date(transaction.date),
            description: transaction.description.clone(),
            category: transaction.category.clone(),
        }
    }

    pub fn to_patch_row(changes: &TransactionUpdate) -> TransactionPatchRow {
        TransactionPatchRow {
            amount: changes.amount,
            kind: changes.transaction_type.map(|kind| kind.as_str().to_string()),
            date: changes.date.map(format_date),
            description: changes.description.clone(),
            category: changes.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use shared::TransactionType;

    fn row(kind: &str) -> TransactionRow {
        TransactionRow {
            id: "t-1".to_string(),
            amount: 250.5,
            kind: kind.to_string(),
            date: "2026-10-05".to_string(),
            description: Some("Oferta missionária".to_string()),
            category: None,
            created_at: "2026-10-05T13:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_to_domain() {
        let transaction = TransactionMapper::to_domain(row("tithe")).unwrap();

        assert_eq!(transaction.transaction_type, TransactionType::Tithe);
        assert_eq!(transaction.date, NaiveDate::from_ymd_opt(2026, 10, 5).unwrap());
        assert_eq!(transaction.amount, 250.5);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(TransactionMapper::to_domain(row("donation")).is_err());
    }

    #[test]
    fn test_insert_row_uses_wire_names() {
        let new = NewTransaction {
            amount: 80.0,
            transaction_type: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2026, 10, 7).unwrap(),
            description: None,
            category: Some("Manutenção".to_string()),
        };

        assert_eq!(
            serde_json::to_value(TransactionMapper::to_insert_row(&new)).unwrap(),
            serde_json::json!({
                "amount": 80.0,
                "type": "expense",
                "date": "2026-10-07",
                "category": "Manutenção"
            })
        );
    }
}
