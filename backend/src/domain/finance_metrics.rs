//! Finance totals for the Finance page and the dashboard income card.
//!
//! Tithes and plain income both count as income; only `expense` transactions
//! count as expenses. Amounts are summed as recorded, with no rounding.

use shared::{FinanceSummary, TransactionType};

use crate::domain::models::Transaction;

/// Sum a transaction list into income, expense, balance and tithe totals
pub fn summarize_transactions(transactions: &[Transaction]) -> FinanceSummary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut tithes_total = 0.0;

    for transaction in transactions {
        if transaction.transaction_type.is_expense() {
            total_expenses += transaction.amount;
        } else {
            total_income += transaction.amount;
        }
        if transaction.transaction_type == TransactionType::Tithe {
            tithes_total += transaction.amount;
        }
    }

    FinanceSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        tithes_total,
    }
}
