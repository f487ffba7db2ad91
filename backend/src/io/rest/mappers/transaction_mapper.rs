use shared::{
    CreateTransactionRequest, Transaction as TransactionDto, UpdateTransactionRequest,
};

use crate::domain::models::{NewTransaction, Transaction, TransactionUpdate};
use crate::io::rest::error::ApiError;

use super::{format_date, parse_amount, parse_date};

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(domain: Transaction) -> TransactionDto {
        TransactionDto {
            id: domain.id,
            amount: domain.amount,
            transaction_type: domain.transaction_type,
            date: format_date(domain.date),
            description: domain.description,
            category: domain.category,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_new(request: CreateTransactionRequest) -> Result<NewTransaction, ApiError> {
        Ok(NewTransaction {
            amount: parse_amount("amount", request.amount)?,
            transaction_type: request.transaction_type,
            date: parse_date("date", &request.date)?,
            description: request.description,
            category: request.category,
        })
    }

    pub fn to_update(request: UpdateTransactionRequest) -> Result<TransactionUpdate, ApiError> {
        Ok(TransactionUpdate {
            amount: request
                .amount
                .map(|amount| parse_amount("amount", amount))
                .transpose()?,
            date: request
                .date
                .as_deref()
                .map(|value| parse_date("date", value))
                .transpose()?,
            transaction_type: request.transaction_type,
            description: request.description,
            category: request.category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use shared::TransactionType;

    #[test]
    fn test_to_new() {
        let new = TransactionMapper::to_new(CreateTransactionRequest {
            amount: 320.0,
            transaction_type: TransactionType::Income,
            date: "2026-10-04".to_string(),
            description: Some("Bazar".to_string()),
            category: None,
        })
        .unwrap();

        assert_eq!(new.date, NaiveDate::from_ymd_opt(2026, 10, 4).unwrap());
        assert_eq!(new.transaction_type, TransactionType::Income);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let result = TransactionMapper::to_update(UpdateTransactionRequest {
            date: Some("4 de outubro".to_string()),
            ..Default::default()
        });

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
