// src/services/finance_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{SnapshotStore, WriteDurability},
    models::{
        consortium::{ConsortiumSale, CreditRecoveryCase},
        finance::{Transaction, TransactionKind},
    },
};

#[derive(Clone)]
pub struct FinanceService {
    store: Arc<SnapshotStore>,
}

impl FinanceService {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    pub async fn create_transaction(
        &self,
        franchise_id: i64,
        description: Option<String>,
        amount: Decimal,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Result<(Transaction, WriteDurability), AppError> {
        // Valores não positivos não fazem sentido em nenhum dos dois tipos
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount);
        }
        self.store
            .create_transaction(franchise_id, description, amount, kind, date)
            .await
    }

    pub async fn create_consortium_sale(
        &self,
        franchise_id: i64,
        client_id: i64,
        value: Decimal,
        salesperson_id: Option<i64>,
    ) -> Result<(ConsortiumSale, WriteDurability), AppError> {
        if value <= Decimal::ZERO {
            return Err(AppError::InvalidAmount);
        }
        self.store
            .create_consortium_sale(franchise_id, client_id, value, salesperson_id)
            .await
    }

    pub async fn create_recovery_case(
        &self,
        franchise_id: i64,
        client_id: i64,
        debt_amount: Decimal,
    ) -> Result<(CreditRecoveryCase, WriteDurability), AppError> {
        if debt_amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount);
        }
        self.store
            .create_recovery_case(franchise_id, client_id, debt_amount)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snapshot::Snapshot;

    #[tokio::test]
    async fn non_positive_amounts_are_rejected() {
        let store = Arc::new(SnapshotStore::new(Snapshot::default(), None));
        let service = FinanceService::new(store);

        let err = service
            .create_transaction(
                1,
                None,
                Decimal::ZERO,
                TransactionKind::Income,
                NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount));

        let err = service
            .create_consortium_sale(1, 1, Decimal::from(-5), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount));
    }
}
