// src/models/finance.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Lançamentos com franchise_id = 0 pertencem à rede (franqueadora),
// nunca a uma unidade.
pub const NETWORK_FRANCHISE_ID: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,  // Entrada
    Expense, // Saída
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,

    // 0 = lançamento da rede
    pub franchise_id: i64,

    #[schema(example = "Royalties de julho")]
    pub description: Option<String>,

    #[schema(example = "3500.00")]
    pub amount: Decimal,

    pub kind: TransactionKind,

    #[schema(value_type = String, format = Date, example = "2026-07-31")]
    pub date: NaiveDate,
}
