// src/models/consortium.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Venda de cota de consórcio. É a proxy de receita bruta da unidade
// no cálculo de desempenho.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsortiumSale {
    pub id: i64,
    pub franchise_id: i64,
    pub client_id: i64,

    #[schema(example = "45000.00")]
    pub value: Decimal,

    pub salesperson_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "recovery_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryStatus {
    Open,
    Negotiating,
    Recovered,
    WrittenOff,
}

// Caso de recuperação de crédito. Contado nas métricas da unidade,
// mas nunca somado à receita.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditRecoveryCase {
    pub id: i64,
    pub franchise_id: i64,
    pub client_id: i64,

    #[schema(example = "8200.00")]
    pub debt_amount: Decimal,

    pub status: RecoveryStatus,
}
