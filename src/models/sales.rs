// src/models/sales.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub franchise_id: i64,
    pub client_id: Option<i64>,
    pub total: Decimal,

    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
}

// Item de venda; pertence à unidade através da Sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contract_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Draft,
    Sent,
    Signed,
    Cancelled,
}

// Contrato emitido a partir de uma venda; escopo via Sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i64,
    pub sale_id: i64,
    pub title: String,
    pub status: ContractStatus,

    #[schema(value_type = Option<String>, format = Date)]
    pub signed_at: Option<NaiveDate>,
}
