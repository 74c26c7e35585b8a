// src/models/crm.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- ENUMS ---

// Mapeia o CREATE TYPE lead_status do banco.
// Não há máquina de estados: qualquer status pode suceder qualquer outro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    New,
    Contacted,
    Negotiating,
    Won,
    Lost,
}

// --- CLIENTE ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,

    #[schema(example = 1)]
    pub franchise_id: i64,

    #[schema(example = "Mariana Duarte")]
    pub full_name: String,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_number: Option<String>,

    pub created_at: DateTime<Utc>,
}

// --- LEAD (Oportunidade de venda) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub franchise_id: i64,
    pub client_id: i64,

    pub status: LeadStatus,

    // Valor em negociação; em geral só existe a partir de NEGOTIATING.
    #[schema(example = "15000.00")]
    pub negotiated_value: Option<Decimal>,

    pub created_at: DateTime<Utc>,
}

// Anotação de follow-up. Pertence à unidade através do Lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadNote {
    pub id: i64,
    pub lead_id: i64,
    pub author_id: Option<i64>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
