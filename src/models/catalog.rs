// src/models/catalog.rs
//
// Recursos globais da rede. Não carregam franchise_id: são visíveis
// para qualquer principal, inclusive sem unidade selecionada.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,

    #[schema(example = "Consórcio Auto 60x")]
    pub name: String,

    pub sku: Option<String>,

    #[schema(example = "1200.00")]
    pub price: Decimal,

    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketingCampaign {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub starts_on: NaiveDate,

    #[schema(value_type = Option<String>, format = Date)]
    pub ends_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainingCourse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainingModule {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub content_url: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseResource {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub category: Option<String>,
}
