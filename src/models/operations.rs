// src/models/operations.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Tarefa operacional da unidade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub franchise_id: i64,
    pub title: String,
    pub description: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    pub completed: bool,
}

// Auditoria de padrão de rede realizada na unidade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub id: i64,
    pub franchise_id: i64,

    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,

    #[schema(example = 87)]
    pub score: Option<i32>,

    pub notes: Option<String>,
}
