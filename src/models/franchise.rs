// src/models/franchise.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// A unidade da rede (o "tenant" do sistema).
// Criada pelo franqueador; nunca é removida no fluxo normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Franchise {
    pub id: i64,

    #[schema(example = "Unidade Campinas")]
    pub name: String,

    #[schema(example = "Campinas - SP")]
    pub location: String,

    // Dados cadastrais, opcionais no cadastro inicial
    pub cnpj: Option<String>,
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-03-01")]
    pub opened_at: Option<NaiveDate>,

    // Produtos do catálogo liberados para a unidade.
    // None = catálogo inteiro liberado.
    pub allowed_product_ids: Option<Vec<i64>>,

    pub created_at: DateTime<Utc>,
}
