// src/models/stats.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::franchise::Franchise;

// Faixa de desempenho derivada do health score.
// Limites inclusivos no piso de cada faixa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum HealthTier {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "On Target")]
    OnTarget,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

// Unidade + métricas derivadas do snapshot.
// Recalculada a cada chamada; nunca é persistida nem mutada.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseWithStats {
    #[serde(flatten)]
    pub franchise: Franchise,

    // Receita bruta (soma das vendas de consórcio)
    #[schema(example = "100000.00")]
    pub consortium_sales: Decimal,

    // Quantidade de casos de recuperação (informativo, fora do score)
    pub credit_recovery_cases: usize,

    // Pode ser negativo
    #[schema(example = "40000.00")]
    pub profit: Decimal,

    // Leads ganhos / leads totais; 0 quando a unidade não tem leads
    #[schema(example = 0.3)]
    pub conversion_rate: f64,

    // Sempre em [0, 100]
    #[schema(example = 90.0)]
    pub health_score: f64,

    pub status: HealthTier,
}

// Consolidado da rede inteira
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub total_revenue: Decimal,
    pub total_profit: Decimal,

    // Média aritmética; 0 quando a rede não tem unidades
    pub average_health_score: f64,
}

// Payload do painel do franqueador
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOverview {
    pub franchises: Vec<FranchiseWithStats>,
    pub network: NetworkStats,
}
