// src/services/stats_service.rs
//
// Converte a atividade bruta de cada unidade em métricas comparáveis.
// Funções puras e totais: nenhum snapshot bem-formado produz erro, e
// registros apontando para unidades desconhecidas simplesmente não
// contribuem para ninguém.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{
    crm::LeadStatus,
    finance::TransactionKind,
    franchise::Franchise,
    snapshot::Snapshot,
    stats::{FranchiseWithStats, HealthTier, NetworkStats},
};

// Metas de normalização do health score. Cada dimensão vale sua fatia
// (40/40/20) quando bate exatamente a meta mensal "boa".
const PROFIT_TARGET: f64 = 50_000.0;
const CONVERSION_TARGET: f64 = 0.25;
const CONSORTIUM_TARGET: f64 = 200_000.0;

// Métricas de uma unidade a partir do snapshot completo.
pub fn stats_for(franchise: &Franchise, snapshot: &Snapshot) -> FranchiseWithStats {
    let consortium_sales: Decimal = snapshot
        .consortium_sales
        .iter()
        .filter(|s| s.franchise_id == franchise.id)
        .map(|s| s.value)
        .sum();

    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for tx in snapshot
        .transactions
        .iter()
        .filter(|t| t.franchise_id == franchise.id)
    {
        match tx.kind {
            TransactionKind::Income => income += tx.amount,
            TransactionKind::Expense => expense += tx.amount,
        }
    }
    // Pode ficar negativo
    let profit = income - expense;

    let total_leads = snapshot
        .leads
        .iter()
        .filter(|l| l.franchise_id == franchise.id)
        .count();
    let won_leads = snapshot
        .leads
        .iter()
        .filter(|l| l.franchise_id == franchise.id && l.status == LeadStatus::Won)
        .count();
    // Unidade sem leads converte 0, nunca NaN
    let conversion_rate = if total_leads == 0 {
        0.0
    } else {
        won_leads as f64 / total_leads as f64
    };

    let health_score = health_score(profit, conversion_rate, consortium_sales);

    let credit_recovery_cases = snapshot
        .credit_recovery_cases
        .iter()
        .filter(|c| c.franchise_id == franchise.id)
        .count();

    FranchiseWithStats {
        franchise: franchise.clone(),
        consortium_sales,
        credit_recovery_cases,
        profit,
        conversion_rate,
        health_score,
        status: tier_for(health_score),
    }
}

// Soma ponderada SEM teto por termo: uma dimensão muito acima da meta
// compensa as outras, e o clamp acontece uma única vez, no resultado.
// Clientes antigos dependem desse comportamento; não limitar por termo.
fn health_score(profit: Decimal, conversion_rate: f64, consortium_sales: Decimal) -> f64 {
    let profit = profit.to_f64().unwrap_or(0.0);
    let consortium = consortium_sales.to_f64().unwrap_or(0.0);

    let raw = (profit / PROFIT_TARGET) * 40.0
        + (conversion_rate / CONVERSION_TARGET) * 40.0
        + (consortium / CONSORTIUM_TARGET) * 20.0;

    raw.clamp(0.0, 100.0)
}

// Piso inclusivo de cada faixa.
pub(crate) fn tier_for(health_score: f64) -> HealthTier {
    if health_score >= 80.0 {
        HealthTier::Excellent
    } else if health_score >= 50.0 {
        HealthTier::OnTarget
    } else {
        HealthTier::NeedsAttention
    }
}

// Uma entrada por unidade, na ordem do snapshot.
pub fn aggregate_all(snapshot: &Snapshot) -> Vec<FranchiseWithStats> {
    snapshot
        .franchises
        .iter()
        .map(|f| stats_for(f, snapshot))
        .collect()
}

// Consolidado da rede sobre as métricas já calculadas.
pub fn network_stats(all: &[FranchiseWithStats]) -> NetworkStats {
    let total_revenue: Decimal = all.iter().map(|s| s.consortium_sales).sum();
    let total_profit: Decimal = all.iter().map(|s| s.profit).sum();
    // Rede vazia tem média 0, nunca NaN
    let average_health_score = if all.is_empty() {
        0.0
    } else {
        all.iter().map(|s| s.health_score).sum::<f64>() / all.len() as f64
    };

    NetworkStats {
        total_revenue,
        total_profit,
        average_health_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::models::{
        consortium::ConsortiumSale,
        crm::Lead,
        finance::{Transaction, NETWORK_FRANCHISE_ID},
    };

    fn franchise(id: i64) -> Franchise {
        Franchise {
            id,
            name: format!("Unidade {id}"),
            location: "Campinas - SP".into(),
            cnpj: None,
            owner_name: None,
            email: None,
            phone: None,
            opened_at: None,
            allowed_product_ids: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn lead(id: i64, franchise_id: i64, status: LeadStatus) -> Lead {
        Lead {
            id,
            franchise_id,
            client_id: 1,
            status,
            negotiated_value: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn tx(id: i64, franchise_id: i64, kind: TransactionKind, amount: i64) -> Transaction {
        Transaction {
            id,
            franchise_id,
            description: None,
            amount: Decimal::from(amount),
            kind,
            date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        }
    }

    fn consortium(id: i64, franchise_id: i64, value: i64) -> ConsortiumSale {
        ConsortiumSale {
            id,
            franchise_id,
            client_id: 1,
            value: Decimal::from(value),
            salesperson_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn conversion_rate_is_zero_without_leads() {
        let snapshot = Snapshot {
            franchises: vec![franchise(1)],
            ..Default::default()
        };
        let stats = stats_for(&snapshot.franchises[0], &snapshot);
        assert_eq!(stats.conversion_rate, 0.0);
        assert!(!stats.conversion_rate.is_nan());
    }

    #[test]
    fn empty_franchise_scores_zero_and_needs_attention() {
        let snapshot = Snapshot {
            franchises: vec![franchise(1)],
            ..Default::default()
        };
        let stats = stats_for(&snapshot.franchises[0], &snapshot);
        assert_eq!(stats.profit, Decimal::ZERO);
        assert_eq!(stats.consortium_sales, Decimal::ZERO);
        assert_eq!(stats.health_score, 0.0);
        assert_eq!(stats.status, HealthTier::NeedsAttention);
    }

    #[test]
    fn health_score_is_clamped_to_bounds() {
        // Prejuízo pesado: o termo de lucro fica muito negativo
        let snapshot = Snapshot {
            franchises: vec![franchise(1)],
            transactions: vec![tx(1, 1, TransactionKind::Expense, 1_000_000)],
            ..Default::default()
        };
        let stats = stats_for(&snapshot.franchises[0], &snapshot);
        assert_eq!(stats.health_score, 0.0);

        // Tudo muito acima da meta satura em 100
        let snapshot = Snapshot {
            franchises: vec![franchise(1)],
            transactions: vec![tx(1, 1, TransactionKind::Income, 10_000_000)],
            leads: vec![lead(1, 1, LeadStatus::Won)],
            consortium_sales: vec![consortium(1, 1, 5_000_000)],
            ..Default::default()
        };
        let stats = stats_for(&snapshot.franchises[0], &snapshot);
        assert_eq!(stats.health_score, 100.0);
    }

    #[test]
    fn one_dimension_compensates_the_others_before_the_clamp() {
        // Lucro de 100k sozinho vale 80 pontos: o termo não tem teto
        // próprio, só o clamp final.
        let snapshot = Snapshot {
            franchises: vec![franchise(1)],
            transactions: vec![tx(1, 1, TransactionKind::Income, 100_000)],
            ..Default::default()
        };
        let stats = stats_for(&snapshot.franchises[0], &snapshot);
        assert!((stats.health_score - 80.0).abs() < 1e-9);
        assert_eq!(stats.status, HealthTier::Excellent);
    }

    #[test]
    fn tier_floors_are_inclusive() {
        assert_eq!(tier_for(100.0), HealthTier::Excellent);
        assert_eq!(tier_for(80.0), HealthTier::Excellent);
        assert_eq!(tier_for(79.999), HealthTier::OnTarget);
        assert_eq!(tier_for(50.0), HealthTier::OnTarget);
        assert_eq!(tier_for(49.999), HealthTier::NeedsAttention);
        assert_eq!(tier_for(0.0), HealthTier::NeedsAttention);
    }

    #[test]
    fn worked_example_scores_ninety() {
        // income 50k, expense 10k (lucro 40k), consórcio 100k,
        // 10 leads com 3 ganhos => 32 + 48 + 10 = 90
        let mut leads = Vec::new();
        for i in 1..=10 {
            let status = if i <= 3 { LeadStatus::Won } else { LeadStatus::Lost };
            leads.push(lead(i, 1, status));
        }
        let snapshot = Snapshot {
            franchises: vec![franchise(1)],
            leads,
            transactions: vec![
                tx(1, 1, TransactionKind::Income, 50_000),
                tx(2, 1, TransactionKind::Expense, 10_000),
            ],
            consortium_sales: vec![consortium(1, 1, 100_000)],
            ..Default::default()
        };

        let stats = stats_for(&snapshot.franchises[0], &snapshot);
        assert_eq!(stats.profit, Decimal::from(40_000));
        assert!((stats.conversion_rate - 0.3).abs() < 1e-12);
        assert!((stats.health_score - 90.0).abs() < 1e-9);
        assert_eq!(stats.status, HealthTier::Excellent);
    }

    #[test]
    fn orphan_records_contribute_to_no_franchise() {
        // Registros da unidade 99 (inexistente) e do nível rede (0)
        // não aparecem em nenhum total.
        let snapshot = Snapshot {
            franchises: vec![franchise(1)],
            transactions: vec![
                tx(1, 99, TransactionKind::Income, 70_000),
                tx(2, NETWORK_FRANCHISE_ID, TransactionKind::Income, 31_000),
            ],
            consortium_sales: vec![consortium(1, 99, 80_000)],
            ..Default::default()
        };
        let stats = stats_for(&snapshot.franchises[0], &snapshot);
        assert_eq!(stats.profit, Decimal::ZERO);
        assert_eq!(stats.consortium_sales, Decimal::ZERO);
    }

    #[test]
    fn network_rollup_sums_and_averages() {
        let snapshot = Snapshot {
            franchises: vec![franchise(1), franchise(2)],
            transactions: vec![
                tx(1, 1, TransactionKind::Income, 50_000),
                tx(2, 2, TransactionKind::Expense, 20_000),
            ],
            consortium_sales: vec![consortium(1, 1, 100_000), consortium(2, 2, 60_000)],
            ..Default::default()
        };

        let all = aggregate_all(&snapshot);
        assert_eq!(all.len(), 2);

        let network = network_stats(&all);
        assert_eq!(network.total_revenue, Decimal::from(160_000));
        assert_eq!(network.total_profit, Decimal::from(30_000));

        let expected = (all[0].health_score + all[1].health_score) / 2.0;
        assert!((network.average_health_score - expected).abs() < 1e-12);
    }

    #[test]
    fn network_rollup_over_empty_and_single() {
        let network = network_stats(&[]);
        assert_eq!(network.average_health_score, 0.0);
        assert_eq!(network.total_revenue, Decimal::ZERO);

        let snapshot = Snapshot {
            franchises: vec![franchise(1)],
            consortium_sales: vec![consortium(1, 1, 100_000)],
            ..Default::default()
        };
        let all = aggregate_all(&snapshot);
        let network = network_stats(&all);
        // Com uma única unidade a média é exatamente o score dela
        assert_eq!(network.average_health_score, all[0].health_score);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let snapshot = Snapshot {
            franchises: vec![franchise(1), franchise(2)],
            leads: vec![lead(1, 1, LeadStatus::Won), lead(2, 1, LeadStatus::New)],
            transactions: vec![tx(1, 1, TransactionKind::Income, 12_345)],
            consortium_sales: vec![consortium(1, 2, 98_765)],
            ..Default::default()
        };

        let first = aggregate_all(&snapshot);
        let second = aggregate_all(&snapshot);
        assert_eq!(first, second);
    }
}
