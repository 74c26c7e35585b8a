// src/services/scope_service.rs
//
// Decide qual fatia do snapshot o principal autenticado pode ver.
// A fronteira de autorização inteira é `resolve_selected_franchise_id`:
// não existe checagem secundária depois dela.

use std::collections::HashSet;

use crate::{
    common::error::AppError,
    models::{
        auth::{CurrentUser, Role},
        scope::ScopedView,
        snapshot::Snapshot,
    },
    services::stats_service,
};

// Qual unidade está "selecionada" para o principal.
//
// - FRANCHISOR com drill-down explícito -> a unidade pedida
// - FRANCHISEE -> SEMPRE a própria unidade; o pedido é ignorado
// - FRANCHISOR sem drill-down -> nenhuma (visão de rede)
pub fn resolve_selected_franchise_id(
    user: &CurrentUser,
    managed_franchise_id: Option<i64>,
) -> Option<i64> {
    match user.role {
        Role::Franchisor => managed_franchise_id,
        Role::Franchisee => user.franchise_id,
    }
}

// Projeta o snapshot para a unidade selecionada.
//
// - Seleção apontando para unidade inexistente -> None (ausência, não erro)
// - Sem seleção -> coleções de unidade vazias, recursos globais inteiros
pub fn project_scoped_view(
    selected_franchise_id: Option<i64>,
    snapshot: &Snapshot,
) -> Option<ScopedView> {
    let franchise = match selected_franchise_id {
        Some(id) => match snapshot.find_franchise(id) {
            Some(f) => Some(f.clone()),
            None => return None,
        },
        None => None,
    };

    let owns = |franchise_id: i64| Some(franchise_id) == selected_franchise_id;

    let leads: Vec<_> = snapshot
        .leads
        .iter()
        .filter(|l| owns(l.franchise_id))
        .cloned()
        .collect();
    let lead_ids: HashSet<i64> = leads.iter().map(|l| l.id).collect();

    let sales: Vec<_> = snapshot
        .sales
        .iter()
        .filter(|s| owns(s.franchise_id))
        .cloned()
        .collect();
    let sale_ids: HashSet<i64> = sales.iter().map(|s| s.id).collect();

    let stats = franchise
        .as_ref()
        .map(|f| stats_service::stats_for(f, snapshot));

    Some(ScopedView {
        franchise,
        stats,
        clients: snapshot
            .clients
            .iter()
            .filter(|c| owns(c.franchise_id))
            .cloned()
            .collect(),
        leads,
        // Escopo transitivo: nota -> lead -> unidade
        lead_notes: snapshot
            .lead_notes
            .iter()
            .filter(|n| lead_ids.contains(&n.lead_id))
            .cloned()
            .collect(),
        tasks: snapshot
            .tasks
            .iter()
            .filter(|t| owns(t.franchise_id))
            .cloned()
            .collect(),
        transactions: snapshot
            .transactions
            .iter()
            .filter(|t| owns(t.franchise_id))
            .cloned()
            .collect(),
        consortium_sales: snapshot
            .consortium_sales
            .iter()
            .filter(|s| owns(s.franchise_id))
            .cloned()
            .collect(),
        credit_recovery_cases: snapshot
            .credit_recovery_cases
            .iter()
            .filter(|c| owns(c.franchise_id))
            .cloned()
            .collect(),
        sales,
        // Escopo transitivo: item/contrato -> venda -> unidade
        sale_items: snapshot
            .sale_items
            .iter()
            .filter(|i| sale_ids.contains(&i.sale_id))
            .cloned()
            .collect(),
        contracts: snapshot
            .contracts
            .iter()
            .filter(|c| sale_ids.contains(&c.sale_id))
            .cloned()
            .collect(),
        audits: snapshot
            .audits
            .iter()
            .filter(|a| owns(a.franchise_id))
            .cloned()
            .collect(),
        franchise_users: snapshot
            .franchise_users
            .iter()
            .filter(|u| owns(u.franchise_id))
            .cloned()
            .collect(),
        // Recursos compartilhados passam inteiros em qualquer escopo
        products: snapshot.products.clone(),
        marketing_campaigns: snapshot.marketing_campaigns.clone(),
        announcements: snapshot.announcements.clone(),
        training_courses: snapshot.training_courses.clone(),
        training_modules: snapshot.training_modules.clone(),
        knowledge_resources: snapshot.knowledge_resources.clone(),
    })
}

// Conveniência para os handlers: resolve + projeta, traduzindo a
// ausência em 404 na borda HTTP.
pub fn scoped_view_for(
    user: &CurrentUser,
    managed_franchise_id: Option<i64>,
    snapshot: &Snapshot,
) -> Result<ScopedView, AppError> {
    let selected = resolve_selected_franchise_id(user, managed_franchise_id);
    project_scoped_view(selected, snapshot).ok_or(AppError::FranchiseNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use crate::models::{
        catalog::Product,
        crm::{Client, Lead, LeadNote, LeadStatus},
        franchise::Franchise,
        sales::{Contract, ContractStatus, Sale, SaleItem},
    };

    fn franchise(id: i64) -> Franchise {
        Franchise {
            id,
            name: format!("Unidade {id}"),
            location: "Belo Horizonte - MG".into(),
            cnpj: None,
            owner_name: None,
            email: None,
            phone: None,
            opened_at: None,
            allowed_product_ids: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn client(id: i64, franchise_id: i64) -> Client {
        Client {
            id,
            franchise_id,
            full_name: format!("Cliente {id}"),
            email: None,
            phone: None,
            document_number: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn lead(id: i64, franchise_id: i64) -> Lead {
        Lead {
            id,
            franchise_id,
            client_id: 1,
            status: LeadStatus::New,
            negotiated_value: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn note(id: i64, lead_id: i64) -> LeadNote {
        LeadNote {
            id,
            lead_id,
            author_id: None,
            body: "nota".into(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn sale(id: i64, franchise_id: i64) -> Sale {
        Sale {
            id,
            franchise_id,
            client_id: None,
            total: Decimal::from(100),
            date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        }
    }

    fn product(id: i64) -> Product {
        Product {
            id,
            name: format!("Produto {id}"),
            sku: None,
            price: Decimal::from(10),
            active: true,
        }
    }

    fn franchisor() -> CurrentUser {
        CurrentUser {
            id: 1,
            name: "Admin".into(),
            email: "admin@rede.com".into(),
            role: Role::Franchisor,
            franchise_id: None,
        }
    }

    fn franchisee(franchise_id: i64) -> CurrentUser {
        CurrentUser {
            id: 2,
            name: "Operador".into(),
            email: "op@rede.com".into(),
            role: Role::Franchisee,
            franchise_id: Some(franchise_id),
        }
    }

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            franchises: vec![franchise(1), franchise(2)],
            clients: vec![client(1, 1), client(2, 2)],
            leads: vec![lead(1, 1), lead(2, 2)],
            lead_notes: vec![note(1, 1), note(2, 2)],
            sales: vec![sale(1, 1), sale(2, 2)],
            sale_items: vec![
                SaleItem {
                    id: 1,
                    sale_id: 1,
                    product_id: 1,
                    quantity: 1,
                    unit_price: Decimal::from(100),
                },
                SaleItem {
                    id: 2,
                    sale_id: 2,
                    product_id: 1,
                    quantity: 2,
                    unit_price: Decimal::from(50),
                },
            ],
            contracts: vec![
                Contract {
                    id: 1,
                    sale_id: 1,
                    title: "Contrato 1".into(),
                    status: ContractStatus::Draft,
                    signed_at: None,
                },
                Contract {
                    id: 2,
                    sale_id: 2,
                    title: "Contrato 2".into(),
                    status: ContractStatus::Signed,
                    signed_at: None,
                },
            ],
            products: vec![product(1), product(2)],
            ..Default::default()
        }
    }

    #[test]
    fn franchisee_selection_ignores_managed_id() {
        let user = franchisee(1);
        // Mesmo pedindo a unidade 2, o franqueado continua preso à 1
        assert_eq!(resolve_selected_franchise_id(&user, Some(2)), Some(1));
        assert_eq!(resolve_selected_franchise_id(&user, None), Some(1));
    }

    #[test]
    fn franchisor_selection_follows_managed_id() {
        let user = franchisor();
        assert_eq!(resolve_selected_franchise_id(&user, Some(2)), Some(2));
        assert_eq!(resolve_selected_franchise_id(&user, None), None);
    }

    #[test]
    fn null_selection_keeps_globals_and_empties_the_rest() {
        let snapshot = sample_snapshot();
        let view = project_scoped_view(None, &snapshot).unwrap();

        assert!(view.franchise.is_none());
        assert!(view.stats.is_none());
        assert!(view.clients.is_empty());
        assert!(view.leads.is_empty());
        assert!(view.sales.is_empty());
        assert!(view.contracts.is_empty());
        // Globais continuam visíveis na visão de rede
        assert_eq!(view.products.len(), 2);
    }

    #[test]
    fn unknown_franchise_projects_to_none() {
        let snapshot = sample_snapshot();
        assert!(project_scoped_view(Some(99), &snapshot).is_none());
    }

    #[test]
    fn projection_filters_direct_and_transitive_collections() {
        let snapshot = sample_snapshot();
        let view = project_scoped_view(Some(1), &snapshot).unwrap();

        assert_eq!(view.franchise.as_ref().map(|f| f.id), Some(1));
        assert!(view.stats.is_some());

        assert_eq!(view.clients.iter().map(|c| c.id).collect::<Vec<_>>(), [1]);
        assert_eq!(view.leads.iter().map(|l| l.id).collect::<Vec<_>>(), [1]);
        // Transitivo: nota da unidade 2 não aparece
        assert_eq!(view.lead_notes.iter().map(|n| n.id).collect::<Vec<_>>(), [1]);
        assert_eq!(view.sale_items.iter().map(|i| i.id).collect::<Vec<_>>(), [1]);
        assert_eq!(view.contracts.iter().map(|c| c.id).collect::<Vec<_>>(), [1]);

        // Globais inteiros mesmo com unidade selecionada
        assert_eq!(view.products.len(), 2);
    }

    #[test]
    fn franchisee_never_sees_another_franchise() {
        let snapshot = sample_snapshot();
        let user = franchisee(1);

        // Tentativa de drill-down na unidade 2 é ignorada
        let selected = resolve_selected_franchise_id(&user, Some(2));
        let view = project_scoped_view(selected, &snapshot).unwrap();

        assert_eq!(view.franchise.as_ref().map(|f| f.id), Some(1));
        assert!(view.clients.iter().all(|c| c.franchise_id == 1));
        assert!(view.leads.iter().all(|l| l.franchise_id == 1));
        assert!(view.sales.iter().all(|s| s.franchise_id == 1));
    }

    #[test]
    fn scoped_view_for_maps_absence_to_not_found() {
        let snapshot = sample_snapshot();

        let err = scoped_view_for(&franchisor(), Some(99), &snapshot).unwrap_err();
        assert!(matches!(err, AppError::FranchiseNotFound));

        // Visão de rede não é ausência
        assert!(scoped_view_for(&franchisor(), None, &snapshot).is_ok());
    }
}
