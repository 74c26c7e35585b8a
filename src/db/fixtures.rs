// src/db/fixtures.rs
//
// Dataset de demonstração usado quando DATABASE_URL não está definida.
// Os dados são determinísticos para que o ambiente de avaliação seja
// reproduzível. Senha de todos os usuários de demonstração: "franquia123".

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::source::SnapshotSource,
    models::{
        auth::{FranchiseUser, SystemUser},
        catalog::{
            Announcement, KnowledgeBaseResource, MarketingCampaign, Product, TrainingCourse,
            TrainingModule,
        },
        consortium::{ConsortiumSale, CreditRecoveryCase, RecoveryStatus},
        crm::{Client, Lead, LeadNote, LeadStatus},
        finance::{Transaction, TransactionKind, NETWORK_FRANCHISE_ID},
        franchise::Franchise,
        operations::{Audit, Task},
        sales::{Contract, ContractStatus, Sale, SaleItem},
        snapshot::Snapshot,
    },
};

const DEMO_PASSWORD: &str = "franquia123";

pub struct FixtureSource;

#[async_trait]
impl SnapshotSource for FixtureSource {
    async fn load(&self) -> Result<Snapshot, AppError> {
        // O hash é caro de propósito; roda fora do executor como no login.
        let password_hash =
            tokio::task::spawn_blocking(|| bcrypt::hash(DEMO_PASSWORD, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow!("Falha na task de hashing: {}", e))??;

        let snapshot = build_snapshot(&password_hash);
        tracing::info!(
            "📦 Dataset de demonstração carregado: {} franquias, {} leads",
            snapshot.franchises.len(),
            snapshot.leads.len()
        );
        Ok(snapshot)
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("data de fixture inválida")
}

fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .expect("data de fixture inválida")
}

// Valores monetários em reais, duas casas
fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn build_snapshot(password_hash: &str) -> Snapshot {
    let franchises = vec![
        Franchise {
            id: 1,
            name: "Unidade São Paulo".into(),
            location: "São Paulo - SP".into(),
            cnpj: Some("12.345.678/0001-01".into()),
            owner_name: Some("Paula Ribeiro".into()),
            email: Some("sp@redemaestra.com.br".into()),
            phone: Some("(11) 4002-8922".into()),
            opened_at: Some(date(2022, 5, 2)),
            allowed_product_ids: None,
            created_at: ts(2022, 5, 2),
        },
        Franchise {
            id: 2,
            name: "Unidade Campinas".into(),
            location: "Campinas - SP".into(),
            cnpj: Some("12.345.678/0002-82".into()),
            owner_name: Some("Rafael Antunes".into()),
            email: Some("campinas@redemaestra.com.br".into()),
            phone: Some("(19) 3232-1010".into()),
            opened_at: Some(date(2023, 9, 18)),
            allowed_product_ids: Some(vec![1, 2, 3]),
            created_at: ts(2023, 9, 18),
        },
        Franchise {
            id: 3,
            name: "Unidade Belo Horizonte".into(),
            location: "Belo Horizonte - MG".into(),
            cnpj: None,
            owner_name: Some("Denise Carvalho".into()),
            email: Some("bh@redemaestra.com.br".into()),
            phone: None,
            opened_at: Some(date(2025, 11, 3)),
            allowed_product_ids: Some(vec![1]),
            created_at: ts(2025, 11, 3),
        },
    ];

    let clients = vec![
        Client {
            id: 1,
            franchise_id: 1,
            full_name: "Mariana Duarte".into(),
            email: Some("mariana.duarte@gmail.com".into()),
            phone: Some("(11) 98888-1234".into()),
            document_number: Some("123.456.789-09".into()),
            created_at: ts(2026, 1, 12),
        },
        Client {
            id: 2,
            franchise_id: 1,
            full_name: "Jorge Lins".into(),
            email: Some("jorge.lins@hotmail.com".into()),
            phone: None,
            document_number: None,
            created_at: ts(2026, 2, 3),
        },
        Client {
            id: 3,
            franchise_id: 1,
            full_name: "Transportadora Vale Verde Ltda".into(),
            email: Some("contato@valeverde.com.br".into()),
            phone: Some("(11) 3666-0000".into()),
            document_number: Some("98.765.432/0001-10".into()),
            created_at: ts(2026, 3, 21),
        },
        Client {
            id: 4,
            franchise_id: 2,
            full_name: "Beatriz Salgado".into(),
            email: None,
            phone: Some("(19) 99777-4321".into()),
            document_number: None,
            created_at: ts(2026, 4, 8),
        },
        Client {
            id: 5,
            franchise_id: 2,
            full_name: "Osvaldo Pires".into(),
            email: Some("osvaldo.pires@yahoo.com.br".into()),
            phone: None,
            document_number: Some("321.654.987-00".into()),
            created_at: ts(2026, 5, 19),
        },
        Client {
            id: 6,
            franchise_id: 3,
            full_name: "Helena Starling".into(),
            email: Some("helena.starling@gmail.com".into()),
            phone: None,
            document_number: None,
            created_at: ts(2026, 6, 2),
        },
    ];

    let leads = vec![
        Lead {
            id: 1,
            franchise_id: 1,
            client_id: 1,
            status: LeadStatus::Won,
            negotiated_value: Some(money(45_000_00)),
            created_at: ts(2026, 1, 15),
        },
        Lead {
            id: 2,
            franchise_id: 1,
            client_id: 2,
            status: LeadStatus::Negotiating,
            negotiated_value: Some(money(28_000_00)),
            created_at: ts(2026, 2, 10),
        },
        Lead {
            id: 3,
            franchise_id: 1,
            client_id: 3,
            status: LeadStatus::Won,
            negotiated_value: Some(money(120_000_00)),
            created_at: ts(2026, 3, 25),
        },
        Lead {
            id: 4,
            franchise_id: 1,
            client_id: 2,
            status: LeadStatus::Lost,
            negotiated_value: None,
            created_at: ts(2026, 4, 2),
        },
        Lead {
            id: 5,
            franchise_id: 2,
            client_id: 4,
            status: LeadStatus::Contacted,
            negotiated_value: None,
            created_at: ts(2026, 4, 20),
        },
        Lead {
            id: 6,
            franchise_id: 2,
            client_id: 5,
            status: LeadStatus::Won,
            negotiated_value: Some(money(36_500_00)),
            created_at: ts(2026, 5, 22),
        },
        Lead {
            id: 7,
            franchise_id: 3,
            client_id: 6,
            status: LeadStatus::New,
            negotiated_value: None,
            created_at: ts(2026, 6, 5),
        },
    ];

    let lead_notes = vec![
        LeadNote {
            id: 1,
            lead_id: 2,
            author_id: Some(1),
            body: "Pediu proposta revisada com parcela menor.".into(),
            created_at: ts(2026, 2, 14),
        },
        LeadNote {
            id: 2,
            lead_id: 3,
            author_id: Some(1),
            body: "Fechou carta de 120 mil para renovação de frota.".into(),
            created_at: ts(2026, 3, 28),
        },
        LeadNote {
            id: 3,
            lead_id: 5,
            author_id: Some(2),
            body: "Retornar depois do dia 10.".into(),
            created_at: ts(2026, 4, 23),
        },
    ];

    let tasks = vec![
        Task {
            id: 1,
            franchise_id: 1,
            title: "Enviar relatório mensal de vendas".into(),
            description: None,
            due_date: Some(date(2026, 8, 5)),
            completed: true,
        },
        Task {
            id: 2,
            franchise_id: 1,
            title: "Agendar treinamento da equipe nova".into(),
            description: Some("Turma de agosto do curso de vendas".into()),
            due_date: Some(date(2026, 8, 20)),
            completed: false,
        },
        Task {
            id: 3,
            franchise_id: 2,
            title: "Revisar inadimplência do trimestre".into(),
            description: None,
            due_date: None,
            completed: false,
        },
    ];

    let transactions = vec![
        Transaction {
            id: 1,
            franchise_id: 1,
            description: Some("Comissões de consórcio".into()),
            amount: money(50_000_00),
            kind: TransactionKind::Income,
            date: date(2026, 7, 5),
        },
        Transaction {
            id: 2,
            franchise_id: 1,
            description: Some("Folha e aluguel".into()),
            amount: money(10_000_00),
            kind: TransactionKind::Expense,
            date: date(2026, 7, 28),
        },
        Transaction {
            id: 3,
            franchise_id: 2,
            description: Some("Comissões de consórcio".into()),
            amount: money(21_400_00),
            kind: TransactionKind::Income,
            date: date(2026, 7, 9),
        },
        Transaction {
            id: 4,
            franchise_id: 2,
            description: Some("Mídia local".into()),
            amount: money(6_900_00),
            kind: TransactionKind::Expense,
            date: date(2026, 7, 15),
        },
        Transaction {
            id: 5,
            franchise_id: 3,
            description: Some("Despesas de abertura".into()),
            amount: money(18_300_00),
            kind: TransactionKind::Expense,
            date: date(2026, 7, 11),
        },
        // Lançamento da rede: não entra no cálculo de nenhuma unidade
        Transaction {
            id: 6,
            franchise_id: NETWORK_FRANCHISE_ID,
            description: Some("Royalties recebidos da rede".into()),
            amount: money(31_000_00),
            kind: TransactionKind::Income,
            date: date(2026, 7, 31),
        },
    ];

    let consortium_sales = vec![
        ConsortiumSale {
            id: 1,
            franchise_id: 1,
            client_id: 1,
            value: money(45_000_00),
            salesperson_id: Some(1),
            created_at: ts(2026, 1, 20),
        },
        ConsortiumSale {
            id: 2,
            franchise_id: 1,
            client_id: 3,
            value: money(55_000_00),
            salesperson_id: Some(1),
            created_at: ts(2026, 4, 1),
        },
        ConsortiumSale {
            id: 3,
            franchise_id: 2,
            client_id: 5,
            value: money(36_500_00),
            salesperson_id: Some(2),
            created_at: ts(2026, 5, 25),
        },
        ConsortiumSale {
            id: 4,
            franchise_id: 2,
            client_id: 4,
            value: money(12_000_00),
            salesperson_id: None,
            created_at: ts(2026, 6, 30),
        },
    ];

    let credit_recovery_cases = vec![
        CreditRecoveryCase {
            id: 1,
            franchise_id: 1,
            client_id: 2,
            debt_amount: money(8_200_00),
            status: RecoveryStatus::Negotiating,
        },
        CreditRecoveryCase {
            id: 2,
            franchise_id: 2,
            client_id: 4,
            debt_amount: money(3_150_00),
            status: RecoveryStatus::Open,
        },
    ];

    let sales = vec![
        Sale {
            id: 1,
            franchise_id: 1,
            client_id: Some(1),
            total: money(2_400_00),
            date: date(2026, 6, 14),
        },
        Sale {
            id: 2,
            franchise_id: 2,
            client_id: Some(5),
            total: money(1_200_00),
            date: date(2026, 7, 2),
        },
    ];

    let sale_items = vec![
        SaleItem {
            id: 1,
            sale_id: 1,
            product_id: 2,
            quantity: 2,
            unit_price: money(1_200_00),
        },
        SaleItem {
            id: 2,
            sale_id: 2,
            product_id: 1,
            quantity: 1,
            unit_price: money(1_200_00),
        },
    ];

    let contracts = vec![
        Contract {
            id: 1,
            sale_id: 1,
            title: "Contrato de adesão 2026-0014".into(),
            status: ContractStatus::Signed,
            signed_at: Some(date(2026, 6, 16)),
        },
        Contract {
            id: 2,
            sale_id: 2,
            title: "Contrato de adesão 2026-0021".into(),
            status: ContractStatus::Sent,
            signed_at: None,
        },
    ];

    let audits = vec![
        Audit {
            id: 1,
            franchise_id: 1,
            date: date(2026, 5, 11),
            score: Some(92),
            notes: Some("Padrão de loja acima da meta.".into()),
        },
        Audit {
            id: 2,
            franchise_id: 2,
            date: date(2026, 5, 12),
            score: Some(74),
            notes: Some("Pendências na sinalização externa.".into()),
        },
    ];

    let franchise_users = vec![
        FranchiseUser {
            id: 1,
            franchise_id: 1,
            name: "Paula Ribeiro".into(),
            email: "paula@redemaestra.com.br".into(),
            password_hash: password_hash.to_owned(),
            position: Some("Franqueada".into()),
        },
        FranchiseUser {
            id: 2,
            franchise_id: 2,
            name: "Rafael Antunes".into(),
            email: "rafael@redemaestra.com.br".into(),
            password_hash: password_hash.to_owned(),
            position: Some("Franqueado".into()),
        },
    ];

    let system_users = vec![SystemUser {
        id: 1,
        name: "Administração da Rede".into(),
        email: "admin@redemaestra.com.br".into(),
        password_hash: password_hash.to_owned(),
    }];

    let products = vec![
        Product {
            id: 1,
            name: "Consórcio Auto 60x".into(),
            sku: Some("CONS-AUTO-60".into()),
            price: money(1_200_00),
            active: true,
        },
        Product {
            id: 2,
            name: "Consórcio Imóvel 180x".into(),
            sku: Some("CONS-IMOB-180".into()),
            price: money(1_200_00),
            active: true,
        },
        Product {
            id: 3,
            name: "Consórcio Serviços 24x".into(),
            sku: Some("CONS-SERV-24".into()),
            price: money(480_00),
            active: true,
        },
        Product {
            id: 4,
            name: "Consórcio Pesados 100x".into(),
            sku: None,
            price: money(3_800_00),
            active: false,
        },
    ];

    let marketing_campaigns = vec![
        MarketingCampaign {
            id: 1,
            name: "Feirão de Julho".into(),
            description: Some("Carta contemplada com lance facilitado".into()),
            starts_on: date(2026, 7, 1),
            ends_on: Some(date(2026, 7, 31)),
        },
        MarketingCampaign {
            id: 2,
            name: "Indique e Ganhe".into(),
            description: None,
            starts_on: date(2026, 1, 1),
            ends_on: None,
        },
    ];

    let announcements = vec![
        Announcement {
            id: 1,
            title: "Nova tabela de comissões".into(),
            body: "A tabela de comissões de agosto já está disponível no portal.".into(),
            published_at: ts(2026, 7, 25),
        },
        Announcement {
            id: 2,
            title: "Convenção anual da rede".into(),
            body: "Inscrições abertas até 15/09.".into(),
            published_at: ts(2026, 8, 1),
        },
    ];

    let training_courses = vec![
        TrainingCourse {
            id: 1,
            title: "Onboarding do Franqueado".into(),
            description: Some("Trilha obrigatória para novas unidades".into()),
        },
        TrainingCourse {
            id: 2,
            title: "Técnicas de Venda de Consórcio".into(),
            description: None,
        },
    ];

    let training_modules = vec![
        TrainingModule {
            id: 1,
            course_id: 1,
            title: "Padrões da marca".into(),
            content_url: Some("https://portal.redemaestra.com.br/treinamentos/1/1".into()),
            position: 1,
        },
        TrainingModule {
            id: 2,
            course_id: 1,
            title: "Operação do sistema".into(),
            content_url: Some("https://portal.redemaestra.com.br/treinamentos/1/2".into()),
            position: 2,
        },
        TrainingModule {
            id: 3,
            course_id: 2,
            title: "Abordagem consultiva".into(),
            content_url: None,
            position: 1,
        },
    ];

    let knowledge_resources = vec![
        KnowledgeBaseResource {
            id: 1,
            title: "Manual de identidade visual".into(),
            url: "https://portal.redemaestra.com.br/kb/identidade-visual".into(),
            category: Some("Marca".into()),
        },
        KnowledgeBaseResource {
            id: 2,
            title: "FAQ de contemplação".into(),
            url: "https://portal.redemaestra.com.br/kb/faq-contemplacao".into(),
            category: Some("Comercial".into()),
        },
    ];

    Snapshot {
        franchises,
        clients,
        leads,
        lead_notes,
        tasks,
        transactions,
        consortium_sales,
        credit_recovery_cases,
        sales,
        sale_items,
        contracts,
        audits,
        franchise_users,
        system_users,
        products,
        marketing_campaigns,
        announcements,
        training_courses,
        training_modules,
        knowledge_resources,
    }
}
