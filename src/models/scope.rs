// src/models/scope.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    auth::FranchiseUser,
    catalog::{
        Announcement, KnowledgeBaseResource, MarketingCampaign, Product, TrainingCourse,
        TrainingModule,
    },
    consortium::{ConsortiumSale, CreditRecoveryCase},
    crm::{Client, Lead, LeadNote},
    finance::Transaction,
    franchise::Franchise,
    operations::{Audit, Task},
    sales::{Contract, Sale, SaleItem},
    stats::FranchiseWithStats,
};

// A fatia do snapshot que o principal está autorizado a ver.
//
// Quando nenhuma unidade está selecionada (franqueador na visão de rede),
// as coleções de unidade vêm vazias e `franchise`/`stats` vêm ausentes;
// os recursos compartilhados passam inteiros em qualquer caso.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScopedView {
    pub franchise: Option<Franchise>,
    pub stats: Option<FranchiseWithStats>,

    // Coleções da unidade selecionada
    pub clients: Vec<Client>,
    pub leads: Vec<Lead>,
    pub lead_notes: Vec<LeadNote>,
    pub tasks: Vec<Task>,
    pub transactions: Vec<Transaction>,
    pub consortium_sales: Vec<ConsortiumSale>,
    pub credit_recovery_cases: Vec<CreditRecoveryCase>,
    pub sales: Vec<Sale>,
    pub sale_items: Vec<SaleItem>,
    pub contracts: Vec<Contract>,
    pub audits: Vec<Audit>,
    pub franchise_users: Vec<FranchiseUser>,

    // Recursos globais, sempre presentes
    pub products: Vec<Product>,
    pub marketing_campaigns: Vec<MarketingCampaign>,
    pub announcements: Vec<Announcement>,
    pub training_courses: Vec<TrainingCourse>,
    pub training_modules: Vec<TrainingModule>,
    pub knowledge_resources: Vec<KnowledgeBaseResource>,
}
