// src/models/snapshot.rs

use crate::models::{
    auth::{FranchiseUser, SystemUser},
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
};

// O conjunto completo de coleções em memória num instante.
// É um VALOR: o núcleo de cálculo recebe um clone e nunca enxerga o
// armazenamento por trás. Ids são únicos dentro de cada coleção; nenhuma
// ordenação é garantida.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub franchises: Vec<Franchise>,

    // Coleções de unidade (particionadas por franchise_id)
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

    // Usuários da franqueadora (globais)
    pub system_users: Vec<SystemUser>,

    // Recursos compartilhados da rede
    pub products: Vec<Product>,
    pub marketing_campaigns: Vec<MarketingCampaign>,
    pub announcements: Vec<Announcement>,
    pub training_courses: Vec<TrainingCourse>,
    pub training_modules: Vec<TrainingModule>,
    pub knowledge_resources: Vec<KnowledgeBaseResource>,
}

impl Snapshot {
    pub fn find_franchise(&self, id: i64) -> Option<&Franchise> {
        self.franchises.iter().find(|f| f.id == id)
    }
}
