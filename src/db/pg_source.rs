// src/db/pg_source.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::source::SnapshotSource,
    models::{
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
        snapshot::Snapshot,
    },
};

// Carrega o snapshot completo do Postgres. Sempre o conjunto inteiro:
// não há carga parcial nem streaming, o dataset cabe em memória
// (dezenas a poucos milhares de linhas).
pub struct PgSource {
    pool: PgPool,
}

impl PgSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotSource for PgSource {
    async fn load(&self) -> Result<Snapshot, AppError> {
        let franchises = sqlx::query_as::<_, Franchise>("SELECT * FROM franchises ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let leads = sqlx::query_as::<_, Lead>("SELECT * FROM leads ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let lead_notes = sqlx::query_as::<_, LeadNote>("SELECT * FROM lead_notes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let tasks = sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let transactions =
            sqlx::query_as::<_, Transaction>("SELECT * FROM transactions ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let consortium_sales =
            sqlx::query_as::<_, ConsortiumSale>("SELECT * FROM consortium_sales ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let credit_recovery_cases = sqlx::query_as::<_, CreditRecoveryCase>(
            "SELECT * FROM credit_recovery_cases ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let sale_items = sqlx::query_as::<_, SaleItem>("SELECT * FROM sale_items ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let contracts = sqlx::query_as::<_, Contract>("SELECT * FROM contracts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let audits = sqlx::query_as::<_, Audit>("SELECT * FROM audits ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let franchise_users =
            sqlx::query_as::<_, FranchiseUser>("SELECT * FROM franchise_users ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let system_users =
            sqlx::query_as::<_, SystemUser>("SELECT * FROM system_users ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let marketing_campaigns = sqlx::query_as::<_, MarketingCampaign>(
            "SELECT * FROM marketing_campaigns ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        let announcements =
            sqlx::query_as::<_, Announcement>("SELECT * FROM announcements ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let training_courses =
            sqlx::query_as::<_, TrainingCourse>("SELECT * FROM training_courses ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let training_modules =
            sqlx::query_as::<_, TrainingModule>("SELECT * FROM training_modules ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let knowledge_resources = sqlx::query_as::<_, KnowledgeBaseResource>(
            "SELECT * FROM knowledge_resources ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::info!(
            "📦 Snapshot carregado do banco: {} franquias, {} leads, {} transações",
            franchises.len(),
            leads.len(),
            transactions.len()
        );

        Ok(Snapshot {
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
        })
    }
}
