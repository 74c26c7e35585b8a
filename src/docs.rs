// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::db::WriteReceipt;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Franquias ---
        handlers::franchises::create_franchise,
        handlers::franchises::list_franchises,
        handlers::franchises::get_franchise_stats,

        // --- Rede ---
        handlers::network::get_network_stats,

        // --- Workspace ---
        handlers::workspace::get_workspace,

        // --- CRM ---
        handlers::crm::list_clients,
        handlers::crm::create_client,
        handlers::crm::list_leads,
        handlers::crm::create_lead,
        handlers::crm::update_lead_status,

        // --- Financeiro ---
        handlers::finance::list_transactions,
        handlers::finance::create_transaction,

        // --- Consórcio ---
        handlers::consortium::list_sales,
        handlers::consortium::create_sale,

        // --- Recuperação de Crédito ---
        handlers::recovery::list_cases,
        handlers::recovery::create_case,

        // --- Catálogo ---
        handlers::catalog::list_products,
        handlers::catalog::list_campaigns,
        handlers::catalog::list_announcements,
        handlers::catalog::list_courses,
        handlers::catalog::list_modules,
        handlers::catalog::list_knowledge,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::CurrentUser,
            models::auth::SystemUser,
            models::auth::FranchiseUser,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Franquias ---
            models::franchise::Franchise,
            handlers::franchises::CreateFranchisePayload,

            // --- CRM ---
            models::crm::LeadStatus,
            models::crm::Client,
            models::crm::Lead,
            models::crm::LeadNote,
            handlers::crm::CreateClientPayload,
            handlers::crm::CreateLeadPayload,
            handlers::crm::UpdateLeadStatusPayload,

            // --- Financeiro ---
            models::finance::TransactionKind,
            models::finance::Transaction,
            handlers::finance::CreateTransactionPayload,

            // --- Consórcio ---
            models::consortium::ConsortiumSale,
            models::consortium::RecoveryStatus,
            models::consortium::CreditRecoveryCase,
            handlers::consortium::CreateConsortiumSalePayload,
            handlers::recovery::CreateRecoveryCasePayload,

            // --- Vendas e Operações ---
            models::sales::Sale,
            models::sales::SaleItem,
            models::sales::ContractStatus,
            models::sales::Contract,
            models::operations::Task,
            models::operations::Audit,

            // --- Catálogo ---
            models::catalog::Product,
            models::catalog::MarketingCampaign,
            models::catalog::Announcement,
            models::catalog::TrainingCourse,
            models::catalog::TrainingModule,
            models::catalog::KnowledgeBaseResource,

            // --- Métricas ---
            models::stats::HealthTier,
            models::stats::FranchiseWithStats,
            models::stats::NetworkStats,
            models::stats::NetworkOverview,

            // --- Escopo ---
            models::scope::ScopedView,

            // --- Escritas ---
            crate::db::WriteDurability,
            WriteReceipt<models::franchise::Franchise>,
            WriteReceipt<models::crm::Client>,
            WriteReceipt<models::crm::Lead>,
            WriteReceipt<models::finance::Transaction>,
            WriteReceipt<models::consortium::ConsortiumSale>,
            WriteReceipt<models::consortium::CreditRecoveryCase>,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Franquias", description = "Gestão das unidades da rede"),
        (name = "Rede", description = "Indicadores consolidados da rede"),
        (name = "Workspace", description = "Visão de trabalho do principal"),
        (name = "CRM", description = "Clientes e leads"),
        (name = "Financeiro", description = "Lançamentos de entrada e saída"),
        (name = "Consórcio", description = "Vendas de cotas de consórcio"),
        (name = "Recuperação de Crédito", description = "Casos de cobrança"),
        (name = "Catálogo", description = "Recursos compartilhados da rede")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
