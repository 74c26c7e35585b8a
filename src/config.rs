// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;

use crate::db::{FixtureSource, PgSource, SnapshotSource, SnapshotStore};
use crate::services::{
    auth::AuthService, crm_service::CrmService, finance_service::FinanceService,
    franchise_service::FranchiseService,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    pub auth_service: AuthService,
    pub franchise_service: FranchiseService,
    pub crm_service: CrmService,
    pub finance_service: FinanceService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // DATABASE_URL é opcional: sem ela o serviço sobe com o dataset
        // de demonstração e escreve apenas em memória.
        let pool = match env::var("DATABASE_URL") {
            Ok(database_url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(&database_url)
                    .await?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                // As migrações precisam rodar antes da carga do snapshot
                sqlx::migrate!().run(&pool).await?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Some(pool)
            }
            Err(_) => {
                tracing::warn!(
                    "DATABASE_URL ausente; subindo com dados de demonstração em memória."
                );
                None
            }
        };

        let source: Box<dyn SnapshotSource> = match &pool {
            Some(pool) => Box::new(PgSource::new(pool.clone())),
            None => Box::new(FixtureSource),
        };
        let snapshot = source.load().await?;

        let store = Arc::new(SnapshotStore::new(snapshot, pool));

        // --- Monta o gráfico de dependências ---
        let auth_service = AuthService::new(store.clone(), jwt_secret);
        let franchise_service = FranchiseService::new(store.clone());
        let crm_service = CrmService::new(store.clone());
        let finance_service = FinanceService::new(store.clone());

        Ok(Self {
            store,
            auth_service,
            franchise_service,
            crm_service,
            finance_service,
        })
    }
}
