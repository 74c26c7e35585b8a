// src/services/franchise_service.rs

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::{SnapshotStore, WriteDurability},
    models::{
        auth::{CurrentUser, Role},
        franchise::Franchise,
    },
};

#[derive(Clone)]
pub struct FranchiseService {
    store: Arc<SnapshotStore>,
}

impl FranchiseService {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    pub async fn create_franchise(
        &self,
        name: &str,
        location: &str,
        cnpj: Option<String>,
        owner_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        opened_at: Option<NaiveDate>,
        allowed_product_ids: Option<Vec<i64>>,
    ) -> Result<(Franchise, WriteDurability), AppError> {
        self.store
            .create_franchise(
                name,
                location,
                cnpj,
                owner_name,
                email,
                phone,
                opened_at,
                allowed_product_ids,
            )
            .await
    }

    // Franqueador lista a rede inteira; franqueado só a própria unidade.
    pub async fn list_for(&self, user: &CurrentUser) -> Vec<Franchise> {
        let snapshot = self.store.snapshot().await;
        match user.role {
            Role::Franchisor => snapshot.franchises,
            Role::Franchisee => snapshot
                .franchises
                .into_iter()
                .filter(|f| Some(f.id) == user.franchise_id)
                .collect(),
        }
    }
}
