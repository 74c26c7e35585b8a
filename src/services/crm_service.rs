// src/services/crm_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{SnapshotStore, WriteDurability},
    models::crm::{Client, Lead, LeadStatus},
};

#[derive(Clone)]
pub struct CrmService {
    store: Arc<SnapshotStore>,
}

impl CrmService {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    pub async fn create_client(
        &self,
        franchise_id: i64,
        full_name: &str,
        email: Option<String>,
        phone: Option<String>,
        document_number: Option<String>,
    ) -> Result<(Client, WriteDurability), AppError> {
        self.store
            .create_client(franchise_id, full_name, email, phone, document_number)
            .await
    }

    pub async fn create_lead(
        &self,
        franchise_id: i64,
        client_id: i64,
        negotiated_value: Option<Decimal>,
    ) -> Result<(Lead, WriteDurability), AppError> {
        self.store
            .create_lead(franchise_id, client_id, negotiated_value)
            .await
    }

    pub async fn update_lead_status(
        &self,
        franchise_id: i64,
        lead_id: i64,
        status: LeadStatus,
        negotiated_value: Option<Decimal>,
    ) -> Result<(Lead, WriteDurability), AppError> {
        self.store
            .update_lead_status(franchise_id, lead_id, status, negotiated_value)
            .await
    }
}
