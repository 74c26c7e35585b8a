// src/db/source.rs

use async_trait::async_trait;

use crate::{common::error::AppError, models::snapshot::Snapshot};

// De onde vem o snapshot inicial: banco remoto quando há credenciais,
// dataset de demonstração quando não há.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load(&self) -> Result<Snapshot, AppError>;
}
