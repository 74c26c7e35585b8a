// src/middleware/scope.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::common::error::AppError;

// O nome do nosso cabeçalho HTTP customizado
const FRANCHISE_ID_HEADER: &str = "x-franchise-id";

// Drill-down do franqueador: qual unidade ele está gerenciando agora.
// O cabeçalho é opcional. Para franqueados o valor é simplesmente
// ignorado pelo resolvedor de escopo: não há como escapar da própria
// unidade por aqui.
#[derive(Debug, Clone, Copy)]
pub struct ManagedFranchise(pub Option<i64>);

impl<S> FromRequestParts<S> for ManagedFranchise
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(FRANCHISE_ID_HEADER) {
            None => Ok(ManagedFranchise(None)),
            Some(value) => {
                let value_str = value
                    .to_str()
                    .map_err(|_| AppError::InvalidFranchiseHeader)?;
                let franchise_id = value_str
                    .parse::<i64>()
                    .map_err(|_| AppError::InvalidFranchiseHeader)?;
                Ok(ManagedFranchise(Some(franchise_id)))
            }
        }
    }
}
