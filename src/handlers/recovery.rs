// src/handlers/recovery.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    db::WriteReceipt,
    middleware::{auth::AuthenticatedUser, scope::ManagedFranchise},
    models::consortium::CreditRecoveryCase,
    services::scope_service,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecoveryCasePayload {
    pub client_id: i64,

    #[schema(example = "8200.00")]
    pub debt_amount: Decimal,
}

// GET /api/recovery/cases
#[utoipa::path(
    get,
    path = "/api/recovery/cases",
    tag = "Recuperação de Crédito",
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade gerenciada (drill-down do franqueador)")
    ),
    responses(
        (status = 200, description = "Casos da unidade selecionada", body = Vec<CreditRecoveryCase>),
        (status = 404, description = "Unidade selecionada não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_cases(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
) -> Result<Json<Vec<CreditRecoveryCase>>, AppError> {
    let snapshot = app_state.store.snapshot().await;
    let view = scope_service::scoped_view_for(&user, managed.0, &snapshot)?;
    Ok(Json(view.credit_recovery_cases))
}

// POST /api/recovery/cases
#[utoipa::path(
    post,
    path = "/api/recovery/cases",
    tag = "Recuperação de Crédito",
    request_body = CreateRecoveryCasePayload,
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade alvo (obrigatória para o franqueador)")
    ),
    responses(
        (status = 201, description = "Caso aberto com status OPEN", body = WriteReceipt<CreditRecoveryCase>),
        (status = 400, description = "Valor inválido ou unidade não informada"),
        (status = 404, description = "Cliente não encontrado na unidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_case(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
    Json(payload): Json<CreateRecoveryCasePayload>,
) -> Result<impl IntoResponse, AppError> {
    let franchise_id = scope_service::resolve_selected_franchise_id(&user, managed.0)
        .ok_or(AppError::FranchiseScopeRequired)?;

    let (case, durability) = app_state
        .finance_service
        .create_recovery_case(franchise_id, payload.client_id, payload.debt_amount)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WriteReceipt {
            data: case,
            durability,
        }),
    ))
}
