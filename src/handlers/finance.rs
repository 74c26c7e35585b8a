// src/handlers/finance.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    db::WriteReceipt,
    middleware::{auth::AuthenticatedUser, scope::ManagedFranchise},
    models::finance::{Transaction, TransactionKind, NETWORK_FRANCHISE_ID},
    services::scope_service,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    #[schema(example = "Comissões de consórcio")]
    pub description: Option<String>,

    #[schema(example = "3500.00")]
    pub amount: Decimal,

    pub kind: TransactionKind,

    #[schema(value_type = String, format = Date, example = "2026-07-31")]
    pub date: NaiveDate,
}

// GET /api/finance/transactions
#[utoipa::path(
    get,
    path = "/api/finance/transactions",
    tag = "Financeiro",
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade gerenciada (drill-down do franqueador)")
    ),
    responses(
        (status = 200, description = "Lançamentos da unidade selecionada", body = Vec<Transaction>),
        (status = 404, description = "Unidade selecionada não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let snapshot = app_state.store.snapshot().await;
    let view = scope_service::scoped_view_for(&user, managed.0, &snapshot)?;
    Ok(Json(view.transactions))
}

// POST /api/finance/transactions
//
// Franqueador sem unidade selecionada lança no nível rede
// (franchise_id = 0); franqueado sempre lança na própria unidade.
#[utoipa::path(
    post,
    path = "/api/finance/transactions",
    tag = "Financeiro",
    request_body = CreateTransactionPayload,
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade alvo (ausente = lançamento da rede)")
    ),
    responses(
        (status = 201, description = "Lançamento criado", body = WriteReceipt<Transaction>),
        (status = 400, description = "Valor inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let franchise_id = scope_service::resolve_selected_franchise_id(&user, managed.0)
        .unwrap_or(NETWORK_FRANCHISE_ID);

    let (transaction, durability) = app_state
        .finance_service
        .create_transaction(
            franchise_id,
            payload.description,
            payload.amount,
            payload.kind,
            payload.date,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WriteReceipt {
            data: transaction,
            durability,
        }),
    ))
}
