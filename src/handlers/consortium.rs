// src/handlers/consortium.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    db::WriteReceipt,
    middleware::{auth::AuthenticatedUser, scope::ManagedFranchise},
    models::consortium::ConsortiumSale,
    services::scope_service,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsortiumSalePayload {
    pub client_id: i64,

    #[schema(example = "45000.00")]
    pub value: Decimal,

    pub salesperson_id: Option<i64>,
}

// GET /api/consortium/sales
#[utoipa::path(
    get,
    path = "/api/consortium/sales",
    tag = "Consórcio",
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade gerenciada (drill-down do franqueador)")
    ),
    responses(
        (status = 200, description = "Vendas de consórcio da unidade selecionada", body = Vec<ConsortiumSale>),
        (status = 404, description = "Unidade selecionada não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
) -> Result<Json<Vec<ConsortiumSale>>, AppError> {
    let snapshot = app_state.store.snapshot().await;
    let view = scope_service::scoped_view_for(&user, managed.0, &snapshot)?;
    Ok(Json(view.consortium_sales))
}

// POST /api/consortium/sales
#[utoipa::path(
    post,
    path = "/api/consortium/sales",
    tag = "Consórcio",
    request_body = CreateConsortiumSalePayload,
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade alvo (obrigatória para o franqueador)")
    ),
    responses(
        (status = 201, description = "Venda registrada", body = WriteReceipt<ConsortiumSale>),
        (status = 400, description = "Valor inválido ou unidade não informada"),
        (status = 404, description = "Cliente não encontrado na unidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
    Json(payload): Json<CreateConsortiumSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    let franchise_id = scope_service::resolve_selected_franchise_id(&user, managed.0)
        .ok_or(AppError::FranchiseScopeRequired)?;

    let (sale, durability) = app_state
        .finance_service
        .create_consortium_sale(
            franchise_id,
            payload.client_id,
            payload.value,
            payload.salesperson_id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WriteReceipt {
            data: sale,
            durability,
        }),
    ))
}
