// src/handlers/franchises.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::WriteReceipt,
    middleware::auth::{require_franchisor, AuthenticatedUser},
    models::{franchise::Franchise, stats::FranchiseWithStats},
    services::stats_service,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFranchisePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Unidade Curitiba")]
    pub name: String,

    #[validate(length(min = 2, message = "A localização deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Curitiba - PR")]
    pub location: String,

    pub cnpj: Option<String>,
    pub owner_name: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub opened_at: Option<NaiveDate>,
    pub allowed_product_ids: Option<Vec<i64>>,
}

// POST /api/franchises
#[utoipa::path(
    post,
    path = "/api/franchises",
    tag = "Franquias",
    request_body = CreateFranchisePayload,
    responses(
        (status = 201, description = "Franquia criada", body = WriteReceipt<Franchise>),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Restrito ao franqueador")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_franchise(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateFranchisePayload>,
) -> Result<impl IntoResponse, AppError> {
    require_franchisor(&user)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let (franchise, durability) = app_state
        .franchise_service
        .create_franchise(
            &payload.name,
            &payload.location,
            payload.cnpj,
            payload.owner_name,
            payload.email,
            payload.phone,
            payload.opened_at,
            payload.allowed_product_ids,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WriteReceipt {
            data: franchise,
            durability,
        }),
    ))
}

// GET /api/franchises
#[utoipa::path(
    get,
    path = "/api/franchises",
    tag = "Franquias",
    responses(
        (status = 200, description = "Unidades visíveis para o principal", body = Vec<Franchise>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_franchises(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Franchise>>, AppError> {
    Ok(Json(app_state.franchise_service.list_for(&user).await))
}

// GET /api/franchises/{id}/stats
#[utoipa::path(
    get,
    path = "/api/franchises/{id}/stats",
    tag = "Franquias",
    params(
        ("id" = i64, Path, description = "ID da unidade")
    ),
    responses(
        (status = 200, description = "Métricas derivadas da unidade", body = FranchiseWithStats),
        (status = 403, description = "Unidade de outro franqueado"),
        (status = 404, description = "Franquia não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_franchise_stats(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<FranchiseWithStats>, AppError> {
    // Franqueado só consulta a própria unidade
    if !user.is_franchisor() && user.franchise_id != Some(id) {
        return Err(AppError::Forbidden);
    }

    let snapshot = app_state.store.snapshot().await;
    let franchise = snapshot.find_franchise(id).ok_or(AppError::FranchiseNotFound)?;

    Ok(Json(stats_service::stats_for(franchise, &snapshot)))
}
