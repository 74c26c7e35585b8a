// src/handlers/crm.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::WriteReceipt,
    middleware::{auth::AuthenticatedUser, scope::ManagedFranchise},
    models::crm::{Client, Lead, LeadStatus},
    services::scope_service,
};

// =============================================================================
//  CLIENTES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Mariana Duarte")]
    pub full_name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub document_number: Option<String>,
}

// GET /api/crm/clients
#[utoipa::path(
    get,
    path = "/api/crm/clients",
    tag = "CRM",
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade gerenciada (drill-down do franqueador)")
    ),
    responses(
        (status = 200, description = "Clientes da unidade selecionada", body = Vec<Client>),
        (status = 404, description = "Unidade selecionada não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
) -> Result<Json<Vec<Client>>, AppError> {
    let snapshot = app_state.store.snapshot().await;
    let view = scope_service::scoped_view_for(&user, managed.0, &snapshot)?;
    Ok(Json(view.clients))
}

// POST /api/crm/clients
#[utoipa::path(
    post,
    path = "/api/crm/clients",
    tag = "CRM",
    request_body = CreateClientPayload,
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade alvo (obrigatória para o franqueador)")
    ),
    responses(
        (status = 201, description = "Cliente criado", body = WriteReceipt<Client>),
        (status = 400, description = "Dados inválidos ou unidade não informada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    let franchise_id = scope_service::resolve_selected_franchise_id(&user, managed.0)
        .ok_or(AppError::FranchiseScopeRequired)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let (client, durability) = app_state
        .crm_service
        .create_client(
            franchise_id,
            &payload.full_name,
            payload.email,
            payload.phone,
            payload.document_number,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WriteReceipt {
            data: client,
            durability,
        }),
    ))
}

// =============================================================================
//  LEADS
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    pub client_id: i64,

    #[schema(example = "15000.00")]
    pub negotiated_value: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadStatusPayload {
    pub status: LeadStatus,

    // Quando ausente, o valor negociado anterior é mantido
    pub negotiated_value: Option<Decimal>,
}

// GET /api/crm/leads
#[utoipa::path(
    get,
    path = "/api/crm/leads",
    tag = "CRM",
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade gerenciada (drill-down do franqueador)")
    ),
    responses(
        (status = 200, description = "Leads da unidade selecionada", body = Vec<Lead>),
        (status = 404, description = "Unidade selecionada não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
) -> Result<Json<Vec<Lead>>, AppError> {
    let snapshot = app_state.store.snapshot().await;
    let view = scope_service::scoped_view_for(&user, managed.0, &snapshot)?;
    Ok(Json(view.leads))
}

// POST /api/crm/leads
#[utoipa::path(
    post,
    path = "/api/crm/leads",
    tag = "CRM",
    request_body = CreateLeadPayload,
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade alvo (obrigatória para o franqueador)")
    ),
    responses(
        (status = 201, description = "Lead criado com status NEW", body = WriteReceipt<Lead>),
        (status = 404, description = "Cliente não encontrado na unidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    let franchise_id = scope_service::resolve_selected_franchise_id(&user, managed.0)
        .ok_or(AppError::FranchiseScopeRequired)?;

    let (lead, durability) = app_state
        .crm_service
        .create_lead(franchise_id, payload.client_id, payload.negotiated_value)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WriteReceipt {
            data: lead,
            durability,
        }),
    ))
}

// PATCH /api/crm/leads/{id}/status
#[utoipa::path(
    patch,
    path = "/api/crm/leads/{id}/status",
    tag = "CRM",
    request_body = UpdateLeadStatusPayload,
    params(
        ("id" = i64, Path, description = "ID do lead"),
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade alvo (obrigatória para o franqueador)")
    ),
    responses(
        (status = 200, description = "Status atualizado", body = WriteReceipt<Lead>),
        (status = 404, description = "Lead não encontrado na unidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_lead_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
    Path(lead_id): Path<i64>,
    Json(payload): Json<UpdateLeadStatusPayload>,
) -> Result<Json<WriteReceipt<Lead>>, AppError> {
    let franchise_id = scope_service::resolve_selected_franchise_id(&user, managed.0)
        .ok_or(AppError::FranchiseScopeRequired)?;

    let (lead, durability) = app_state
        .crm_service
        .update_lead_status(
            franchise_id,
            lead_id,
            payload.status,
            payload.negotiated_value,
        )
        .await?;

    Ok(Json(WriteReceipt {
        data: lead,
        durability,
    }))
}
