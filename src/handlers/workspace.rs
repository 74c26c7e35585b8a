// src/handlers/workspace.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, scope::ManagedFranchise},
    models::scope::ScopedView,
    services::scope_service,
};

// GET /api/workspace
//
// A visão de trabalho completa do principal: a fatia do snapshot que
// ele pode ver, já com as métricas da unidade selecionada.
#[utoipa::path(
    get,
    path = "/api/workspace",
    tag = "Workspace",
    params(
        ("x-franchise-id" = Option<i64>, Header, description = "Unidade gerenciada (drill-down do franqueador)")
    ),
    responses(
        (status = 200, description = "Fatia visível do snapshot", body = ScopedView),
        (status = 404, description = "Unidade selecionada não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_workspace(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    managed: ManagedFranchise,
) -> Result<Json<ScopedView>, AppError> {
    let snapshot = app_state.store.snapshot().await;
    let view = scope_service::scoped_view_for(&user, managed.0, &snapshot)?;
    Ok(Json(view))
}
