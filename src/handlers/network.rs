// src/handlers/network.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{require_franchisor, AuthenticatedUser},
    models::stats::NetworkOverview,
    services::stats_service,
};

// GET /api/network/stats
#[utoipa::path(
    get,
    path = "/api/network/stats",
    tag = "Rede",
    responses(
        (status = 200, description = "Métricas de todas as unidades + consolidado", body = NetworkOverview),
        (status = 403, description = "Restrito ao franqueador")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_network_stats(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<NetworkOverview>, AppError> {
    require_franchisor(&user)?;

    let snapshot = app_state.store.snapshot().await;
    let franchises = stats_service::aggregate_all(&snapshot);
    let network = stats_service::network_stats(&franchises);

    Ok(Json(NetworkOverview {
        franchises,
        network,
    }))
}
