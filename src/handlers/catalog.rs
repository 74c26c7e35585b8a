// src/handlers/catalog.rs
//
// Recursos compartilhados da rede: passam inteiros para qualquer
// principal autenticado, com ou sem unidade selecionada.

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::catalog::{
        Announcement, KnowledgeBaseResource, MarketingCampaign, Product, TrainingCourse,
        TrainingModule,
    },
};

// GET /api/catalog/products
#[utoipa::path(
    get,
    path = "/api/catalog/products",
    tag = "Catálogo",
    responses((status = 200, description = "Catálogo de produtos da rede", body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(app_state.store.snapshot().await.products))
}

// GET /api/catalog/campaigns
#[utoipa::path(
    get,
    path = "/api/catalog/campaigns",
    tag = "Catálogo",
    responses((status = 200, description = "Campanhas de marketing da rede", body = Vec<MarketingCampaign>)),
    security(("api_jwt" = []))
)]
pub async fn list_campaigns(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<Vec<MarketingCampaign>>, AppError> {
    Ok(Json(app_state.store.snapshot().await.marketing_campaigns))
}

// GET /api/catalog/announcements
#[utoipa::path(
    get,
    path = "/api/catalog/announcements",
    tag = "Catálogo",
    responses((status = 200, description = "Comunicados da franqueadora", body = Vec<Announcement>)),
    security(("api_jwt" = []))
)]
pub async fn list_announcements(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<Vec<Announcement>>, AppError> {
    Ok(Json(app_state.store.snapshot().await.announcements))
}

// GET /api/catalog/courses
#[utoipa::path(
    get,
    path = "/api/catalog/courses",
    tag = "Catálogo",
    responses((status = 200, description = "Cursos de treinamento", body = Vec<TrainingCourse>)),
    security(("api_jwt" = []))
)]
pub async fn list_courses(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<Vec<TrainingCourse>>, AppError> {
    Ok(Json(app_state.store.snapshot().await.training_courses))
}

// GET /api/catalog/modules
#[utoipa::path(
    get,
    path = "/api/catalog/modules",
    tag = "Catálogo",
    responses((status = 200, description = "Módulos dos cursos", body = Vec<TrainingModule>)),
    security(("api_jwt" = []))
)]
pub async fn list_modules(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<Vec<TrainingModule>>, AppError> {
    Ok(Json(app_state.store.snapshot().await.training_modules))
}

// GET /api/catalog/knowledge
#[utoipa::path(
    get,
    path = "/api/catalog/knowledge",
    tag = "Catálogo",
    responses((status = 200, description = "Base de conhecimento", body = Vec<KnowledgeBaseResource>)),
    security(("api_jwt" = []))
)]
pub async fn list_knowledge(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Json<Vec<KnowledgeBaseResource>>, AppError> {
    Ok(Json(app_state.store.snapshot().await.knowledge_resources))
}
