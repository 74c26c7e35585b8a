//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Rotas de autenticação: login é público, /me exige token
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .merge(
            Router::new()
                .route("/me", get(handlers::auth::get_me))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    let franchise_routes = Router::new()
        .route(
            "/",
            post(handlers::franchises::create_franchise)
                .get(handlers::franchises::list_franchises),
        )
        .route("/{id}/stats", get(handlers::franchises::get_franchise_stats))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let network_routes = Router::new()
        .route("/stats", get(handlers::network::get_network_stats))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let workspace_routes = Router::new()
        .route("/", get(handlers::workspace::get_workspace))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let crm_routes = Router::new()
        .route(
            "/clients",
            post(handlers::crm::create_client).get(handlers::crm::list_clients),
        )
        .route(
            "/leads",
            post(handlers::crm::create_lead).get(handlers::crm::list_leads),
        )
        .route("/leads/{id}/status", patch(handlers::crm::update_lead_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let finance_routes = Router::new()
        .route(
            "/transactions",
            post(handlers::finance::create_transaction).get(handlers::finance::list_transactions),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let consortium_routes = Router::new()
        .route(
            "/sales",
            post(handlers::consortium::create_sale).get(handlers::consortium::list_sales),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let recovery_routes = Router::new()
        .route(
            "/cases",
            post(handlers::recovery::create_case).get(handlers::recovery::list_cases),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let catalog_routes = Router::new()
        .route("/products", get(handlers::catalog::list_products))
        .route("/campaigns", get(handlers::catalog::list_campaigns))
        .route("/announcements", get(handlers::catalog::list_announcements))
        .route("/courses", get(handlers::catalog::list_courses))
        .route("/modules", get(handlers::catalog::list_modules))
        .route("/knowledge", get(handlers::catalog::list_knowledge))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/franchises", franchise_routes)
        .nest("/api/network", network_routes)
        .nest("/api/workspace", workspace_routes)
        .nest("/api/crm", crm_routes)
        .nest("/api/finance", finance_routes)
        .nest("/api/consortium", consortium_routes)
        .nest("/api/recovery", recovery_routes)
        .nest("/api/catalog", catalog_routes)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
