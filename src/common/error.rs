use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// O núcleo de cálculo (stats/escopo) nunca produz erro: ausência vira
// `None`/coleção vazia antes de chegar aqui.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Franquia não encontrada")]
    FranchiseNotFound,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Lead não encontrado")]
    LeadNotFound,

    #[error("Nenhuma franquia selecionada")]
    FranchiseScopeRequired,

    #[error("Cabeçalho X-Franchise-Id inválido")]
    InvalidFranchiseHeader,

    #[error("Valor monetário inválido")]
    InvalidAmount,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.")
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Operação restrita ao franqueador.",
            ),
            AppError::FranchiseNotFound => (StatusCode::NOT_FOUND, "Franquia não encontrada."),
            AppError::ClientNotFound => (
                StatusCode::NOT_FOUND,
                "Cliente não encontrado na franquia selecionada.",
            ),
            AppError::LeadNotFound => (
                StatusCode::NOT_FOUND,
                "Lead não encontrado na franquia selecionada.",
            ),
            AppError::FranchiseScopeRequired => (
                StatusCode::BAD_REQUEST,
                "Informe a franquia alvo pelo cabeçalho X-Franchise-Id.",
            ),
            AppError::InvalidFranchiseHeader => (
                StatusCode::BAD_REQUEST,
                "Cabeçalho X-Franchise-Id inválido (não é um id numérico).",
            ),
            AppError::InvalidAmount => (
                StatusCode::BAD_REQUEST,
                "O valor deve ser maior que zero.",
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.",
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
