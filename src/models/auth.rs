// src/models/auth.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Papel do usuário autenticado.
// FRANCHISOR enxerga a rede inteira; FRANCHISEE fica preso à própria unidade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Franchisor,
    Franchisee,
}

// Equipe da franqueadora (acesso global à rede)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemUser {
    pub id: i64,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,
}

// Operador de uma unidade específica
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseUser {
    pub id: i64,
    pub franchise_id: i64,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub position: Option<String>,
}

// O principal autenticado, montado pelo middleware a cada requisição.
// Nunca é armazenado pelo núcleo de cálculo.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,

    // Sempre presente para FRANCHISEE; ausente para o franqueador.
    pub franchise_id: Option<i64>,
}

impl CurrentUser {
    pub fn is_franchisor(&self) -> bool {
        self.role == Role::Franchisor
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "admin@redemaestra.com.br")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,                  // ID do usuário
    pub role: Role,                // Papel na rede
    pub franchise_id: Option<i64>, // Unidade do franqueado
    pub exp: usize,                // Expiration time
    pub iat: usize,                // Issued At
}
