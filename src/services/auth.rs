// src/services/auth.rs

use std::sync::Arc;

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::SnapshotStore,
    models::auth::{Claims, CurrentUser},
};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<SnapshotStore>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(store: Arc<SnapshotStore>, jwt_secret: String) -> Self {
        Self { store, jwt_secret }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let (user, password_hash) = self
            .store
            .find_principal_by_email(email)
            .await
            .ok_or(AppError::InvalidCredentials)?;

        let password = password.to_owned();

        // Executa a verificação (cara) fora do executor
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(&user)
    }

    pub async fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        // O papel do token desambigua entre as duas coleções de usuários
        self.store
            .find_principal(token_data.claims.sub, token_data.claims.role)
            .await
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user: &CurrentUser) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            role: user.role,
            franchise_id: user.franchise_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        auth::{FranchiseUser, Role, SystemUser},
        snapshot::Snapshot,
    };

    // Custo baixo de propósito: só para os testes não arrastarem
    const TEST_COST: u32 = 4;

    fn service() -> AuthService {
        let hash = bcrypt::hash("franquia123", TEST_COST).unwrap();
        let snapshot = Snapshot {
            system_users: vec![SystemUser {
                id: 1,
                name: "Admin".into(),
                email: "admin@rede.com".into(),
                password_hash: hash.clone(),
            }],
            franchise_users: vec![FranchiseUser {
                id: 7,
                franchise_id: 2,
                name: "Paula".into(),
                email: "paula@rede.com".into(),
                password_hash: hash,
                position: None,
            }],
            ..Default::default()
        };
        let store = Arc::new(SnapshotStore::new(snapshot, None));
        AuthService::new(store, "segredo-de-teste".into())
    }

    #[tokio::test]
    async fn login_token_round_trips_to_same_principal() {
        let service = service();

        let token = service.login("paula@rede.com", "franquia123").await.unwrap();
        let user = service.validate_token(&token).await.unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.role, Role::Franchisee);
        assert_eq!(user.franchise_id, Some(2));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let service = service();
        let err = service.login("admin@rede.com", "senha-errada").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_rejected() {
        let service = service();
        let err = service.login("ninguem@rede.com", "franquia123").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let service = service();
        let err = service.validate_token("nem.um.jwt").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
