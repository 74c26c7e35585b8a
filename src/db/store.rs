// src/db/store.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{postgres::PgArguments, query::Query, PgPool, Postgres};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    models::{
        auth::{CurrentUser, Role},
        consortium::{ConsortiumSale, CreditRecoveryCase, RecoveryStatus},
        crm::{Client, Lead, LeadStatus},
        finance::{Transaction, TransactionKind, NETWORK_FRANCHISE_ID},
        franchise::Franchise,
        snapshot::Snapshot,
    },
};

// Resultado de uma escrita "melhor esforço": uma única tentativa remota;
// se falhar (ou não houver banco), o registro vive só na cópia local
// desta instância. Sem retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteDurability {
    Remote,
    LocalOnly,
}

// Envelope devolvido pelas rotas de escrita, para o cliente poder
// sinalizar durabilidade degradada.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WriteReceipt<T> {
    pub data: T,
    pub durability: WriteDurability,
}

// Guarda o snapshot que serve todas as leituras. As escritas são
// serializadas pelo lock de escrita, o que também garante ids únicos.
pub struct SnapshotStore {
    pool: Option<PgPool>,
    snapshot: RwLock<Snapshot>,
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot, pool: Option<PgPool>) -> Self {
        Self {
            pool,
            snapshot: RwLock::new(snapshot),
        }
    }

    // O núcleo de cálculo trabalha sobre um clone; nenhum lock atravessa
    // a fronteira das funções puras.
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }

    // --- PRINCIPAIS (login/token) ---

    // Procura primeiro na equipe da franqueadora, depois nos operadores
    // de unidade. Devolve o principal e o hash para verificação.
    pub async fn find_principal_by_email(&self, email: &str) -> Option<(CurrentUser, String)> {
        let guard = self.snapshot.read().await;

        if let Some(u) = guard.system_users.iter().find(|u| u.email == email) {
            let principal = CurrentUser {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                role: Role::Franchisor,
                franchise_id: None,
            };
            return Some((principal, u.password_hash.clone()));
        }

        guard.franchise_users.iter().find(|u| u.email == email).map(|u| {
            let principal = CurrentUser {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                role: Role::Franchisee,
                franchise_id: Some(u.franchise_id),
            };
            (principal, u.password_hash.clone())
        })
    }

    // As duas coleções de usuários têm sequências de id independentes;
    // o papel vindo do token desambigua.
    pub async fn find_principal(&self, id: i64, role: Role) -> Option<CurrentUser> {
        let guard = self.snapshot.read().await;
        match role {
            Role::Franchisor => guard.system_users.iter().find(|u| u.id == id).map(|u| {
                CurrentUser {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    role: Role::Franchisor,
                    franchise_id: None,
                }
            }),
            Role::Franchisee => guard.franchise_users.iter().find(|u| u.id == id).map(|u| {
                CurrentUser {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    role: Role::Franchisee,
                    franchise_id: Some(u.franchise_id),
                }
            }),
        }
    }

    // --- ESCRITAS ---

    // Uma tentativa remota, sem retry; falha vira fallback local
    // permanente para esta chamada.
    async fn try_remote(&self, query: Query<'_, Postgres, PgArguments>) -> WriteDurability {
        match &self.pool {
            Some(pool) => match query.execute(pool).await {
                Ok(_) => WriteDurability::Remote,
                Err(err) => {
                    tracing::warn!(
                        "⚠️ Escrita remota falhou, registro mantido apenas em memória: {}",
                        err
                    );
                    WriteDurability::LocalOnly
                }
            },
            None => WriteDurability::LocalOnly,
        }
    }

    pub async fn create_franchise(
        &self,
        name: &str,
        location: &str,
        cnpj: Option<String>,
        owner_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        opened_at: Option<NaiveDate>,
        allowed_product_ids: Option<Vec<i64>>,
    ) -> Result<(Franchise, WriteDurability), AppError> {
        let mut guard = self.snapshot.write().await;

        let franchise = Franchise {
            id: next_id(guard.franchises.iter().map(|f| f.id)),
            name: name.to_owned(),
            location: location.to_owned(),
            cnpj,
            owner_name,
            email,
            phone,
            opened_at,
            allowed_product_ids,
            created_at: Utc::now(),
        };

        let durability = self
            .try_remote(
                sqlx::query(
                    "INSERT INTO franchises \
                     (id, name, location, cnpj, owner_name, email, phone, opened_at, allowed_product_ids, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
                )
                .bind(franchise.id)
                .bind(franchise.name.clone())
                .bind(franchise.location.clone())
                .bind(franchise.cnpj.clone())
                .bind(franchise.owner_name.clone())
                .bind(franchise.email.clone())
                .bind(franchise.phone.clone())
                .bind(franchise.opened_at)
                .bind(franchise.allowed_product_ids.clone())
                .bind(franchise.created_at),
            )
            .await;

        guard.franchises.push(franchise.clone());
        Ok((franchise, durability))
    }

    pub async fn create_client(
        &self,
        franchise_id: i64,
        full_name: &str,
        email: Option<String>,
        phone: Option<String>,
        document_number: Option<String>,
    ) -> Result<(Client, WriteDurability), AppError> {
        let mut guard = self.snapshot.write().await;

        if guard.find_franchise(franchise_id).is_none() {
            return Err(AppError::FranchiseNotFound);
        }

        let client = Client {
            id: next_id(guard.clients.iter().map(|c| c.id)),
            franchise_id,
            full_name: full_name.to_owned(),
            email,
            phone,
            document_number,
            created_at: Utc::now(),
        };

        let durability = self
            .try_remote(
                sqlx::query(
                    "INSERT INTO clients \
                     (id, franchise_id, full_name, email, phone, document_number, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7)",
                )
                .bind(client.id)
                .bind(client.franchise_id)
                .bind(client.full_name.clone())
                .bind(client.email.clone())
                .bind(client.phone.clone())
                .bind(client.document_number.clone())
                .bind(client.created_at),
            )
            .await;

        guard.clients.push(client.clone());
        Ok((client, durability))
    }

    // Lead novo sempre nasce NEW; o cliente precisa existir na mesma unidade.
    pub async fn create_lead(
        &self,
        franchise_id: i64,
        client_id: i64,
        negotiated_value: Option<Decimal>,
    ) -> Result<(Lead, WriteDurability), AppError> {
        let mut guard = self.snapshot.write().await;

        let client_ok = guard
            .clients
            .iter()
            .any(|c| c.id == client_id && c.franchise_id == franchise_id);
        if !client_ok {
            return Err(AppError::ClientNotFound);
        }

        let lead = Lead {
            id: next_id(guard.leads.iter().map(|l| l.id)),
            franchise_id,
            client_id,
            status: LeadStatus::New,
            negotiated_value,
            created_at: Utc::now(),
        };

        let durability = self
            .try_remote(
                sqlx::query(
                    "INSERT INTO leads \
                     (id, franchise_id, client_id, status, negotiated_value, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6)",
                )
                .bind(lead.id)
                .bind(lead.franchise_id)
                .bind(lead.client_id)
                .bind(lead.status)
                .bind(lead.negotiated_value)
                .bind(lead.created_at),
            )
            .await;

        guard.leads.push(lead.clone());
        Ok((lead, durability))
    }

    // Transição livre de status; `negotiated_value` só é alterado quando
    // vem preenchido. O lead precisa pertencer à unidade selecionada.
    pub async fn update_lead_status(
        &self,
        franchise_id: i64,
        lead_id: i64,
        status: LeadStatus,
        negotiated_value: Option<Decimal>,
    ) -> Result<(Lead, WriteDurability), AppError> {
        let mut guard = self.snapshot.write().await;

        let Some(pos) = guard
            .leads
            .iter()
            .position(|l| l.id == lead_id && l.franchise_id == franchise_id)
        else {
            return Err(AppError::LeadNotFound);
        };

        let durability = self
            .try_remote(
                sqlx::query(
                    "UPDATE leads \
                     SET status = $1, negotiated_value = COALESCE($2, negotiated_value) \
                     WHERE id = $3 AND franchise_id = $4",
                )
                .bind(status)
                .bind(negotiated_value)
                .bind(lead_id)
                .bind(franchise_id),
            )
            .await;

        let lead = &mut guard.leads[pos];
        lead.status = status;
        if let Some(value) = negotiated_value {
            lead.negotiated_value = Some(value);
        }

        Ok((lead.clone(), durability))
    }

    pub async fn create_transaction(
        &self,
        franchise_id: i64,
        description: Option<String>,
        amount: Decimal,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Result<(Transaction, WriteDurability), AppError> {
        let mut guard = self.snapshot.write().await;

        // 0 é o sentinela da rede; qualquer outro id precisa existir
        if franchise_id != NETWORK_FRANCHISE_ID && guard.find_franchise(franchise_id).is_none() {
            return Err(AppError::FranchiseNotFound);
        }

        let transaction = Transaction {
            id: next_id(guard.transactions.iter().map(|t| t.id)),
            franchise_id,
            description,
            amount,
            kind,
            date,
        };

        let durability = self
            .try_remote(
                sqlx::query(
                    "INSERT INTO transactions \
                     (id, franchise_id, description, amount, kind, date) \
                     VALUES ($1, $2, $3, $4, $5, $6)",
                )
                .bind(transaction.id)
                .bind(transaction.franchise_id)
                .bind(transaction.description.clone())
                .bind(transaction.amount)
                .bind(transaction.kind)
                .bind(transaction.date),
            )
            .await;

        guard.transactions.push(transaction.clone());
        Ok((transaction, durability))
    }

    pub async fn create_consortium_sale(
        &self,
        franchise_id: i64,
        client_id: i64,
        value: Decimal,
        salesperson_id: Option<i64>,
    ) -> Result<(ConsortiumSale, WriteDurability), AppError> {
        let mut guard = self.snapshot.write().await;

        let client_ok = guard
            .clients
            .iter()
            .any(|c| c.id == client_id && c.franchise_id == franchise_id);
        if !client_ok {
            return Err(AppError::ClientNotFound);
        }

        let sale = ConsortiumSale {
            id: next_id(guard.consortium_sales.iter().map(|s| s.id)),
            franchise_id,
            client_id,
            value,
            salesperson_id,
            created_at: Utc::now(),
        };

        let durability = self
            .try_remote(
                sqlx::query(
                    "INSERT INTO consortium_sales \
                     (id, franchise_id, client_id, value, salesperson_id, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6)",
                )
                .bind(sale.id)
                .bind(sale.franchise_id)
                .bind(sale.client_id)
                .bind(sale.value)
                .bind(sale.salesperson_id)
                .bind(sale.created_at),
            )
            .await;

        guard.consortium_sales.push(sale.clone());
        Ok((sale, durability))
    }

    // Caso novo sempre nasce OPEN.
    pub async fn create_recovery_case(
        &self,
        franchise_id: i64,
        client_id: i64,
        debt_amount: Decimal,
    ) -> Result<(CreditRecoveryCase, WriteDurability), AppError> {
        let mut guard = self.snapshot.write().await;

        let client_ok = guard
            .clients
            .iter()
            .any(|c| c.id == client_id && c.franchise_id == franchise_id);
        if !client_ok {
            return Err(AppError::ClientNotFound);
        }

        let case = CreditRecoveryCase {
            id: next_id(guard.credit_recovery_cases.iter().map(|c| c.id)),
            franchise_id,
            client_id,
            debt_amount,
            status: RecoveryStatus::Open,
        };

        let durability = self
            .try_remote(
                sqlx::query(
                    "INSERT INTO credit_recovery_cases \
                     (id, franchise_id, client_id, debt_amount, status) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(case.id)
                .bind(case.franchise_id)
                .bind(case.client_id)
                .bind(case.debt_amount)
                .bind(case.status),
            )
            .await;

        guard.credit_recovery_cases.push(case.clone());
        Ok((case, durability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn franchise(id: i64) -> Franchise {
        Franchise {
            id,
            name: format!("Unidade {id}"),
            location: "São Paulo - SP".into(),
            cnpj: None,
            owner_name: None,
            email: None,
            phone: None,
            opened_at: None,
            allowed_product_ids: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn client(id: i64, franchise_id: i64) -> Client {
        Client {
            id,
            franchise_id,
            full_name: format!("Cliente {id}"),
            email: None,
            phone: None,
            document_number: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn store() -> SnapshotStore {
        let snapshot = Snapshot {
            franchises: vec![franchise(1), franchise(2)],
            clients: vec![client(1, 1), client(2, 2)],
            ..Default::default()
        };
        SnapshotStore::new(snapshot, None)
    }

    #[tokio::test]
    async fn writes_without_pool_are_local_only() {
        let store = store();

        let (lead, durability) = store.create_lead(1, 1, None).await.unwrap();
        assert_eq!(durability, WriteDurability::LocalOnly);
        assert_eq!(lead.id, 1);
        assert_eq!(lead.status, LeadStatus::New);

        // Segundo lead pega o próximo id da sequência
        let (lead, _) = store.create_lead(1, 1, None).await.unwrap();
        assert_eq!(lead.id, 2);

        assert_eq!(store.snapshot().await.leads.len(), 2);
    }

    #[tokio::test]
    async fn lead_requires_client_of_same_franchise() {
        let store = store();

        // Cliente 2 pertence à unidade 2
        let err = store.create_lead(1, 2, None).await.unwrap_err();
        assert!(matches!(err, AppError::ClientNotFound));

        let err = store.create_lead(1, 99, None).await.unwrap_err();
        assert!(matches!(err, AppError::ClientNotFound));
    }

    #[tokio::test]
    async fn lead_status_update_is_scoped_to_franchise() {
        let store = store();
        let (lead, _) = store.create_lead(1, 1, None).await.unwrap();

        // Atualização vinda de outra unidade não enxerga o lead
        let err = store
            .update_lead_status(2, lead.id, LeadStatus::Won, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LeadNotFound));

        let (updated, _) = store
            .update_lead_status(1, lead.id, LeadStatus::Won, Some(Decimal::from(30_000)))
            .await
            .unwrap();
        assert_eq!(updated.status, LeadStatus::Won);
        assert_eq!(updated.negotiated_value, Some(Decimal::from(30_000)));

        // Sem valor novo, o valor negociado anterior permanece
        let (updated, _) = store
            .update_lead_status(1, lead.id, LeadStatus::Lost, None)
            .await
            .unwrap();
        assert_eq!(updated.negotiated_value, Some(Decimal::from(30_000)));
    }

    #[tokio::test]
    async fn network_level_transaction_is_accepted() {
        let store = store();
        let (tx, durability) = store
            .create_transaction(
                crate::models::finance::NETWORK_FRANCHISE_ID,
                Some("Royalties".into()),
                Decimal::from(1_000),
                TransactionKind::Income,
                NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(tx.franchise_id, 0);
        assert_eq!(durability, WriteDurability::LocalOnly);
    }

    #[tokio::test]
    async fn principal_lookup_distinguishes_roles() {
        use crate::models::auth::{FranchiseUser, SystemUser};

        let snapshot = Snapshot {
            franchises: vec![franchise(1)],
            system_users: vec![SystemUser {
                id: 1,
                name: "Admin".into(),
                email: "admin@rede.com".into(),
                password_hash: "x".into(),
            }],
            franchise_users: vec![FranchiseUser {
                id: 1,
                franchise_id: 1,
                name: "Paula".into(),
                email: "paula@rede.com".into(),
                password_hash: "y".into(),
                position: None,
            }],
            ..Default::default()
        };
        let store = SnapshotStore::new(snapshot, None);

        let admin = store.find_principal(1, Role::Franchisor).await.unwrap();
        assert_eq!(admin.role, Role::Franchisor);
        assert_eq!(admin.franchise_id, None);

        let paula = store.find_principal(1, Role::Franchisee).await.unwrap();
        assert_eq!(paula.role, Role::Franchisee);
        assert_eq!(paula.franchise_id, Some(1));

        let (by_email, hash) = store.find_principal_by_email("paula@rede.com").await.unwrap();
        assert_eq!(by_email.role, Role::Franchisee);
        assert_eq!(hash, "y");
    }
}
