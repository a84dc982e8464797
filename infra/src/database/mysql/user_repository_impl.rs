//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mv_core::domain::entities::user::User;
use mv_core::errors::{AuthError, DomainError};
use mv_core::repositories::UserRepository;

const USER_COLUMNS: &str = r#"
    id, username, email, password_hash, verified,
    verification_code_hash, verification_issued_at,
    created_at, updated_at
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(DomainError::storage)?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::storage(format!("Invalid UUID: {}", e)))?,
            username: row.try_get("username").map_err(DomainError::storage)?,
            email: row.try_get("email").map_err(DomainError::storage)?,
            password_hash: row.try_get("password_hash").map_err(DomainError::storage)?,
            verified: row.try_get("verified").map_err(DomainError::storage)?,
            verification_code_hash: row
                .try_get("verification_code_hash")
                .map_err(DomainError::storage)?,
            verification_issued_at: row
                .try_get::<Option<DateTime<Utc>>, _>("verification_issued_at")
                .map_err(DomainError::storage)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(DomainError::storage)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(DomainError::storage)?,
        })
    }

    async fn find_one(&self, column: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, column);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, column = column, "User lookup failed");
                DomainError::storage(e)
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn exists(&self, column: &str, value: &str) -> Result<bool, DomainError> {
        let query = format!("SELECT COUNT(*) FROM users WHERE {} = ?", column);

        let count: i64 = sqlx::query_scalar(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(DomainError::storage)?;

        Ok(count > 0)
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, email, password_hash, verified,
                verification_code_hash, verification_issued_at,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.verified)
            .bind(&user.verification_code_hash)
            .bind(user.verification_issued_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    let field = if db.message().contains("username") {
                        "username"
                    } else {
                        "email"
                    };
                    DomainError::from(AuthError::UserAlreadyExists {
                        field: field.to_string(),
                    })
                }
                _ => {
                    tracing::error!(error = %e, "Failed to create user");
                    DomainError::storage(e)
                }
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                username = ?,
                email = ?,
                password_hash = ?,
                verified = ?,
                verification_code_hash = ?,
                verification_issued_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.verified)
            .bind(&user.verification_code_hash)
            .bind(user.verification_issued_at)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user.id, "Failed to update user");
                DomainError::storage(e)
            })?;

        if result.rows_affected() == 0 {
            // MySQL reports 0 when nothing changed, so confirm the row exists
            if self.find_by_id(user.id).await?.is_none() {
                return Err(DomainError::NotFound {
                    resource: "User".to_string(),
                });
            }
        }

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.exists("email", email).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        self.exists("username", username).await
    }
}
