// db/userdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::{User, UserRole};

pub const USER_COLUMNS: &str =
    "id, username, email, password, full_name, phone, role, created_at, updated_at";

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error>;

    async fn get_users(&self) -> Result<Vec<User>, Error>;

    async fn save_user(
        &self,
        username: String,
        email: String,
        password: String,
        full_name: Option<String>,
        phone: Option<String>,
        role: UserRole,
    ) -> Result<User, Error>;

    async fn update_user(
        &self,
        user_id: Uuid,
        full_name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<User, Error>;

    async fn update_user_role(&self, user_id: Uuid, role: UserRole) -> Result<User, Error>;

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, Error>;

    async fn username_exists(&self, username: &str) -> Result<bool, Error>;

    async fn email_exists(&self, email: &str) -> Result<bool, Error>;

    async fn count_users(&self) -> Result<i64, Error>;

    /// Idempotent provisioning of the platform support account. The unique
    /// constraint on `username` makes the insert a no-op on repeat calls.
    async fn ensure_support_admin(
        &self,
        username: &str,
        email: &str,
        password: String,
        full_name: &str,
    ) -> Result<User, Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
            ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(username) = username {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
            ))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
            ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn get_users(&self) -> Result<Vec<User>, Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn save_user(
        &self,
        username: String,
        email: String,
        password: String,
        full_name: Option<String>,
        phone: Option<String>,
        role: UserRole,
    ) -> Result<User, Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password, full_name, phone, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(email)
        .bind(password)
        .bind(full_name)
        .bind(phone)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user(
        &self,
        user_id: Uuid,
        full_name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<User, Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                username = COALESCE($5, username),
                password = COALESCE($6, password),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(full_name)
        .bind(phone)
        .bind(email)
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_role(&self, user_id: Uuid, role: UserRole) -> Result<User, Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
    }

    async fn count_users(&self) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }

    async fn ensure_support_admin(
        &self,
        username: &str,
        email: &str,
        password: String,
        full_name: &str,
    ) -> Result<User, Error> {
        sqlx::query(
            r#"
            INSERT INTO users (username, email, password, full_name, role)
            VALUES ($1, $2, $3, $4, 'admin'::user_role)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password)
        .bind(full_name)
        .execute(&self.pool)
        .await?;

        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_one(&self.pool)
        .await
    }
}
