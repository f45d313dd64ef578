//! Postgres-backed stores.
//!
//! Schema lives in `migrations/`. Mutating operations are single
//! statements, so the database is the arbiter under concurrency: the
//! failed-attempt increment and the token consumption are both one
//! conditional UPDATE.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flashdeck_config::LockoutConfig;
use flashdeck_core::AuthError;
use flashdeck_models::{Email, LoginAttempt, PasswordResetToken, User};
use sqlx::PgPool;

use super::{LoginAttemptStore, ResetTokenStore, UserStore};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        // Emails were validated at write time.
        User::new(row.id, Email::new_unchecked(row.email), row.password_hash)
    }
}

#[derive(sqlx::FromRow)]
struct LoginAttemptRow {
    id: i64,
    user_id: i64,
    attempt_count: i32,
    last_attempt_at: DateTime<Utc>,
    locked_until: Option<DateTime<Utc>>,
}

impl From<LoginAttemptRow> for LoginAttempt {
    fn from(row: LoginAttemptRow) -> Self {
        LoginAttempt {
            id: row.id,
            user_id: row.user_id,
            attempt_count: row.attempt_count,
            last_attempt_at: row.last_attempt_at,
            locked_until: row.locked_until,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ResetTokenRow {
    id: i64,
    token: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
    used: bool,
}

impl From<ResetTokenRow> for PasswordResetToken {
    fn from(row: ResetTokenRow) -> Self {
        PasswordResetToken {
            id: row.id,
            token: row.token,
            user_id: row.user_id,
            expires_at: row.expires_at,
            used: row.used,
        }
    }
}

/// All three stores over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded migrations.
    pub async fn migrate(&self) -> Result<(), AuthError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(format!("migration failed: {}", e)))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, email, password_hash FROM users WHERE email = $1"#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn insert(&self, email: Email, password_hash: String) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"INSERT INTO users (email, password_hash)
               VALUES ($1, $2)
               RETURNING id, email, password_hash"#,
        )
        .bind(email.as_str())
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AuthError::EmailTaken;
            }
            AuthError::from(e)
        })?;

        Ok(row.into())
    }

    async fn update_password(
        &self,
        user_id: i64,
        password_hash: String,
    ) -> Result<(), AuthError> {
        let result = sqlx::query(r#"UPDATE users SET password_hash = $1 WHERE id = $2"#)
            .bind(&password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl LoginAttemptStore for PgStore {
    async fn get_or_create(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<LoginAttempt, AuthError> {
        let row = sqlx::query_as::<_, LoginAttemptRow>(
            r#"INSERT INTO login_attempts (user_id, attempt_count, last_attempt_at)
               VALUES ($1, 0, $2)
               ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
               RETURNING id, user_id, attempt_count, last_attempt_at, locked_until"#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn record_failure(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        lockout: &LockoutConfig,
    ) -> Result<LoginAttempt, AuthError> {
        // Ensure the row exists, then increment in one statement so
        // concurrent failures all count.
        sqlx::query(
            r#"INSERT INTO login_attempts (user_id, attempt_count, last_attempt_at)
               VALUES ($1, 0, $2)
               ON CONFLICT (user_id) DO NOTHING"#,
        )
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let locked_until = now + lockout.lockout_duration();
        let row = sqlx::query_as::<_, LoginAttemptRow>(
            r#"UPDATE login_attempts
               SET attempt_count = attempt_count + 1,
                   last_attempt_at = $2,
                   locked_until = CASE
                       WHEN attempt_count + 1 >= $3 THEN $4
                       ELSE locked_until
                   END
               WHERE user_id = $1
               RETURNING id, user_id, attempt_count, last_attempt_at, locked_until"#,
        )
        .bind(user_id)
        .bind(now)
        .bind(lockout.max_failed_attempts)
        .bind(locked_until)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn clear_attempts(&self, user_id: i64) -> Result<(), AuthError> {
        sqlx::query(r#"UPDATE login_attempts SET attempt_count = 0 WHERE user_id = $1"#)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn unlock(&self, user_id: i64) -> Result<(), AuthError> {
        sqlx::query(
            r#"UPDATE login_attempts
               SET attempt_count = 0, locked_until = NULL
               WHERE user_id = $1"#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ResetTokenStore for PgStore {
    async fn insert(
        &self,
        user_id: i64,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, AuthError> {
        let row = sqlx::query_as::<_, ResetTokenRow>(
            r#"INSERT INTO password_reset_tokens (token, user_id, expires_at, used)
               VALUES ($1, $2, $3, FALSE)
               RETURNING id, token, user_id, expires_at, used"#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, AuthError> {
        let row = sqlx::query_as::<_, ResetTokenRow>(
            r#"SELECT id, token, user_id, expires_at, used
               FROM password_reset_tokens WHERE token = $1"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PasswordResetToken::from))
    }

    async fn mark_used(&self, token: &str) -> Result<PasswordResetToken, AuthError> {
        let row = sqlx::query_as::<_, ResetTokenRow>(
            r#"UPDATE password_reset_tokens
               SET used = TRUE
               WHERE token = $1 AND used = FALSE
               RETURNING id, token, user_id, expires_at, used"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row.into()),
            // Lost the race or the token never existed.
            None => match self.find_by_token(token).await? {
                Some(_) => Err(AuthError::TokenExpiredOrUsed),
                None => Err(AuthError::ResetTokenNotFound),
            },
        }
    }

    async fn delete_expired_or_used(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        let result = sqlx::query(
            r#"DELETE FROM password_reset_tokens WHERE expires_at <= $1 OR used = TRUE"#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
