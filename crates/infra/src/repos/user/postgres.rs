use super::IUserRepo;
use attenda_domain::{NotificationPreferences, User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    email: String,
    full_name: String,
    session_reminders: bool,
    disabled_keys: Vec<String>,
    created: i64,
    updated: i64,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        Self {
            id: raw.user_uid.into(),
            email: raw.email,
            full_name: raw.full_name,
            preferences: NotificationPreferences {
                session_reminders: raw.session_reminders,
                disabled_keys: raw.disabled_keys,
            },
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, email, full_name, session_reminders,
                disabled_keys, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.preferences.session_reminders)
        .bind(&user.preferences.disabled_keys)
        .bind(user.created)
        .bind(user.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = $2,
                full_name = $3,
                session_reminders = $4,
                disabled_keys = $5,
                updated = $6
            WHERE user_uid = $1
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.preferences.session_reminders)
        .bind(&user.preferences.disabled_keys)
        .bind(user.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|user| user.into())
    }

    async fn find_many(&self, user_ids: &[ID]) -> Vec<User> {
        let user_ids = user_ids.iter().map(|id| *id.inner_ref()).collect::<Vec<_>>();

        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users
            WHERE user_uid = ANY($1)
            "#,
        )
        .bind(&user_ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|user| user.into())
        .collect()
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|user| user.into())
    }

    async fn find_all(&self) -> Vec<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users
            ORDER BY created
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|user| user.into())
        .collect()
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            DELETE FROM users
            WHERE user_uid = $1
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|user| user.into())
    }
}
