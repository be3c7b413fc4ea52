use crate::{error::AppError, storage::db::SurrealDbClient, stored_object};
use async_trait::async_trait;
use axum_session_auth::Authentication;
use surrealdb::{engine::any::Any, Surreal};
use uuid::Uuid;

stored_object!(User, "user", {
    email: String,
    password: String,
    display_name: String,
    anonymous: bool
});

/// User representation safe to hand to API clients, without the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
        }
    }
}

#[async_trait]
impl Authentication<User, String, Surreal<Any>> for User {
    async fn load_user(userid: String, db: Option<&Surreal<Any>>) -> Result<User, anyhow::Error> {
        let db = db.ok_or_else(|| anyhow::anyhow!("No database handle for session auth"))?;
        db.select((Self::table_name(), userid.as_str()))
            .await?
            .ok_or_else(|| anyhow::anyhow!("Session user not found"))
    }

    fn is_authenticated(&self) -> bool {
        !self.anonymous
    }

    fn is_active(&self) -> bool {
        !self.anonymous
    }

    fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}

impl User {
    pub async fn create_new(
        email: String,
        password: String,
        display_name: String,
        db: &SurrealDbClient,
    ) -> Result<Self, AppError> {
        if Self::find_by_email(&email, db).await?.is_some() {
            return Err(AppError::Auth(
                "An account with that email already exists".into(),
            ));
        }

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        let user: Option<User> = db
            .client
            .query(
                "CREATE type::thing('user', $id) SET
                email = $email,
                password = crypto::argon2::generate($password),
                display_name = $display_name,
                anonymous = false,
                created_at = $created_at,
                updated_at = $updated_at",
            )
            .bind(("id", id))
            .bind(("email", email))
            .bind(("password", password))
            .bind(("display_name", display_name))
            .bind(("created_at", surrealdb::sql::Datetime::from(now)))
            .bind(("updated_at", surrealdb::sql::Datetime::from(now)))
            .await?
            .take(0)?;

        user.ok_or(AppError::Auth("User failed to create".into()))
    }

    pub async fn authenticate(
        email: &str,
        password: &str,
        db: &SurrealDbClient,
    ) -> Result<Self, AppError> {
        let user: Option<User> = db
            .client
            .query(
                "SELECT * FROM user
                WHERE email = $email
                AND crypto::argon2::compare(password, $password)",
            )
            .bind(("email", email.to_owned()))
            .bind(("password", password.to_owned()))
            .await?
            .take(0)?;
        user.ok_or(AppError::Auth("User failed to authenticate".into()))
    }

    pub async fn find_by_email(
        email: &str,
        db: &SurrealDbClient,
    ) -> Result<Option<Self>, AppError> {
        let user: Option<User> = db
            .client
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;

        Ok(user)
    }
}
