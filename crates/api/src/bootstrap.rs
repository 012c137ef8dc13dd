//! Startup seeding of the first superuser.

use qrkot_db::models::user::{CreateUser, User};
use qrkot_db::repositories::UserRepo;
use qrkot_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Credentials for the superuser created on first start.
#[derive(Debug, Clone)]
pub struct SuperuserSeed {
    pub email: String,
    pub password: String,
}

impl SuperuserSeed {
    /// Read `FIRST_SUPERUSER_EMAIL` and `FIRST_SUPERUSER_PASSWORD`.
    ///
    /// Returns `None` unless both are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let email = std::env::var("FIRST_SUPERUSER_EMAIL").ok()?;
        let password = std::env::var("FIRST_SUPERUSER_PASSWORD").ok()?;
        if email.trim().is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            email: email.trim().to_string(),
            password,
        })
    }
}

/// Create the seeded superuser unless a user with that email already exists.
///
/// Returns the newly created user, or `None` when nothing was inserted.
pub async fn ensure_superuser(pool: &DbPool, seed: &SuperuserSeed) -> AppResult<Option<User>> {
    if UserRepo::find_by_email(pool, &seed.email).await?.is_some() {
        tracing::debug!(email = %seed.email, "Superuser already present, skipping seed");
        return Ok(None);
    }

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: seed.email.clone(),
            password_hash,
            is_superuser: true,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Seeded first superuser");
    Ok(Some(user))
}
