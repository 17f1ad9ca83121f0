//! User Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::auth::Role;
use crate::db::models::{ProfileUpdate, User, UserCreate};
use crate::utils::time::now_ms;

pub const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let rid = parse_id(TABLE, id)?;
        let user: Option<User> = self.base.db().select(rid).await?;
        Ok(user)
    }

    /// Email lookup is case-insensitive; emails are stored lowercased
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn create(&self, mut data: UserCreate) -> RepoResult<User> {
        data.email = data.email.trim().to_lowercase();

        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }

        let created: Option<User> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn update_profile(&self, id: &str, data: ProfileUpdate) -> RepoResult<User> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    phone = $phone OR phone,
                    address = $address OR address,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("name", data.name))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("now", now_ms()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> RepoResult<User> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_active = $is_active, updated_at = $now RETURN AFTER")
            .bind(("thing", rid))
            .bind(("is_active", is_active))
            .bind(("now", now_ms()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    pub async fn set_role(&self, id: &str, role: Role) -> RepoResult<User> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET role = $role, updated_at = $now RETURN AFTER")
            .bind(("thing", rid))
            .bind(("role", role))
            .bind(("now", now_ms()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }
}
