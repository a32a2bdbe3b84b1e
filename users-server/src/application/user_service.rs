use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use tracing::instrument;

use crate::data::user_repository::UserRepository;
use crate::domain::{
    error::DomainError,
    user::{User, UserSummary},
};
use crate::infrastructure::security::{hash_password, verify_password};

pub struct UserService<R: UserRepository + 'static> {
    repo: Arc<R>,
}

impl<R: UserRepository + 'static> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// Ids that are not valid ObjectIds can never match a stored user.
fn parse_id(id: &str) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(id).map_err(|_| DomainError::UserNotFound(id.to_string()))
}

fn hash(password: &str) -> Result<String, DomainError> {
    hash_password(password).map_err(|err| DomainError::Hashing(err.to_string()))
}

impl<R> UserService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_users(&self) -> Result<Vec<UserSummary>, DomainError> {
        let users = self.repo.find_all().await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    pub async fn get_user(&self, id: &str) -> Result<UserSummary, DomainError> {
        self.find_existing(id).await.map(|(_, user)| user.into())
    }

    #[instrument(skip(self, password))]
    pub async fn create_user(
        &self,
        name: String,
        email: String,
        password: &str,
    ) -> Result<ObjectId, DomainError> {
        let password_hash = hash(password)?;
        self.repo
            .create(User::new(name, email, password_hash))
            .await
    }

    /// Reports whether any user already holds `email`.
    pub async fn prevent_duplicate_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.repo.find_by_email(email).await?.is_some())
    }

    /// Like [`Self::prevent_duplicate_email`], but a user keeping their own
    /// email is not a conflict.
    pub async fn email_taken_by_other(&self, id: &str, email: &str) -> Result<bool, DomainError> {
        let holder = match ObjectId::parse_str(id) {
            Ok(oid) => self.repo.find_other_by_email(email, oid).await?,
            Err(_) => self.repo.find_by_email(email).await?,
        };
        Ok(holder.is_some())
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: &str, name: &str, email: &str) -> Result<(), DomainError> {
        let (oid, _) = self.find_existing(id).await?;
        self.repo.update_profile(oid, name, email).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        let (oid, _) = self.find_existing(id).await?;
        self.repo.delete(oid).await
    }

    /// Verifies `old_password` against the stored hash and replaces it with a
    /// hash of `new_password`.
    #[instrument(skip(self, old_password, new_password))]
    pub async fn check_old_password(
        &self,
        id: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let new_hash = hash(new_password)?;
        let (oid, user) = self.find_existing(id).await?;

        let matches = verify_password(old_password, &user.password_hash)
            .map_err(|err| DomainError::Hashing(err.to_string()))?;
        if !matches {
            return Err(DomainError::WrongPassword);
        }

        self.repo.update_password(oid, &new_hash).await
    }

    async fn find_existing(&self, id: &str) -> Result<(ObjectId, User), DomainError> {
        let oid = parse_id(id)?;
        let user = self
            .repo
            .find_by_id(oid)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
        Ok((oid, user))
    }
}
