use crate::domain::error::DomainError;
use crate::domain::user::User;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::{Collection, Database};
use tracing::{error, info};

pub const USERS_COLLECTION: &str = "users";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// Finds a user holding `email` whose id is not `exclude`.
    async fn find_other_by_email(
        &self,
        email: &str,
        exclude: ObjectId,
    ) -> Result<Option<User>, DomainError>;
    /// Inserts the user and returns the id assigned by the database.
    async fn create(&self, user: User) -> Result<ObjectId, DomainError>;
    async fn update_profile(
        &self,
        id: ObjectId,
        name: &str,
        email: &str,
    ) -> Result<(), DomainError>;
    async fn update_password(&self, id: ObjectId, password_hash: &str) -> Result<(), DomainError>;
    async fn delete(&self, id: ObjectId) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(USERS_COLLECTION),
        }
    }
}

fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

fn other_holder(email: &str, exclude: ObjectId) -> Document {
    doc! { "email": email, "_id": { "$ne": exclude } }
}

fn profile_update(name: &str, email: &str) -> Document {
    doc! { "$set": { "name": name, "email": email } }
}

fn password_update(password_hash: &str) -> Document {
    doc! { "$set": { "password": password_hash } }
}

fn database_error(e: mongodb::error::Error) -> DomainError {
    DomainError::Database(e.to_string())
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let cursor = self.collection.find(doc! {}).await.map_err(|e| {
            error!("failed to list users: {}", e);
            database_error(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            error!("failed to read users cursor: {}", e);
            database_error(e)
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, DomainError> {
        self.collection.find_one(by_id(id)).await.map_err(|e| {
            error!("failed to find user by id {}: {}", id, e);
            database_error(e)
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| {
                error!("failed to find user by email {}: {}", email, e);
                database_error(e)
            })
    }

    async fn find_other_by_email(
        &self,
        email: &str,
        exclude: ObjectId,
    ) -> Result<Option<User>, DomainError> {
        self.collection
            .find_one(other_holder(email, exclude))
            .await
            .map_err(|e| {
                error!("failed to find other holder of email {}: {}", email, e);
                database_error(e)
            })
    }

    async fn create(&self, user: User) -> Result<ObjectId, DomainError> {
        let result = self.collection.insert_one(&user).await.map_err(|e| {
            error!("failed to create user: {}", e);
            database_error(e)
        })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            DomainError::Database(format!(
                "unexpected inserted id: {}",
                result.inserted_id
            ))
        })?;

        info!(user_id = %id, email = %user.email, "user created");
        Ok(id)
    }

    async fn update_profile(
        &self,
        id: ObjectId,
        name: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        self.collection
            .update_one(by_id(id), profile_update(name, email))
            .await
            .map_err(|e| {
                error!("failed to update user {}: {}", id, e);
                database_error(e)
            })?;

        info!(user_id = %id, "user updated");
        Ok(())
    }

    async fn update_password(&self, id: ObjectId, password_hash: &str) -> Result<(), DomainError> {
        self.collection
            .update_one(by_id(id), password_update(password_hash))
            .await
            .map_err(|e| {
                error!("failed to change password for user {}: {}", id, e);
                database_error(e)
            })?;

        info!(user_id = %id, "password changed");
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<(), DomainError> {
        self.collection.delete_one(by_id(id)).await.map_err(|e| {
            error!("failed to delete user {}: {}", id, e);
            database_error(e)
        })?;

        info!(user_id = %id, "user deleted");
        Ok(())
    }
}
