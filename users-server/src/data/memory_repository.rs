use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;

/// In-process stand-in for the users collection.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self, id: ObjectId) -> Option<User> {
        self.lock().iter().find(|u| u.id == Some(id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.lock().clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, DomainError> {
        Ok(self.stored(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let found = self.lock().iter().find(|u| u.email == email).cloned();
        // Hand control back like a real round trip would.
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn find_other_by_email(
        &self,
        email: &str,
        exclude: ObjectId,
    ) -> Result<Option<User>, DomainError> {
        let found = self
            .lock()
            .iter()
            .find(|u| u.email == email && u.id != Some(exclude))
            .cloned();
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn create(&self, mut user: User) -> Result<ObjectId, DomainError> {
        let id = ObjectId::new();
        user.id = Some(id);
        self.lock().push(user);
        Ok(id)
    }

    async fn update_profile(
        &self,
        id: ObjectId,
        name: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        if let Some(user) = self.lock().iter_mut().find(|u| u.id == Some(id)) {
            user.name = name.to_string();
            user.email = email.to_string();
        }
        Ok(())
    }

    async fn update_password(&self, id: ObjectId, password_hash: &str) -> Result<(), DomainError> {
        if let Some(user) = self.lock().iter_mut().find(|u| u.id == Some(id)) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<(), DomainError> {
        self.lock().retain(|u| u.id != Some(id));
        Ok(())
    }
}
