use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("current password does not match")]
    WrongPassword,
    #[error("database error: {0}")]
    Database(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}
