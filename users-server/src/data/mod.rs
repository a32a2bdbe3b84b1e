#[cfg(test)]
pub mod memory_repository;
pub mod user_repository;
