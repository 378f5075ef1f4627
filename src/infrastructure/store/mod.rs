pub mod memory_store;
pub mod postgres_store;
pub mod redis_store;
