pub mod errors;
pub mod repository;
