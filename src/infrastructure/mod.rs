pub mod database;
pub mod source;
pub mod store;
