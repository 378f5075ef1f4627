pub mod collection;
pub mod document;
pub mod schema;
pub mod value_objects;
pub mod violation;
