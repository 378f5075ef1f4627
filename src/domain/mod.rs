pub mod city;
pub mod place;
pub mod record;
pub mod review;
pub mod shared;
pub mod store;
pub mod user;
