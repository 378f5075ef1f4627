pub mod seed_catalog;
