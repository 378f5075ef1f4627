pub mod json_source;
