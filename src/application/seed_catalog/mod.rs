pub mod dto;
mod staging;
pub mod use_case;
