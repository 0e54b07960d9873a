pub mod dto;
mod repo;
pub mod services;
