pub mod claims;
pub mod dto;
pub mod jwt;
pub mod password;
mod repo;
pub mod repo_types;
pub mod services;

pub use jwt::decode_token;
