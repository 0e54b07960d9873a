pub mod dto;
mod repo;
pub mod services;

pub use repo::NO_GENRES_LISTED;
