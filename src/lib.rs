//! Data-access layer for a movie catalog stored in Neo4j.
//!
//! Users register and log in through [`auth`], browse [`movies`] and
//! [`genres`], keep a list of [`favorites`] and leave [`ratings`]. Every
//! operation runs as one transaction obtained from a [`db::SessionProvider`].

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod favorites;
pub mod genres;
pub mod movies;
pub mod pagination;
pub mod ratings;
pub mod state;

pub use error::{DaoError, DaoResult};
pub use state::AppState;
