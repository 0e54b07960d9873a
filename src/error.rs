use std::collections::BTreeMap;

use crate::db::GraphError;

/// Errors surfaced by the DAOs.
///
/// Failed logins and invalid tokens are not errors; they come back as `None`.
#[derive(Debug, thiserror::Error)]
pub enum DaoError {
    #[error("{message}")]
    Validation {
        message: String,
        details: BTreeMap<String, String>,
    },
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DaoError {
    /// Validation error carrying a single field message.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut details = BTreeMap::new();
        details.insert(field.to_string(), message.clone());
        DaoError::Validation { message, details }
    }
}

pub type DaoResult<T> = Result<T, DaoError>;
