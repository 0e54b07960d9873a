//! Session capability the DAOs run their units of work against.
//!
//! Each DAO call opens one transaction through [`SessionProvider::begin`],
//! runs its statements, and hands the transaction back to [`finish`], which
//! commits or rolls back depending on the outcome.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

#[cfg(test)]
pub mod fake;
pub mod neo4j;
pub mod schema;

/// One result row, keyed by the column names of the `RETURN` clause.
pub type Record = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Str(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Str(v)
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<u32> for Param {
    fn from(v: u32) -> Self {
        Param::Int(i64::from(v))
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Float(v)
    }
}

/// Cypher text plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,
    pub params: BTreeMap<String, Param>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<Param>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("could not decode `{column}`: {reason}")]
    Decode { column: String, reason: String },
    #[error(transparent)]
    Driver(#[from] anyhow::Error),
}

#[async_trait]
pub trait Transaction: Send {
    async fn run(&mut self, statement: Statement) -> Result<Vec<Record>, GraphError>;
    async fn commit(self: Box<Self>) -> Result<(), GraphError>;
    async fn rollback(self: Box<Self>) -> Result<(), GraphError>;
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn begin(&self, mode: AccessMode) -> Result<Box<dyn Transaction>, GraphError>;
}

/// Commits `tx` when `outcome` is `Ok`, rolls it back otherwise.
///
/// A failed rollback is logged and the original error is returned, so the
/// caller always sees the error that aborted the unit of work.
pub async fn finish<T, E>(tx: Box<dyn Transaction>, outcome: Result<T, E>) -> Result<T, E>
where
    E: From<GraphError>,
{
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                warn!(error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}

/// Takes `column` out of `record` and deserializes it.
pub fn take<T: DeserializeOwned>(record: &mut Record, column: &str) -> Result<T, GraphError> {
    let value = record.remove(column).unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| GraphError::Decode {
        column: column.to_string(),
        reason: e.to_string(),
    })
}

/// Deserializes `column` of every record.
pub fn take_all<T: DeserializeOwned>(records: Vec<Record>, column: &str) -> Result<Vec<T>, GraphError> {
    records
        .into_iter()
        .map(|mut record| take(&mut record, column))
        .collect()
}
