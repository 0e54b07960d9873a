use anyhow::Context;
use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Query, Txn};
use tracing::{debug, instrument};

use super::{AccessMode, GraphError, Param, Record, SessionProvider, Statement, Transaction};
use crate::config::Neo4jConfig;

const CONSTRAINT_FAILED: &str = "ConstraintValidationFailed";
const ALREADY_EXISTS: &str = "already exists with label";

/// Session provider backed by a `neo4rs` connection pool.
pub struct Neo4jSessions {
    graph: Graph,
}

impl Neo4jSessions {
    pub async fn connect(cfg: &Neo4jConfig) -> anyhow::Result<Self> {
        let config = ConfigBuilder::default()
            .uri(cfg.uri.as_str())
            .user(cfg.user.as_str())
            .password(cfg.password.as_str())
            .db(cfg.database.as_str())
            .max_connections(cfg.max_connections)
            .fetch_size(cfg.fetch_size)
            .build()
            .context("build neo4j config")?;
        let graph = Graph::connect(config)
            .await
            .with_context(|| format!("connect to neo4j at {}", cfg.uri))?;
        Ok(Self { graph })
    }
}

#[async_trait]
impl SessionProvider for Neo4jSessions {
    /// `neo4rs` 0.8 has no per-transaction access mode, so reads and writes
    /// open the same kind of transaction; `mode` is only recorded for logging.
    #[instrument(skip(self))]
    async fn begin(&self, mode: AccessMode) -> Result<Box<dyn Transaction>, GraphError> {
        let txn = self.graph.start_txn().await.map_err(classify)?;
        Ok(Box::new(Neo4jTxn { txn, mode }))
    }
}

struct Neo4jTxn {
    txn: Txn,
    mode: AccessMode,
}

#[async_trait]
impl Transaction for Neo4jTxn {
    async fn run(&mut self, statement: Statement) -> Result<Vec<Record>, GraphError> {
        let mut stream = self
            .txn
            .execute(to_query(statement))
            .await
            .map_err(classify)?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next(self.txn.handle()).await.map_err(classify)? {
            let record = row.to::<Record>().map_err(|e| GraphError::Decode {
                column: "*".into(),
                reason: e.to_string(),
            })?;
            rows.push(record);
        }
        debug!(mode = ?self.mode, rows = rows.len(), "statement executed");
        Ok(rows)
    }

    async fn commit(self: Box<Self>) -> Result<(), GraphError> {
        self.txn.commit().await.map_err(classify)
    }

    async fn rollback(self: Box<Self>) -> Result<(), GraphError> {
        self.txn.rollback().await.map_err(classify)
    }
}

fn to_query(statement: Statement) -> Query {
    let mut q = query(&statement.text);
    for (key, value) in statement.params {
        q = match value {
            Param::Str(s) => q.param(&key, s),
            Param::Int(i) => q.param(&key, i),
            Param::Float(f) => q.param(&key, f),
        };
    }
    q
}

fn classify(e: neo4rs::Error) -> GraphError {
    let message = e.to_string();
    if is_constraint_violation(&message) {
        GraphError::Constraint(message)
    } else {
        GraphError::Driver(anyhow::Error::new(e))
    }
}

fn is_constraint_violation(message: &str) -> bool {
    message.contains(CONSTRAINT_FAILED) || message.contains(ALREADY_EXISTS)
}
