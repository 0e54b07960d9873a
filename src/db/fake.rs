//! Scripted in-memory session provider for unit tests.
//!
//! Replies are handed out in order, one per `run`. Every statement, commit
//! and rollback is recorded so tests can assert on what a DAO sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{AccessMode, GraphError, Record, SessionProvider, Statement, Transaction};

pub enum Reply {
    Rows(Vec<Record>),
    Fail(GraphError),
}

impl Reply {
    pub fn rows(rows: Vec<Record>) -> Self {
        Reply::Rows(rows)
    }

    /// Rows with a single column named `column`.
    pub fn column(column: &str, values: Vec<Value>) -> Self {
        Reply::Rows(
            values
                .into_iter()
                .map(|v| {
                    let mut record = Record::new();
                    record.insert(column.to_string(), v);
                    record
                })
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Reply::Rows(Vec::new())
    }
}

#[derive(Default)]
struct Inner {
    replies: VecDeque<Reply>,
    executed: Vec<(AccessMode, Statement)>,
    commits: usize,
    rollbacks: usize,
}

#[derive(Clone, Default)]
pub struct ScriptedGraph {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedGraph {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                replies: replies.into(),
                ..Inner::default()
            })),
        }
    }

    pub fn executed(&self) -> Vec<(AccessMode, Statement)> {
        self.inner.lock().unwrap().executed.clone()
    }

    pub fn last_statement(&self) -> Statement {
        self.executed().pop().expect("no statement executed").1
    }

    pub fn commits(&self) -> usize {
        self.inner.lock().unwrap().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.inner.lock().unwrap().rollbacks
    }
}

struct ScriptedTxn {
    mode: AccessMode,
    inner: Arc<Mutex<Inner>>,
}

#[async_trait]
impl Transaction for ScriptedTxn {
    async fn run(&mut self, statement: Statement) -> Result<Vec<Record>, GraphError> {
        let mut inner = self.inner.lock().unwrap();
        inner.executed.push((self.mode, statement));
        match inner.replies.pop_front() {
            Some(Reply::Rows(rows)) => Ok(rows),
            Some(Reply::Fail(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), GraphError> {
        self.inner.lock().unwrap().commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), GraphError> {
        self.inner.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}

#[async_trait]
impl SessionProvider for ScriptedGraph {
    async fn begin(&self, mode: AccessMode) -> Result<Box<dyn Transaction>, GraphError> {
        Ok(Box::new(ScriptedTxn {
            mode,
            inner: self.inner.clone(),
        }))
    }
}
