use std::sync::Arc;

use tracing::{debug, instrument};

use super::dto::Genre;
use super::repo;
use crate::db::{finish, take, take_all, AccessMode, SessionProvider};
use crate::error::{DaoError, DaoResult};

pub struct GenreDao {
    graph: Arc<dyn SessionProvider>,
}

impl GenreDao {
    pub fn new(graph: Arc<dyn SessionProvider>) -> Self {
        Self { graph }
    }

    /// Every genre ordered by name, without the "(no genres listed)" marker.
    #[instrument(skip(self))]
    pub async fn all(&self) -> DaoResult<Vec<Genre>> {
        let mut tx = self.graph.begin(AccessMode::Read).await?;
        let outcome = tx.run(repo::all()).await;
        let rows = finish(tx, outcome).await?;
        let genres: Vec<Genre> = take_all(rows, "genre")?;
        debug!(count = genres.len(), "genres listed");
        Ok(genres)
    }

    #[instrument(skip(self))]
    pub async fn find(&self, name: &str) -> DaoResult<Genre> {
        let mut tx = self.graph.begin(AccessMode::Read).await?;
        let outcome = tx.run(repo::find(name)).await;
        let rows = finish(tx, outcome).await?;
        let mut row = rows.into_iter().next().ok_or(DaoError::NotFound("genre"))?;
        Ok(take(&mut row, "genre")?)
    }
}
