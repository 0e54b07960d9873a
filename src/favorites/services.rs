use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::repo;
use crate::db::{finish, take, take_all, AccessMode, Record, SessionProvider, Statement};
use crate::error::{DaoError, DaoResult};
use crate::movies::dto::Movie;
use crate::pagination::Page;

/// Manages the `HAS_FAVORITE` relationships between users and movies.
pub struct FavoriteDao {
    graph: Arc<dyn SessionProvider>,
}

impl FavoriteDao {
    pub fn new(graph: Arc<dyn SessionProvider>) -> Self {
        Self { graph }
    }

    #[instrument(skip(self))]
    pub async fn all(&self, user_id: &str, page: Page) -> DaoResult<Vec<Movie>> {
        let mut tx = self.graph.begin(AccessMode::Read).await?;
        let outcome = tx.run(repo::all(user_id, &page)).await;
        let rows = finish(tx, outcome).await?;
        let mut movies: Vec<Movie> = take_all(rows, "movie")?;
        for movie in &mut movies {
            movie.favorite = true;
        }
        debug!(count = movies.len(), "favorites listed");
        Ok(movies)
    }

    /// Fails with not-found when the user or the movie does not exist.
    #[instrument(skip(self))]
    pub async fn add(&self, user_id: &str, movie_id: &str) -> DaoResult<Movie> {
        let mut movie = self.write_one(repo::add(user_id, movie_id), "user or movie").await?;
        movie.favorite = true;
        info!(%user_id, %movie_id, "favorite added");
        Ok(movie)
    }

    /// Fails with not-found when there is no such favorite to remove.
    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: &str, movie_id: &str) -> DaoResult<Movie> {
        let mut movie = self.write_one(repo::remove(user_id, movie_id), "favorite").await?;
        movie.favorite = false;
        info!(%user_id, %movie_id, "favorite removed");
        Ok(movie)
    }

    async fn write_one(&self, statement: Statement, missing: &'static str) -> DaoResult<Movie> {
        let mut tx = self.graph.begin(AccessMode::Write).await?;
        let outcome = match tx.run(statement).await {
            Ok(rows) => first_row(rows, missing),
            Err(e) => Err(e.into()),
        };
        let mut row = finish(tx, outcome).await?;
        Ok(take(&mut row, "movie")?)
    }
}

fn first_row(rows: Vec<Record>, missing: &'static str) -> DaoResult<Record> {
    rows.into_iter().next().ok_or(DaoError::NotFound(missing))
}
