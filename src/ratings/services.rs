use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::dto::{RatedMovie, Review};
use super::repo;
use crate::config::RatingBounds;
use crate::db::{finish, take, take_all, AccessMode, SessionProvider};
use crate::error::{DaoError, DaoResult};
use crate::pagination::{Page, RatingSort};

pub struct RatingDao {
    graph: Arc<dyn SessionProvider>,
    bounds: RatingBounds,
}

impl RatingDao {
    pub fn new(graph: Arc<dyn SessionProvider>, bounds: RatingBounds) -> Self {
        Self { graph, bounds }
    }

    /// Stores `rating` for the user and movie, replacing any earlier one.
    #[instrument(skip(self))]
    pub async fn add(&self, user_id: &str, movie_id: &str, rating: i64) -> DaoResult<RatedMovie> {
        if !self.bounds.contains(rating) {
            warn!(rating, "rating out of bounds");
            return Err(DaoError::validation(
                "rating",
                format!(
                    "Rating must be between {} and {}",
                    self.bounds.min, self.bounds.max
                ),
            ));
        }

        let mut tx = self.graph.begin(AccessMode::Write).await?;
        let outcome = match tx.run(repo::add(user_id, movie_id, rating)).await {
            Ok(rows) => rows
                .into_iter()
                .next()
                .ok_or(DaoError::NotFound("user or movie")),
            Err(e) => Err(e.into()),
        };
        let mut row = finish(tx, outcome).await?;
        let rated: RatedMovie = take(&mut row, "movie")?;
        info!(%user_id, %movie_id, rating, "movie rated");
        Ok(rated)
    }

    /// Reviews left for `movie_id`, newest first by default.
    #[instrument(skip(self))]
    pub async fn for_movie(&self, movie_id: &str, page: Page<RatingSort>) -> DaoResult<Vec<Review>> {
        let mut tx = self.graph.begin(AccessMode::Read).await?;
        let outcome = tx.run(repo::for_movie(movie_id, &page)).await;
        let rows = finish(tx, outcome).await?;
        let reviews: Vec<Review> = take_all(rows, "review")?;
        debug!(count = reviews.len(), "reviews listed");
        Ok(reviews)
    }
}
