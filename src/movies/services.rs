use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::dto::{Movie, MovieDetails};
use super::repo::{self, COLUMN};
use crate::db::{finish, take, take_all, AccessMode, SessionProvider, Statement, Transaction};
use crate::error::{DaoError, DaoResult};
use crate::favorites::repo::user_favorites;
use crate::pagination::Page;

pub struct MovieDao {
    graph: Arc<dyn SessionProvider>,
}

impl MovieDao {
    pub fn new(graph: Arc<dyn SessionProvider>) -> Self {
        Self { graph }
    }

    /// Movies that have a value for the sort property, one page at a time.
    #[instrument(skip(self))]
    pub async fn all(&self, page: Page, user_id: Option<&str>) -> DaoResult<Vec<Movie>> {
        self.list(repo::all(&page), user_id).await
    }

    #[instrument(skip(self))]
    pub async fn by_genre(
        &self,
        name: &str,
        page: Page,
        user_id: Option<&str>,
    ) -> DaoResult<Vec<Movie>> {
        self.list(repo::by_genre(name, &page), user_id).await
    }

    #[instrument(skip(self))]
    pub async fn for_actor(
        &self,
        person_id: &str,
        page: Page,
        user_id: Option<&str>,
    ) -> DaoResult<Vec<Movie>> {
        self.list(repo::for_actor(person_id, &page), user_id).await
    }

    #[instrument(skip(self))]
    pub async fn for_director(
        &self,
        person_id: &str,
        page: Page,
        user_id: Option<&str>,
    ) -> DaoResult<Vec<Movie>> {
        self.list(repo::for_director(person_id, &page), user_id).await
    }

    /// Movies ranked by how many actors, directors and genres they share
    /// with `movie_id`. Each carries its `score`.
    #[instrument(skip(self))]
    pub async fn similar(
        &self,
        movie_id: &str,
        limit: u32,
        skip: u32,
        user_id: Option<&str>,
    ) -> DaoResult<Vec<Movie>> {
        self.list(repo::similar(movie_id, limit, skip), user_id).await
    }

    /// One movie with actors, directors, genre names and rating count.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, movie_id: &str, user_id: Option<&str>) -> DaoResult<MovieDetails> {
        let mut tx = self.graph.begin(AccessMode::Read).await?;
        let outcome = find_in(tx.as_mut(), movie_id, user_id).await;
        finish(tx, outcome).await
    }

    async fn list(&self, statement: Statement, user_id: Option<&str>) -> DaoResult<Vec<Movie>> {
        let mut tx = self.graph.begin(AccessMode::Read).await?;
        let outcome = list_in(tx.as_mut(), statement, user_id).await;
        let movies = finish(tx, outcome).await?;
        debug!(count = movies.len(), "movies listed");
        Ok(movies)
    }
}

async fn list_in(
    tx: &mut dyn Transaction,
    statement: Statement,
    user_id: Option<&str>,
) -> DaoResult<Vec<Movie>> {
    let favorites = user_favorites(tx, user_id).await?;
    let rows = tx.run(statement).await?;
    let mut movies: Vec<Movie> = take_all(rows, COLUMN)?;
    mark_favorites(&mut movies, &favorites);
    Ok(movies)
}

async fn find_in(
    tx: &mut dyn Transaction,
    movie_id: &str,
    user_id: Option<&str>,
) -> DaoResult<MovieDetails> {
    let favorites = user_favorites(tx, user_id).await?;
    let mut rows = tx.run(repo::by_id(movie_id)).await?;
    let row = rows.first_mut().ok_or(DaoError::NotFound("movie"))?;
    let mut details: MovieDetails = take(row, COLUMN)?;
    details.movie.favorite = favorites.contains(&details.movie.tmdb_id);
    Ok(details)
}

pub(crate) fn mark_favorites(movies: &mut [Movie], favorites: &HashSet<String>) {
    for movie in movies {
        movie.favorite = favorites.contains(&movie.tmdb_id);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::fake::{Reply, ScriptedGraph};
    use crate::state::AppState;

    const USER: &str = "9f965bf6-7e32-4afb-893f-756f502b2c2a";

    fn movies() -> Reply {
        Reply::column(
            "movie",
            vec![
                json!({"tmdbId": "862", "title": "Toy Story", "imdbRating": 8.3, "year": 1995}),
                json!({"tmdbId": "769", "title": "Goodfellas", "imdbRating": 8.7}),
            ],
        )
    }

    #[tokio::test]
    async fn all_without_user_skips_favorites_lookup() {
        let graph = ScriptedGraph::new(vec![movies()]);
        let state = AppState::fake(graph.clone());

        let out = state.movies().all(Page::default(), None).await.unwrap();

        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|m| !m.favorite));
        assert_eq!(out[0].properties.get("year"), Some(&json!(1995)));
        assert_eq!(graph.executed().len(), 1);
        assert_eq!(graph.executed()[0].0, AccessMode::Read);
        assert_eq!(graph.commits(), 1);
    }

    #[tokio::test]
    async fn all_marks_the_users_favorites() {
        let graph = ScriptedGraph::new(vec![
            Reply::column("id", vec![json!("769")]),
            movies(),
        ]);
        let state = AppState::fake(graph.clone());

        let out = state.movies().all(Page::default(), Some(USER)).await.unwrap();

        let flags: Vec<(&str, bool)> = out.iter().map(|m| (m.tmdb_id.as_str(), m.favorite)).collect();
        assert_eq!(flags, vec![("862", false), ("769", true)]);
        assert_eq!(graph.executed().len(), 2);
    }

    #[tokio::test]
    async fn by_genre_passes_the_genre_as_a_parameter() {
        let graph = ScriptedGraph::new(vec![movies()]);
        let state = AppState::fake(graph.clone());

        state.movies().by_genre("Comedy", Page::default(), None).await.unwrap();

        let st = graph.last_statement();
        assert_eq!(st.params.get("name"), Some(&crate::db::Param::Str("Comedy".into())));
        assert!(!st.text.contains("Comedy"));
    }

    #[tokio::test]
    async fn similar_keeps_the_score() {
        let graph = ScriptedGraph::new(vec![Reply::column(
            "movie",
            vec![json!({"tmdbId": "863", "title": "Toy Story 2", "score": 9})],
        )]);
        let state = AppState::fake(graph);

        let out = state.movies().similar("862", 6, 0, None).await.unwrap();
        assert_eq!(out[0].properties.get("score"), Some(&json!(9)));
    }

    #[tokio::test]
    async fn find_by_id_enriches_the_movie() {
        let graph = ScriptedGraph::new(vec![
            Reply::column("id", vec![json!("862")]),
            Reply::column(
                "movie",
                vec![json!({
                    "tmdbId": "862",
                    "title": "Toy Story",
                    "actors": [{"tmdbId": "31", "name": "Tom Hanks", "role": "Woody"}],
                    "directors": [{"tmdbId": "7879", "name": "John Lasseter"}],
                    "genres": ["Adventure", "Animation"],
                    "ratingCount": 247
                })],
            ),
        ]);
        let state = AppState::fake(graph);

        let out = state.movies().find_by_id("862", Some(USER)).await.unwrap();

        assert!(out.movie.favorite);
        assert_eq!(out.actors[0].person.name, "Tom Hanks");
        assert_eq!(out.actors[0].role.as_deref(), Some("Woody"));
        assert_eq!(out.directors.len(), 1);
        assert_eq!(out.genres, vec!["Adventure", "Animation"]);
        assert_eq!(out.rating_count, 247);
        assert!(out.movie.properties.get("actors").is_none());
    }

    #[tokio::test]
    async fn find_by_id_unknown_movie_is_not_found() {
        let graph = ScriptedGraph::new(vec![Reply::empty()]);
        let state = AppState::fake(graph.clone());

        let err = state.movies().find_by_id("9999", None).await.unwrap_err();
        assert!(matches!(err, DaoError::NotFound("movie")));
        assert_eq!(graph.rollbacks(), 1);
    }
}
