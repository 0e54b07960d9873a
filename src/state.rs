use std::sync::Arc;

use crate::auth::jwt::JwtKeys;
use crate::auth::services::AuthDao;
use crate::config::AppConfig;
use crate::db::{neo4j::Neo4jSessions, SessionProvider};
use crate::favorites::services::FavoriteDao;
use crate::genres::services::GenreDao;
use crate::movies::services::MovieDao;
use crate::ratings::services::RatingDao;

#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<dyn SessionProvider>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let graph = Arc::new(Neo4jSessions::connect(&config.neo4j).await?) as Arc<dyn SessionProvider>;
        Ok(Self { graph, config })
    }

    pub fn from_parts(graph: Arc<dyn SessionProvider>, config: Arc<AppConfig>) -> Self {
        Self { graph, config }
    }

    pub fn auth(&self) -> AuthDao {
        AuthDao::new(
            self.graph.clone(),
            JwtKeys::from(&self.config.jwt),
            self.config.password_hash_cost,
        )
    }

    pub fn movies(&self) -> MovieDao {
        MovieDao::new(self.graph.clone())
    }

    pub fn genres(&self) -> GenreDao {
        GenreDao::new(self.graph.clone())
    }

    pub fn favorites(&self) -> FavoriteDao {
        FavoriteDao::new(self.graph.clone())
    }

    pub fn ratings(&self) -> RatingDao {
        RatingDao::new(self.graph.clone(), self.config.ratings)
    }

    #[cfg(test)]
    pub fn fake(graph: crate::db::fake::ScriptedGraph) -> Self {
        Self::from_parts(Arc::new(graph), Arc::new(AppConfig::for_tests()))
    }
}
