use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
    pub fetch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

/// Inclusive bounds accepted for a user's rating.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RatingBounds {
    pub min: i64,
    pub max: i64,
}

impl RatingBounds {
    pub fn contains(&self, rating: i64) -> bool {
        (self.min..=self.max).contains(&rating)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub neo4j: Neo4jConfig,
    pub jwt: JwtConfig,
    pub password_hash_cost: u32,
    pub ratings: RatingBounds,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let neo4j = Neo4jConfig {
            uri: std::env::var("NEO4J_URI")?,
            user: std::env::var("NEO4J_USERNAME").unwrap_or_else(|_| "neo4j".into()),
            password: std::env::var("NEO4J_PASSWORD")?,
            database: std::env::var("NEO4J_DATABASE").unwrap_or_else(|_| "neo4j".into()),
            max_connections: env_or("NEO4J_MAX_CONNECTIONS", 16),
            fetch_size: env_or("NEO4J_FETCH_SIZE", 200),
        };
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_minutes: env_or("JWT_TTL_MINUTES", 60),
        };
        let ratings = RatingBounds {
            min: env_or("RATING_MIN", 1),
            max: env_or("RATING_MAX", 5),
        };
        anyhow::ensure!(
            ratings.min <= ratings.max,
            "RATING_MIN must not exceed RATING_MAX"
        );
        Ok(Self {
            neo4j,
            jwt,
            password_hash_cost: env_or("PASSWORD_HASH_COST", bcrypt::DEFAULT_COST),
            ratings,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            neo4j: Neo4jConfig {
                uri: "bolt://localhost:7687".into(),
                user: "neo4j".into(),
                password: "test".into(),
                database: "neo4j".into(),
                max_connections: 1,
                fetch_size: 10,
            },
            jwt: JwtConfig {
                secret: "test-secret".into(),
                ttl_minutes: 5,
            },
            password_hash_cost: crate::auth::password::TEST_HASH_COST,
            ratings: RatingBounds { min: 1, max: 5 },
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
