use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A movie as returned to callers.
///
/// Properties without a dedicated field (`year`, `plot`, `languages`, …)
/// are kept in `properties` and serialized inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub tmdb_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub tmdb_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub poster: Option<String>,
}

/// An actor together with the part they played in one movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(flatten)]
    pub person: Person,
    #[serde(default)]
    pub role: Option<String>,
}

/// A single movie enriched with its cast, crew and genres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub actors: Vec<CastMember>,
    #[serde(default)]
    pub directors: Vec<Person>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating_count: i64,
}
