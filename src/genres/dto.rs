use serde::{Deserialize, Serialize};

/// A genre with the number of movies in it and the poster of its
/// highest-rated movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    pub movies: i64,
    #[serde(default)]
    pub poster: Option<String>,
}
