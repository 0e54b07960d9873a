use serde::{Deserialize, Serialize};

use crate::movies::dto::Movie;

/// The rated movie together with the rating just stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedMovie {
    #[serde(flatten)]
    pub movie: Movie,
    pub rating: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reviewer {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One user's rating of a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub rating: f64,
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub user: Reviewer,
}
