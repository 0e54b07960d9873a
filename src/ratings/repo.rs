use crate::db::Statement;
use crate::pagination::{Page, RatingSort};

/// Creates or updates the user's rating; the timestamp moves with every update.
pub fn add(user_id: &str, movie_id: &str, rating: i64) -> Statement {
    Statement::new(
        r#"
        MATCH (u:User {userId: $userId})
        MATCH (m:Movie {tmdbId: $movieId})
        MERGE (u)-[r:RATED]->(m)
        SET r.rating = $rating, r.timestamp = timestamp()
        RETURN m { .*, rating: r.rating } AS movie
        "#,
    )
    .param("userId", user_id)
    .param("movieId", movie_id)
    .param("rating", rating)
}

pub fn for_movie(movie_id: &str, page: &Page<RatingSort>) -> Statement {
    Statement::new(format!(
        r#"
        MATCH (u:User)-[r:RATED]->(:Movie {{tmdbId: $movieId}})
        RETURN r {{
            .rating,
            .timestamp,
            user: u {{ .userId, .name }}
        }} AS review
        {order_by}
        SKIP $skip
        LIMIT $limit
        "#,
        order_by = page.order_by("r"),
    ))
    .param("movieId", movie_id)
    .param("skip", page.skip)
    .param("limit", page.limit)
}
