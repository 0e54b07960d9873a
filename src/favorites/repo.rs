use std::collections::HashSet;

use crate::db::{take_all, GraphError, Statement, Transaction};
use crate::pagination::Page;

/// Ids of the movies `user_id` has favorited; empty for anonymous callers.
///
/// Runs inside the caller's transaction so listing and flagging see the
/// same snapshot.
pub async fn user_favorites(
    tx: &mut dyn Transaction,
    user_id: Option<&str>,
) -> Result<HashSet<String>, GraphError> {
    let Some(user_id) = user_id else {
        return Ok(HashSet::new());
    };
    let rows = tx
        .run(
            Statement::new(
                r#"
                MATCH (:User {userId: $userId})-[:HAS_FAVORITE]->(m:Movie)
                RETURN m.tmdbId AS id
                "#,
            )
            .param("userId", user_id),
        )
        .await?;
    let ids: Vec<String> = take_all(rows, "id")?;
    Ok(ids.into_iter().collect())
}

pub fn all(user_id: &str, page: &Page) -> Statement {
    Statement::new(format!(
        r#"
        MATCH (u:User {{userId: $userId}})-[:HAS_FAVORITE]->(m:Movie)
        RETURN m {{ .* }} AS movie
        {order_by}
        SKIP $skip
        LIMIT $limit
        "#,
        order_by = page.order_by("m"),
    ))
    .param("userId", user_id)
    .param("skip", page.skip)
    .param("limit", page.limit)
}

/// MERGE keeps the relationship unique; `createdAt` is only set the first time.
pub fn add(user_id: &str, movie_id: &str) -> Statement {
    Statement::new(
        r#"
        MATCH (u:User {userId: $userId})
        MATCH (m:Movie {tmdbId: $movieId})
        MERGE (u)-[r:HAS_FAVORITE]->(m)
        ON CREATE SET r.createdAt = datetime()
        RETURN m { .* } AS movie
        "#,
    )
    .param("userId", user_id)
    .param("movieId", movie_id)
}

pub fn remove(user_id: &str, movie_id: &str) -> Statement {
    Statement::new(
        r#"
        MATCH (u:User {userId: $userId})-[r:HAS_FAVORITE]->(m:Movie {tmdbId: $movieId})
        DELETE r
        RETURN m { .* } AS movie
        "#,
    )
    .param("userId", user_id)
    .param("movieId", movie_id)
}
