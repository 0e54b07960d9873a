//! Cypher for the movie queries.
//!
//! Every list query returns one `movie` column holding a map projection of
//! the movie node. The `favorite` flag is filled in by the caller.

use crate::db::Statement;
use crate::pagination::{Page, SortKey};

pub(crate) const COLUMN: &str = "movie";

fn paginated(match_clause: &str, page: &Page) -> String {
    let property = page.sort.property();
    format!(
        r#"
        {match_clause}
        WHERE m.`{property}` IS NOT NULL
        RETURN m {{ .* }} AS movie
        {order_by}
        SKIP $skip
        LIMIT $limit
        "#,
        order_by = page.order_by("m"),
    )
}

fn with_page(text: String, page: &Page) -> Statement {
    Statement::new(text)
        .param("skip", page.skip)
        .param("limit", page.limit)
}

pub fn all(page: &Page) -> Statement {
    with_page(paginated("MATCH (m:Movie)", page), page)
}

pub fn by_genre(name: &str, page: &Page) -> Statement {
    with_page(
        paginated("MATCH (m:Movie)-[:IN_GENRE]->(:Genre {name: $name})", page),
        page,
    )
    .param("name", name)
}

pub fn for_actor(person_id: &str, page: &Page) -> Statement {
    with_page(
        paginated("MATCH (:Person {tmdbId: $id})-[:ACTED_IN]->(m:Movie)", page),
        page,
    )
    .param("id", person_id)
}

pub fn for_director(person_id: &str, page: &Page) -> Statement {
    with_page(
        paginated("MATCH (:Person {tmdbId: $id})-[:DIRECTED]->(m:Movie)", page),
        page,
    )
    .param("id", person_id)
}

/// Movies sharing the most actors, directors and genres with `movie_id`.
///
/// Ties on the shared-neighbour count fall back to rating, then id, so
/// consecutive pages never overlap.
pub fn similar(movie_id: &str, limit: u32, skip: u32) -> Statement {
    Statement::new(
        r#"
        MATCH (ref:Movie {tmdbId: $id})-[:IN_GENRE|ACTED_IN|DIRECTED]-(shared)
              -[:IN_GENRE|ACTED_IN|DIRECTED]-(m:Movie)
        WHERE m <> ref
        WITH m, count(DISTINCT shared) AS inCommon
        RETURN m { .*, score: inCommon } AS movie
        ORDER BY inCommon DESC, coalesce(m.imdbRating, 0) DESC, m.tmdbId ASC
        SKIP $skip
        LIMIT $limit
        "#,
    )
    .param("id", movie_id)
    .param("skip", skip)
    .param("limit", limit)
}

pub fn by_id(movie_id: &str) -> Statement {
    Statement::new(
        r#"
        MATCH (m:Movie {tmdbId: $id})
        RETURN m {
            .*,
            actors: [ (a:Person)-[r:ACTED_IN]->(m) | a { .tmdbId, .name, .poster, role: r.role } ],
            directors: [ (d:Person)-[:DIRECTED]->(m) | d { .tmdbId, .name, .poster } ],
            genres: [ (m)-[:IN_GENRE]->(g:Genre) | g.name ],
            ratingCount: count { (m)<-[:RATED]-(:User) }
        } AS movie
        LIMIT 1
        "#,
    )
    .param("id", movie_id)
}
