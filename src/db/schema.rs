use tracing::{info, instrument};

use super::{finish, AccessMode, GraphError, SessionProvider, Statement};

const CONSTRAINTS: &[&str] = &[
    "CREATE CONSTRAINT user_id IF NOT EXISTS FOR (u:User) REQUIRE u.userId IS UNIQUE",
    "CREATE CONSTRAINT user_email IF NOT EXISTS FOR (u:User) REQUIRE u.email IS UNIQUE",
    "CREATE CONSTRAINT movie_tmdb_id IF NOT EXISTS FOR (m:Movie) REQUIRE m.tmdbId IS UNIQUE",
    "CREATE CONSTRAINT genre_name IF NOT EXISTS FOR (g:Genre) REQUIRE g.name IS UNIQUE",
    "CREATE CONSTRAINT person_tmdb_id IF NOT EXISTS FOR (p:Person) REQUIRE p.tmdbId IS UNIQUE",
];

/// Creates the uniqueness constraints the DAOs rely on.
///
/// Schema changes cannot share a transaction with each other, so every
/// constraint gets its own.
#[instrument(skip(graph))]
pub async fn ensure_constraints(graph: &dyn SessionProvider) -> Result<(), GraphError> {
    for cypher in CONSTRAINTS {
        let mut tx = graph.begin(AccessMode::Write).await?;
        let outcome = tx.run(Statement::new(*cypher)).await.map(|_| ());
        finish(tx, outcome).await?;
    }
    info!(count = CONSTRAINTS.len(), "schema constraints ensured");
    Ok(())
}
