use crate::db::Statement;

/// Genre that marks movies without any genre; never listed.
pub const NO_GENRES_LISTED: &str = "(no genres listed)";

const GENRE_PROJECTION: &str = r#"
        RETURN g {
            .name,
            movies: count { (g)<-[:IN_GENRE]-(:Movie) },
            poster: head(COLLECT {
                MATCH (g)<-[:IN_GENRE]-(m:Movie)
                WHERE m.imdbRating IS NOT NULL AND m.poster IS NOT NULL
                RETURN m.poster
                ORDER BY m.imdbRating DESC
                LIMIT 1
            })
        } AS genre"#;

pub fn all() -> Statement {
    Statement::new(format!(
        r#"
        MATCH (g:Genre)
        WHERE g.name <> $excluded
        {GENRE_PROJECTION}
        ORDER BY g.name ASC
        "#
    ))
    .param("excluded", NO_GENRES_LISTED)
}

pub fn find(name: &str) -> Statement {
    Statement::new(format!(
        r#"
        MATCH (g:Genre {{name: $name}})
        WHERE g.name <> $excluded
        {GENRE_PROJECTION}
        "#
    ))
    .param("name", name)
    .param("excluded", NO_GENRES_LISTED)
}
