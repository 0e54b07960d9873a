use movie_catalog::{db::schema, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "movie_catalog=debug,neo4rs=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init().await?;
    schema::ensure_constraints(state.graph.as_ref()).await?;

    let genres = state.genres().all().await?;
    tracing::info!(genres = genres.len(), database = %state.config.neo4j.database, "catalog ready");

    Ok(())
}
