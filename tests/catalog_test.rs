//! End-to-end checks against a live Neo4j loaded with the recommendations
//! dataset. Configure it through the usual environment variables and run
//! with `--ignored`.

use movie_catalog::db::{finish, AccessMode, SessionProvider, Statement, Transaction};
use movie_catalog::pagination::Page;
use movie_catalog::{AppState, DaoError};

const TOY_STORY: &str = "862";
const GOODFELLAS: &str = "769";

async fn state() -> AppState {
    dotenvy::dotenv().ok();
    AppState::init().await.expect("neo4j reachable")
}

async fn write(state: &AppState, statement: Statement) {
    let mut tx = state.graph.begin(AccessMode::Write).await.unwrap();
    let outcome = tx.run(statement).await;
    finish(tx, outcome).await.unwrap();
}

async fn merge_user(state: &AppState, user_id: &str, email: &str) {
    write(
        state,
        Statement::new("MERGE (u:User {userId: $userId}) SET u.email = $email")
            .param("userId", user_id)
            .param("email", email),
    )
    .await;
}

#[tokio::test]
#[ignore = "requires a running Neo4j with the recommendations dataset"]
async fn register_then_authenticate() {
    let state = state().await;
    let email = "graphacademy@neo4j.com";
    write(
        &state,
        Statement::new("MATCH (u:User {email: $email}) DETACH DELETE u").param("email", email),
    )
    .await;

    let auth = state.auth();
    let user = auth.register(email, "letmein", "Graph Academy").await.unwrap();
    assert!(!user.user.user_id.is_empty());
    assert_eq!(user.user.name, "Graph Academy");
    assert!(serde_json::to_value(&user).unwrap().get("password").is_none());

    let again = auth.register(email, "letmein", "Graph Academy").await.unwrap_err();
    assert!(matches!(again, DaoError::Validation { .. }));

    let login = auth.authenticate(email, "letmein").await.unwrap().unwrap();
    let claims = movie_catalog::auth::decode_token(&login.token, &state.config.jwt.secret).unwrap();
    assert_eq!(claims.user_id, user.user.user_id);

    assert!(auth.authenticate(email, "unknown").await.unwrap().is_none());
    assert!(auth.authenticate("unknown@neo4j.com", "letmein").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a running Neo4j with the recommendations dataset"]
async fn favorites_round_trip() {
    let state = state().await;
    let user_id = "9f965bf6-7e32-4afb-893f-756f502b2c2a";
    merge_user(&state, user_id, "graphacademy.favorite@neo4j.com").await;
    let favorites = state.favorites();

    assert!(matches!(
        favorites.add(user_id, "9999").await.unwrap_err(),
        DaoError::NotFound(_)
    ));
    assert!(matches!(
        favorites.remove(user_id, "9999").await.unwrap_err(),
        DaoError::NotFound(_)
    ));

    let added = favorites.add(user_id, TOY_STORY).await.unwrap();
    assert!(added.favorite);
    favorites.add(user_id, TOY_STORY).await.unwrap();
    let page: Page = Page {
        limit: 100,
        ..Page::default()
    };
    let all = favorites.all(user_id, page).await.unwrap();
    assert_eq!(all.iter().filter(|m| m.tmdb_id == TOY_STORY).count(), 1);
    assert!(all.iter().all(|m| m.favorite));

    favorites.add(user_id, GOODFELLAS).await.unwrap();
    let removed = favorites.remove(user_id, GOODFELLAS).await.unwrap();
    assert_eq!(removed.tmdb_id, GOODFELLAS);
    assert!(!removed.favorite);
    let all = favorites.all(user_id, page).await.unwrap();
    assert!(all.iter().all(|m| m.tmdb_id != GOODFELLAS));

    let listed = state.movies().find_by_id(TOY_STORY, Some(user_id)).await.unwrap();
    assert!(listed.movie.favorite);
}

#[tokio::test]
#[ignore = "requires a running Neo4j with the recommendations dataset"]
async fn genres_are_listed_alphabetically() {
    let state = state().await;
    let mut genres = state.genres().all().await.unwrap();

    assert_eq!(genres.len(), 19);
    assert_eq!(genres[0].name, "Action");
    assert_eq!(genres[18].name, "Western");

    genres.sort_by(|a, b| b.movies.cmp(&a.movies));
    assert!(genres[0].movies >= genres[18].movies);

    assert!(matches!(
        state.genres().find(movie_catalog::genres::NO_GENRES_LISTED).await.unwrap_err(),
        DaoError::NotFound(_)
    ));
}

#[tokio::test]
#[ignore = "requires a running Neo4j with the recommendations dataset"]
async fn rating_is_stored_as_an_integer() {
    let state = state().await;
    let user_id = "1185150b-9e81-46a2-a1d3-eb649544b9c4";
    merge_user(&state, user_id, "graphacademy.reviewer@neo4j.com").await;

    let out = state.ratings().add(user_id, GOODFELLAS, 5).await.unwrap();
    assert_eq!(out.movie.tmdb_id, GOODFELLAS);
    assert_eq!(out.rating, 5);
}

#[tokio::test]
#[ignore = "requires a running Neo4j with the recommendations dataset"]
async fn similar_movies_exclude_the_reference() {
    let state = state().await;
    let similar = state.movies().similar(TOY_STORY, 6, 0, None).await.unwrap();

    assert!(similar.len() <= 6);
    assert!(similar.iter().all(|m| m.tmdb_id != TOY_STORY));
    let scores: Vec<i64> = similar
        .iter()
        .filter_map(|m| m.properties.get("score").and_then(|s| s.as_i64()))
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}
