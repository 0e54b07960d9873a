use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{PublicUser, UserWithToken};
use super::jwt::JwtKeys;
use super::password::{hash_password, verify_password};
use super::repo_types::User;
use crate::db::{finish, AccessMode, GraphError, SessionProvider};
use crate::error::{DaoError, DaoResult};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthDao {
    graph: Arc<dyn SessionProvider>,
    keys: JwtKeys,
    hash_cost: u32,
}

impl AuthDao {
    pub fn new(graph: Arc<dyn SessionProvider>, keys: JwtKeys, hash_cost: u32) -> Self {
        Self {
            graph,
            keys,
            hash_cost,
        }
    }

    /// Creates a User node and returns it with a freshly signed token.
    ///
    /// A taken email fails with a validation error keyed by `email`.
    #[instrument(skip(self, plain_password))]
    pub async fn register(
        &self,
        email: &str,
        plain_password: &str,
        name: &str,
    ) -> DaoResult<UserWithToken> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            warn!(email = %email, "invalid email");
            return Err(DaoError::validation("email", "Invalid email"));
        }

        let hash = hash_password(plain_password, self.hash_cost)?;
        let user_id = Uuid::new_v4().to_string();

        let mut tx = self.graph.begin(AccessMode::Write).await?;
        let outcome = User::create(tx.as_mut(), &user_id, &email, &hash, name).await;
        let user = match finish(tx, outcome).await {
            Ok(u) => u,
            Err(GraphError::Constraint(reason)) => {
                warn!(email = %email, %reason, "email already registered");
                return Err(DaoError::validation(
                    "email",
                    format!("An account already exists with the email address {email}"),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let user = PublicUser::from(user);
        let token = self.keys.sign(&user)?;
        info!(user_id = %user.user_id, email = %user.email, "user registered");
        Ok(UserWithToken { user, token })
    }

    /// Checks the credentials; `None` when the email is unknown or the
    /// password does not match.
    #[instrument(skip(self, plain_password))]
    pub async fn authenticate(
        &self,
        email: &str,
        plain_password: &str,
    ) -> DaoResult<Option<UserWithToken>> {
        let email = normalize_email(email);

        let mut tx = self.graph.begin(AccessMode::Read).await?;
        let outcome = User::find_by_email(tx.as_mut(), &email).await;
        let Some(user) = finish(tx, outcome).await? else {
            warn!(email = %email, "login unknown email");
            return Ok(None);
        };

        let Some(hash) = user.password.as_deref() else {
            warn!(user_id = %user.user_id, "login for user without password");
            return Ok(None);
        };
        if !verify_password(plain_password, hash)? {
            warn!(user_id = %user.user_id, "login invalid password");
            return Ok(None);
        }

        let user = PublicUser::from(user);
        let token = self.keys.sign(&user)?;
        info!(user_id = %user.user_id, "user logged in");
        Ok(Some(UserWithToken { user, token }))
    }

    /// Claims of `token` if it was signed with this DAO's key and is still valid.
    pub fn decode(&self, token: &str) -> Option<super::claims::Claims> {
        self.keys.decode(token)
    }
}
