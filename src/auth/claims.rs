use serde::{Deserialize, Serialize};

/// JWT payload issued on register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub sub: String, // same as user_id
    pub iat: i64,    // issued at (unix timestamp)
    pub nbf: i64,    // not before, equal to iat
    pub exp: i64,    // expires at (unix timestamp)
}
