use serde::{Deserialize, Serialize};

/// Public part of the user returned to callers. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// Returned after register or a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithToken {
    #[serde(flatten)]
    pub user: PublicUser,
    pub token: String,
}
