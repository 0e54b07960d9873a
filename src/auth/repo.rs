use crate::auth::repo_types::User;
use crate::db::{take, GraphError, Statement, Transaction};

const USER_PROJECTION: &str = "u { .userId, .email, .name, .password } AS u";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(
        tx: &mut dyn Transaction,
        email: &str,
    ) -> Result<Option<User>, GraphError> {
        let statement = Statement::new(format!(
            r#"
            MATCH (u:User {{email: $email}})
            RETURN {USER_PROJECTION}
            "#
        ))
        .param("email", email);

        let mut rows = tx.run(statement).await?;
        match rows.first_mut() {
            Some(row) => Ok(Some(take(row, "u")?)),
            None => Ok(None),
        }
    }

    /// Create a new user with hashed password.
    pub async fn create(
        tx: &mut dyn Transaction,
        user_id: &str,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<User, GraphError> {
        let statement = Statement::new(format!(
            r#"
            CREATE (u:User {{
                userId: $userId,
                email: $email,
                password: $password,
                name: $name,
                createdAt: datetime()
            }})
            RETURN {USER_PROJECTION}
            "#
        ))
        .param("userId", user_id)
        .param("email", email)
        .param("password", password_hash)
        .param("name", name);

        let mut rows = tx.run(statement).await?;
        let row = rows.first_mut().ok_or_else(|| GraphError::Decode {
            column: "u".into(),
            reason: "CREATE returned no row".into(),
        })?;
        take(row, "u")
    }
}
