use tracing::error;

/// Cheapest bcrypt cost, for tests only.
#[cfg(test)]
pub const TEST_HASH_COST: u32 = 4;

pub fn hash_password(plain: &str, cost: u32) -> anyhow::Result<String> {
    bcrypt::hash(plain, cost).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        anyhow::anyhow!(e.to_string())
    })
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    bcrypt::verify(plain, hash).map_err(|e| {
        error!(error = %e, "bcrypt parse hash error");
        anyhow::anyhow!(e.to_string())
    })
}
