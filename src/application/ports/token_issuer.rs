/// Identity baked into a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Signs and verifies bearer tokens against the shared secret.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, identity: &TokenIdentity) -> anyhow::Result<String>;
    /// Fails on bad signature or expired token.
    fn decode(&self, token: &str) -> anyhow::Result<TokenIdentity>;
}
