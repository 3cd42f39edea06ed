#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Argon2 hash at rest; never leaves the API surface.
    pub password: Option<String>,
    /// Current bearer session token. One active session per user; rotated
    /// on every login.
    pub token: Option<String>,
}
