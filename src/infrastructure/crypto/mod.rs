use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::application::ports::token_issuer::{TokenIdentity, TokenIssuer};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: i32,
    username: String,
    email: String,
    exp: usize,
    /// Random per issuance, so two logins in the same second still rotate
    /// to a distinct token.
    jti: String,
}

pub struct JwtTokenIssuer {
    secret: String,
    expires_secs: i64,
}

impl JwtTokenIssuer {
    pub fn new(secret: impl Into<String>, expires_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            expires_secs,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, identity: &TokenIdentity) -> anyhow::Result<String> {
        let mut nonce = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut nonce);
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            exp: (now + self.expires_secs).max(0) as usize,
            jti: nonce.iter().map(|b| format!("{b:02x}")).collect(),
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    fn decode(&self, token: &str) -> anyhow::Result<TokenIdentity> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(TokenIdentity {
            id: data.claims.id,
            username: data.claims.username,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> TokenIdentity {
        TokenIdentity {
            id: 3,
            username: "ana".into(),
            email: "ana@example.com".into(),
        }
    }

    #[test]
    fn issue_and_decode_round_trip() {
        let issuer = JwtTokenIssuer::new("test-secret", 3600);
        let token = issuer.issue(&identity()).unwrap();
        let decoded = issuer.decode(&token).unwrap();
        assert_eq!(decoded, identity());
    }

    #[test]
    fn successive_tokens_differ() {
        let issuer = JwtTokenIssuer::new("test-secret", 3600);
        let a = issuer.issue(&identity()).unwrap();
        let b = issuer.issue(&identity()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_an_expired_token() {
        let issuer = JwtTokenIssuer::new("test-secret", -3600);
        let token = issuer.issue(&identity()).unwrap();
        assert!(issuer.decode(&token).is_err());
    }

    #[test]
    fn rejects_a_foreign_secret() {
        let token = JwtTokenIssuer::new("one-secret", 3600)
            .issue(&identity())
            .unwrap();
        assert!(JwtTokenIssuer::new("other-secret", 3600).decode(&token).is_err());
    }
}
