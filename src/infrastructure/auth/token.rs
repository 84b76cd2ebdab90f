//! Access token issuance and verification
//!
//! Stateless bearer tokens: a signed claim set carrying the subject's
//! username and an absolute expiry. Nothing is stored server-side; a token
//! simply stops verifying once it expires or its signature no longer
//! matches the current key pair.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

use crate::domain::{User, UserRepository};

use super::error::AuthError;
use super::keys::KeyPair;

/// Claim set carried inside an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identifier (username)
    pub user: String,
    /// Absolute expiry, seconds since the Unix epoch
    pub exp: i64,
    /// Any additional claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    /// Claims for a subject; the expiry is stamped at issue time.
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            exp: 0,
            extra: Map::new(),
        }
    }

    /// Attach an additional claim
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// Parse a configured signing algorithm name.
///
/// Only the RSA family is accepted since the key store holds RSA material.
pub fn signing_algorithm(name: &str) -> Result<Algorithm, AuthError> {
    match name {
        "RS256" => Ok(Algorithm::RS256),
        "RS384" => Ok(Algorithm::RS384),
        "RS512" => Ok(Algorithm::RS512),
        other => Err(AuthError::signing(format!(
            "Unsupported signing algorithm: {}",
            other
        ))),
    }
}

/// Issues and verifies signed access tokens using an injected key pair.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    token_ttl: Duration,
}

impl Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl TokenService {
    /// Build a service from key material, an algorithm and the default
    /// token lifetime.
    pub fn new(keys: &KeyPair, algorithm: Algorithm, token_ttl: Duration) -> Result<Self, AuthError> {
        let encoding_key = EncodingKey::from_rsa_pem(keys.private_pem().as_bytes())
            .map_err(|e| AuthError::signing(format!("Unusable private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(keys.public_pem().as_bytes())
            .map_err(|e| AuthError::signing(format!("Unusable public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm,
            token_ttl,
        })
    }

    /// Sign `claims` with an absolute expiry of now + `valid_for`.
    pub fn issue(&self, claims: TokenClaims, valid_for: Duration) -> Result<String, AuthError> {
        let mut claims = claims;
        claims.exp = (Utc::now() + valid_for).timestamp();

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::signing(e.to_string()))
    }

    /// Issue a token for `username` with the configured lifetime.
    pub fn issue_for(&self, username: &str) -> Result<String, AuthError> {
        self.issue(TokenClaims::for_user(username), self.token_ttl)
    }

    /// Check the token's signature, structure and expiry.
    ///
    /// All failure modes map to the same uniform rejection; callers cannot
    /// tell a forged token from an expired one.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Verify `token` and resolve its subject through `users`.
    ///
    /// The only path by which privileged handlers obtain a trusted
    /// identity: no valid signature, fresh expiry and resolvable subject
    /// means no access.
    pub async fn authenticate(
        &self,
        token: &str,
        users: &dyn UserRepository,
    ) -> Result<User, AuthError> {
        let claims = self.verify(token)?;

        users
            .find_by_username(&claims.user)
            .await
            .map_err(|_| AuthError::InvalidToken)?
            .ok_or(AuthError::InvalidToken)
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infrastructure::auth::keys::test_key_pair;
    use crate::infrastructure::user::InMemoryUserRepository;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    fn service() -> TokenService {
        TokenService::new(test_key_pair(), Algorithm::RS256, Duration::minutes(60)).unwrap()
    }

    fn repo_with_alice() -> InMemoryUserRepository {
        InMemoryUserRepository::with_users(vec![User::new("alice", "irrelevant-hash")])
    }

    #[tokio::test]
    async fn test_issue_verify_round_trip() {
        let service = service();
        let repo = repo_with_alice();

        let token = service.issue_for("alice").unwrap();
        assert_eq!(token.split('.').count(), 3);

        let user = service.authenticate(&token, &repo).await.unwrap();
        assert_eq!(user.username(), "alice");
    }

    #[test]
    fn test_verify_rejects_token_from_foreign_key() {
        let issuer = service();
        let foreign = KeyPair::generate().unwrap();
        let verifier =
            TokenService::new(&foreign, Algorithm::RS256, Duration::minutes(60)).unwrap();

        let token = issuer.issue_for("alice").unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_zero_validity_expires_immediately() {
        let service = service();

        let token = service
            .issue(TokenClaims::for_user("alice"), Duration::zero())
            .unwrap();

        // exp == issue instant; one elapsed second is past the window
        std::thread::sleep(std::time::Duration::from_millis(1100));
        assert!(matches!(service.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();

        let token = service
            .issue(TokenClaims::for_user("alice"), Duration::seconds(-60))
            .unwrap();

        assert!(matches!(service.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let service = service();
        let token = service.issue_for("alice").unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut signature = URL_SAFE_NO_PAD.decode(&parts[2]).unwrap();
        signature[0] ^= 0x01;
        parts[2] = URL_SAFE_NO_PAD.encode(signature);

        assert!(matches!(
            service.verify(&parts.join(".")),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let service = service();
        let token = service.issue_for("alice").unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut claims: Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(&parts[1]).unwrap()).unwrap();
        claims["user"] = Value::from("mallory");
        parts[1] = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());

        assert!(matches!(
            service.verify(&parts.join(".")),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let service = service();

        for garbage in ["", "not-a-token", "a.b.c", "eyJh.eyJh"] {
            assert!(
                matches!(service.verify(garbage), Err(AuthError::InvalidToken)),
                "accepted malformed token: {:?}",
                garbage
            );
        }
    }

    #[test]
    fn test_missing_subject_claim_rejected() {
        #[derive(Serialize)]
        struct Anonymous {
            exp: i64,
        }

        let service = service();
        let claims = Anonymous {
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &service.encoding_key,
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_unknown_subject_rejected() {
        let service = service();
        let repo = InMemoryUserRepository::new();

        let token = service.issue_for("ghost").unwrap();

        assert!(matches!(
            service.authenticate(&token, &repo).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let keys = test_key_pair();
        let issuer = TokenService::new(keys, Algorithm::RS256, Duration::minutes(60)).unwrap();
        let verifier = TokenService::new(keys, Algorithm::RS384, Duration::minutes(60)).unwrap();

        let token = issuer.issue_for("alice").unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_extra_claims_survive_round_trip() {
        let service = service();

        let claims = TokenClaims::for_user("alice").with_claim("scope", "posts:write");
        let token = service.issue(claims, Duration::minutes(5)).unwrap();

        let verified = service.verify(&token).unwrap();
        assert_eq!(verified.user, "alice");
        assert_eq!(verified.extra["scope"], "posts:write");
    }

    #[test]
    fn test_signing_algorithm_names() {
        assert!(matches!(signing_algorithm("RS256"), Ok(Algorithm::RS256)));
        assert!(matches!(signing_algorithm("RS384"), Ok(Algorithm::RS384)));
        assert!(matches!(signing_algorithm("RS512"), Ok(Algorithm::RS512)));
        assert!(matches!(
            signing_algorithm("HS256"),
            Err(AuthError::Signing { .. })
        ));
        assert!(matches!(signing_algorithm(""), Err(AuthError::Signing { .. })));
    }

    #[test]
    fn test_tokens_issued_at_different_instants_differ() {
        let service = service();

        let first = service.issue_for("alice").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let second = service.issue_for("alice").unwrap();

        assert_ne!(first, second);
    }
}
