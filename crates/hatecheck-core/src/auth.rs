//! Password hashing and bearer tokens
//!
//! Stored passwords are bcrypt hashes. A token is
//! `base64url(username).hex(hmac_sha256(secret, username))`, so it names its
//! user and can only be produced by a holder of the store's secret. Tokens
//! carry no expiry.

use std::ops::RangeInclusive;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use ulid::Ulid;

use crate::error::{HatecheckError, Result};

/// Token type reported alongside every access token
pub const TOKEN_TYPE: &str = "bearer";

/// bcrypt work factor for new password hashes
pub const DEFAULT_PASSWORD_COST: u32 = bcrypt::DEFAULT_COST;

/// Work factors bcrypt accepts
pub const PASSWORD_COST_RANGE: RangeInclusive<u32> = 4..=31;

type HmacSha256 = Hmac<Sha256>;

/// Issued credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

/// Random secret used to sign tokens
pub fn generate_secret() -> String {
    let seed = format!("{}:{}", Ulid::new(), Ulid::new());
    hex::encode(Sha256::digest(seed.as_bytes()))
}

/// Hash a password with a fresh salt at the given bcrypt cost
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).map_err(|e| HatecheckError::FailedOperation {
        operation: "hash password".to_string(),
        reason: e.to_string(),
    })
}

/// Check a password against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}

fn token_mac(secret: &str, username: &str) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| HatecheckError::Other(format!("invalid token secret: {}", e)))?;
    mac.update(username.as_bytes());
    Ok(mac)
}

/// Issue a bearer token identifying `username`
pub fn issue_token(secret: &str, username: &str) -> Result<AccessToken> {
    let signature = token_mac(secret, username)?.finalize().into_bytes();
    Ok(AccessToken {
        access_token: format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(username.as_bytes()),
            hex::encode(signature)
        ),
        token_type: TOKEN_TYPE.to_string(),
    })
}

/// Username carried by a valid token, `None` for anything malformed or forged
pub fn verify_token(secret: &str, token: &str) -> Option<String> {
    let (encoded, signature) = token.trim().split_once('.')?;
    let username = String::from_utf8(URL_SAFE_NO_PAD.decode(encoded).ok()?).ok()?;
    let signature = hex::decode(signature).ok()?;

    token_mac(secret, &username)
        .ok()?
        .verify_slice(&signature)
        .ok()
        .map(|()| username)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_password_round_trip() {
        let stored = hash_password("s3cret!", TEST_COST).unwrap();
        assert!(stored.starts_with("$2"));
        assert!(verify_password("s3cret!", &stored));
        assert!(!verify_password("wrong", &stored));
    }

    #[test]
    fn test_password_hash_is_salted() {
        assert_ne!(
            hash_password("same", TEST_COST).unwrap(),
            hash_password("same", TEST_COST).unwrap()
        );
    }

    #[test]
    fn test_password_hash_records_cost() {
        let stored = hash_password("pw", 5).unwrap();
        assert!(stored.contains("$05$"), "hash {:?}", stored);
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(matches!(
            hash_password("pw", 99),
            Err(HatecheckError::FailedOperation { .. })
        ));
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "no-separator"));
        assert!(!verify_password("pw", "$2b$04$short"));
        assert!(!verify_password("pw", "salt$digest"));
    }

    #[test]
    fn test_token_identifies_user() {
        let secret = generate_secret();
        let token = issue_token(&secret, "alice").unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(
            verify_token(&secret, &token.access_token),
            Some("alice".to_string())
        );
    }

    #[test]
    fn test_token_signature_is_hmac_sha256() {
        let secret = generate_secret();
        let token = issue_token(&secret, "alice").unwrap().access_token;
        let (_, signature) = token.split_once('.').unwrap();

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(b"alice");
        assert_eq!(signature, hex::encode(mac.finalize().into_bytes()));
    }

    #[test]
    fn test_token_rejected_with_other_secret() {
        let token = issue_token(&generate_secret(), "alice").unwrap();
        assert_eq!(verify_token(&generate_secret(), &token.access_token), None);
    }

    #[test]
    fn test_token_cannot_be_reassigned() {
        let secret = generate_secret();
        let alice = issue_token(&secret, "alice").unwrap().access_token;
        let (_, signature) = alice.split_once('.').unwrap();
        let forged = format!("{}.{}", URL_SAFE_NO_PAD.encode("bob"), signature);
        assert_eq!(verify_token(&secret, &forged), None);
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let secret = generate_secret();
        let token = issue_token(&secret, "alice").unwrap().access_token;
        let truncated = &token[..token.len() - 2];
        assert_eq!(verify_token(&secret, truncated), None);
    }

    #[test]
    fn test_malformed_tokens() {
        let secret = generate_secret();
        for token in ["", ".", "abc", "!!!.sig", "YWxpY2U.", "YWxpY2U.zz"] {
            assert_eq!(verify_token(&secret, token), None, "token {:?}", token);
        }
    }

    #[test]
    fn test_unicode_username_token() {
        let secret = generate_secret();
        let token = issue_token(&secret, "राहुल").unwrap();
        assert_eq!(
            verify_token(&secret, &token.access_token),
            Some("राहुल".to_string())
        );
    }
}
