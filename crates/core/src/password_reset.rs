//! Password-reset token generation and hashing.
//!
//! The plaintext token goes out by email exactly once; only its SHA-256 hex
//! digest is stored next to the user row.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::types::Timestamp;

/// Random bytes per token (hex-encoded to twice as many characters).
pub const TOKEN_BYTES: usize = 20;

/// Minutes a reset token stays valid.
pub const TOKEN_TTL_MINS: i64 = 60;

/// A freshly generated reset token.
pub struct GeneratedResetToken {
    /// Sent to the user, never stored.
    pub plaintext: String,
    /// Stored in `users.reset_password_token_hash`.
    pub hash: String,
    pub expires_at: Timestamp,
}

pub fn generate_reset_token(now: Timestamp) -> GeneratedResetToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    let plaintext: String = bytes.iter().map(|b| format!("{b:02x}")).collect();

    GeneratedResetToken {
        hash: hash_reset_token(&plaintext),
        plaintext,
        expires_at: now + chrono::Duration::minutes(TOKEN_TTL_MINS),
    }
}

pub fn hash_reset_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Body of the reset email.
pub fn reset_email_body(reset_link: &str) -> String {
    format!(
        "You are receiving this because you have requested the reset of the password for your account.\n\n\
         Please click on the following link, or paste this into your browser to complete the process:\n\n\
         {reset_link}\n\n\
         If you did not request this, please ignore this email and your password will remain unchanged.\n"
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn token_is_forty_hex_chars() {
        let token = generate_reset_token(Utc::now());
        assert_eq!(token.plaintext.len(), TOKEN_BYTES * 2);
        assert!(token.plaintext.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn stored_hash_matches_plaintext() {
        let token = generate_reset_token(Utc::now());
        assert_eq!(hash_reset_token(&token.plaintext), token.hash);
        assert_eq!(token.hash.len(), 64);
    }

    #[test]
    fn expires_one_hour_ahead() {
        let now = Utc::now();
        let token = generate_reset_token(now);
        assert_eq!(token.expires_at - now, chrono::Duration::hours(1));
    }

    #[test]
    fn tokens_differ() {
        let now = Utc::now();
        assert_ne!(
            generate_reset_token(now).plaintext,
            generate_reset_token(now).plaintext
        );
    }

    #[test]
    fn email_body_contains_link() {
        let body = reset_email_body("http://localhost:3000/api/users/reset-password/abc");
        assert!(body.contains("/users/reset-password/abc"));
    }
}
