//! Argon2 password hashing and the registration strength policy.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("Password hashing failed: {e}"))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Registration policy: at least 8 chars with one lowercase letter, one
/// uppercase letter, and one digit.
pub fn check_strength(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_lower && has_upper && has_digit) {
        return Err(
            "Password must contain at least one lowercase letter, one uppercase letter, and one digit"
                .to_string(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("Test@123").unwrap();
        assert!(verify_password("Test@123", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Test@123").unwrap();
        let b = hash_password("Test@123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_with_malformed_hash_is_false() {
        assert!(!verify_password("Test@123", "not-a-phc-string"));
    }

    #[test]
    fn test_strength_policy() {
        assert!(check_strength("Test1234").is_ok());
        assert!(check_strength("short1A").is_err());
        assert!(check_strength("alllowercase1").is_err());
        assert!(check_strength("ALLUPPERCASE1").is_err());
        assert!(check_strength("NoDigitsHere").is_err());
    }
}
