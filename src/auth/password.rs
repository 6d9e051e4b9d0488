use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes a plaintext password with bcrypt at the given work factor.
///
/// bcrypt generates a fresh random salt per call and embeds it, together
/// with the algorithm identifier and cost, in the output string, so two
/// hashes of the same plaintext never match.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// Fails closed: a malformed or truncated hash string yields `false`
/// rather than an error, so adversarial input can never turn a broken
/// stored hash into an accepted login.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost; keeps the unit tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password, TEST_COST).unwrap();

        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn test_same_plaintext_hashes_differently() {
        let password = "repeat_me";
        let first = hash_password(password, TEST_COST).unwrap();
        let second = hash_password(password, TEST_COST).unwrap();

        // Per-hash random salts make the outputs distinct.
        assert_ne!(first, second);
        assert!(verify_password(password, &first));
        assert!(verify_password(password, &second));
    }

    #[test]
    fn test_verify_fails_closed_on_malformed_hash() {
        assert!(!verify_password("test_password123", "invalidhashformat"));
        assert!(!verify_password("test_password123", ""));
        assert!(!verify_password("test_password123", "$2b$12$tooshort"));
    }

    #[test]
    fn test_verify_handles_oversized_plaintext() {
        let hashed = hash_password("normal", TEST_COST).unwrap();
        let oversized = "x".repeat(10_000);
        assert!(!verify_password(&oversized, &hashed));
    }
}
