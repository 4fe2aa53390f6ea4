use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String, bcrypt::BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(plain, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash_password("hunter2hunter2").unwrap();
        assert_ne!(hashed, "hunter2hunter2");
        assert!(verify_password("hunter2hunter2", &hashed).unwrap());
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let h1 = hash_password("samepassword").unwrap();
        let h2 = hash_password("samepassword").unwrap();
        assert_ne!(h1, h2);
    }
}
