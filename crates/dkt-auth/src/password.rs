//! Argon2 password hashing.
use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

fn salt() -> SaltString {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).expect("16 bytes is a valid salt length")
}

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    Argon2::default()
        .hash_password(password.as_bytes(), &salt())
        .map(|h| h.to_string())
}

/// Unparseable hashes verify as false.
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Burns one verification against a throwaway hash so a missing account
/// costs the same as a wrong password.
pub fn decoy(password: &str) {
    static DECOY: std::sync::OnceLock<Option<String>> = std::sync::OnceLock::new();
    if let Some(hashword) = DECOY.get_or_init(|| hash("decoy-password").ok()) {
        let _ = verify(password, hashword);
    }
}
