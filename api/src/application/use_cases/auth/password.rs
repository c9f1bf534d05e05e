use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// False for a mismatch and for stored values that are not PHC hashes.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => {
            tracing::warn!("stored_password_not_a_phc_hash");
            false
        }
    }
}

pub fn check_password_policy(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("kopi-tubruk").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("kopi-tubruk", &hash));
        assert!(!verify_password("kopi-susu", &hash));
    }

    #[test]
    fn plaintext_legacy_values_never_verify() {
        assert!(!verify_password("secret", "secret"));
    }

    #[test]
    fn short_passwords_are_refused() {
        assert!(check_password_policy("abc").is_err());
        assert!(check_password_policy("abcdef").is_ok());
    }
}
