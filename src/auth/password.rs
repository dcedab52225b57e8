use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

pub fn hashear_contra(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// A malformed stored hash counts as a mismatch, never an error.
pub fn verificar_contra(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "hash almacenado malformado");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_y_verificacion() {
        let contra = "Secur3P@ssw0rd!";
        let hash = hashear_contra(contra).expect("hashing should succeed");
        assert!(verificar_contra(contra, &hash));
    }

    #[test]
    fn rechaza_contra_incorrecta() {
        let hash = hashear_contra("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!verificar_contra("wrong-password", &hash));
    }

    #[test]
    fn hash_malformado_no_verifica() {
        assert!(!verificar_contra("cualquiera", "no-es-un-hash-valido"));
    }
}
