use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{config::JwtConfig, state::AppState};

/// Default expiry when the caller does not pass an explicit TTL. The login
/// endpoint always passes the configured TTL instead.
pub const TTL_POR_DEFECTO: Duration = Duration::from_secs(15 * 60);

/// JWT payload: the subject claim is the user's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// HS256 signing and verification keys, built once from config.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl_acceso: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_minutos,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_acceso: Duration::from_secs((ttl_minutos as u64) * 60),
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, correo: &str) -> anyhow::Result<String> {
        self.sign_con_ttl(correo, TTL_POR_DEFECTO)
    }

    pub fn sign_con_ttl(&self, correo: &str, ttl: Duration) -> anyhow::Result<String> {
        let exp = OffsetDateTime::now_utc() + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: correo.to_string(),
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(correo, "jwt firmado");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        if data.claims.sub.trim().is_empty() {
            anyhow::bail!("token sin sujeto");
        }
        debug!(correo = %data.claims.sub, "jwt verificado");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn firma_y_verifica_con_sujeto() {
        let keys = make_keys();
        let token = keys.sign("jdoe@example.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "jdoe@example.com");
    }

    #[tokio::test]
    async fn ttl_configurado_viene_de_config() {
        let keys = make_keys();
        assert_eq!(keys.ttl_acceso, Duration::from_secs(60 * 60));
    }

    #[tokio::test]
    async fn token_expirado_no_verifica() {
        let keys = make_keys();
        let token = keys
            .sign_con_ttl("jdoe@example.com", Duration::ZERO)
            .expect("sign");
        // exp == now and leeway is zero, so the token is already invalid
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn token_valido_antes_de_expirar() {
        let keys = make_keys();
        let token = keys
            .sign_con_ttl("jdoe@example.com", Duration::from_secs(300))
            .expect("sign");
        assert!(keys.verify(&token).is_ok());
    }

    #[tokio::test]
    async fn firma_con_otra_clave_no_verifica() {
        let keys = make_keys();
        let otras = JwtKeys {
            encoding: EncodingKey::from_secret(b"otra-clave"),
            decoding: DecodingKey::from_secret(b"otra-clave"),
            ttl_acceso: Duration::from_secs(60),
        };
        let token = otras.sign("jdoe@example.com").expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn token_malformado_no_verifica() {
        let keys = make_keys();
        assert!(keys.verify("no-es-un-jwt").is_err());
    }
}
