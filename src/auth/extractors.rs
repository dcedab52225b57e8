use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usuarios::repo::{Rol, Usuario};

/// User resolved from the bearer token. Invalid token and unknown subject
/// produce the same generic detail so neither condition leaks.
pub struct UsuarioActual(pub Usuario);

/// Same as [`UsuarioActual`] but rejects inactive accounts.
pub struct UsuarioActivo(pub Usuario);

/// Active user with the ADMIN role.
pub struct UsuarioAdmin(pub Usuario);

fn credenciales_invalidas() -> ApiError {
    ApiError::Unauthorized("Las credenciales pueden no ser correctas".into())
}

#[async_trait]
impl FromRequestParts<AppState> for UsuarioActual {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(credenciales_invalidas)?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(credenciales_invalidas)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token invalido o expirado");
            credenciales_invalidas()
        })?;

        let usuario = Usuario::find_by_correo(&state.db, &claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(credenciales_invalidas)?;

        Ok(UsuarioActual(usuario))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for UsuarioActivo {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let UsuarioActual(usuario) = UsuarioActual::from_request_parts(parts, state).await?;
        if usuario.inactivo {
            return Err(ApiError::Forbidden("Usuario inactivo".into()));
        }
        Ok(UsuarioActivo(usuario))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for UsuarioAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let UsuarioActivo(usuario) = UsuarioActivo::from_request_parts(parts, state).await?;
        if usuario.rol != Rol::Admin {
            return Err(ApiError::Forbidden("acceso denegado".into()));
        }
        Ok(UsuarioAdmin(usuario))
    }
}
