use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{TokenForm, TokenResponse},
        extractors::UsuarioActivo,
        jwt::JwtKeys,
        password::verificar_contra,
    },
    error::ApiError,
    state::AppState,
    usuarios::repo::Usuario,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(generar_token))
        .route("/usuarios/perfil", get(obtener_perfil))
}

/// Unknown email and wrong password collapse into the same rejection.
fn autenticar(usuario: Option<Usuario>, password: &str) -> Result<Usuario, ApiError> {
    match usuario {
        Some(u) if verificar_contra(password, &u.contra) => Ok(u),
        _ => Err(ApiError::Unauthorized(
            "correo electronico o contraseña incorrecta".into(),
        )),
    }
}

#[instrument(skip(state, datos))]
pub async fn generar_token(
    State(state): State<AppState>,
    Form(datos): Form<TokenForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let usuario = Usuario::find_by_correo(&state.db, &datos.username)
        .await
        .map_err(ApiError::Internal)?;

    let usuario = autenticar(usuario, &datos.password).map_err(|e| {
        warn!(correo = %datos.username, "credenciales de login invalidas");
        e
    })?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys
        .sign_con_ttl(&usuario.correo, keys.ttl_acceso)
        .map_err(ApiError::Internal)?;

    info!(correo = %usuario.correo, "token emitido");
    Ok(Json(TokenResponse {
        access_token,
        tipo_token: "bearer".into(),
    }))
}

#[instrument(skip_all)]
pub async fn obtener_perfil(UsuarioActivo(usuario): UsuarioActivo) -> Json<Usuario> {
    Json(usuario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hashear_contra;
    use crate::usuarios::repo::Rol;
    use uuid::Uuid;

    fn usuario_con_contra(contra: &str) -> Usuario {
        Usuario {
            usuario_id: Uuid::new_v4(),
            nombres: "Jane".into(),
            apellidos: "Doe".into(),
            correo: "jdoe@example.com".into(),
            contra: hashear_contra(contra).expect("hash"),
            pais: "Colombia".into(),
            ciudad: "Betulia".into(),
            inactivo: false,
            rol: Rol::User,
        }
    }

    #[tokio::test]
    async fn registro_y_login_completan_el_ciclo() {
        // stored hash verifies, and the issued token carries the email back
        let usuario = usuario_con_contra("Secur3P@ssw0rd!");
        let autenticado = autenticar(Some(usuario), "Secur3P@ssw0rd!").expect("login");

        let state = crate::state::AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys
            .sign_con_ttl(&autenticado.correo, keys.ttl_acceso)
            .expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "jdoe@example.com");
    }

    #[tokio::test]
    async fn contra_incorrecta_no_autentica() {
        let usuario = usuario_con_contra("Secur3P@ssw0rd!");
        let error = autenticar(Some(usuario), "otra-clave").unwrap_err();
        assert!(matches!(error, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn usuario_inexistente_no_autentica() {
        let error = autenticar(None, "cualquiera").unwrap_err();
        match error {
            ApiError::Unauthorized(mensaje) => {
                assert_eq!(mensaje, "correo electronico o contraseña incorrecta")
            }
            otro => panic!("se esperaba Unauthorized, no {otro:?}"),
        }
    }
}
