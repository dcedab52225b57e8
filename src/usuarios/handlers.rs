use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        extractors::{UsuarioActual, UsuarioAdmin},
        password::hashear_contra,
    },
    error::ApiError,
    state::AppState,
    usuarios::dto::{ActualizarUsuario, CrearUsuario},
    usuarios::repo::{Rol, Usuario},
};

/// Number of initial registrants that are auto-promoted to ADMIN.
const CUPO_ADMINS_INICIALES: i64 = 3;

pub fn usuario_routes() -> Router<AppState> {
    Router::new()
        .route("/usuarios", get(listar_usuarios))
        .route("/usuarios/:usuario_id", get(obtener_usuario_por_id))
        .route("/usuarios/correo/:correo", get(obtener_usuario_por_correo))
        .route("/usuarios/guardar", post(guardar_usuario))
        .route("/usuarios/actualizar/:usuario_id", put(actualizar_usuario))
        .route("/usuarios/eliminar/:usuario_id", delete(eliminar_usuario))
}

fn correo_valido(correo: &str) -> bool {
    lazy_static! {
        static ref CORREO_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    CORREO_RE.is_match(correo)
}

pub fn rol_para_registro(usuarios_existentes: i64) -> Rol {
    if usuarios_existentes < CUPO_ADMINS_INICIALES {
        Rol::Admin
    } else {
        Rol::User
    }
}

fn validar_registro(correo: &str, correo_ocupado: bool) -> Result<(), ApiError> {
    if !correo_valido(correo) {
        return Err(ApiError::InvalidArgument(
            "El correo electrónico no es válido".into(),
        ));
    }
    if correo_ocupado {
        return Err(ApiError::InvalidArgument("Correo ya registrado".into()));
    }
    Ok(())
}

#[instrument(skip_all)]
pub async fn listar_usuarios(
    State(state): State<AppState>,
    UsuarioAdmin(_): UsuarioAdmin,
) -> Result<Json<Vec<Usuario>>, ApiError> {
    let usuarios = Usuario::find_all(&state.db)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(usuarios))
}

#[instrument(skip(state))]
pub async fn obtener_usuario_por_id(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(usuario_id): Path<Uuid>,
) -> Result<Json<Usuario>, ApiError> {
    Usuario::find_by_id(&state.db, usuario_id)
        .await
        .map_err(ApiError::Internal)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("usuario con id: {usuario_id} no encontrado")))
}

#[instrument(skip(state))]
pub async fn obtener_usuario_por_correo(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(correo): Path<String>,
) -> Result<Json<Usuario>, ApiError> {
    Usuario::find_by_correo(&state.db, &correo)
        .await
        .map_err(ApiError::Internal)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Usuario con ese correo no encontrado".into()))
}

#[instrument(skip(state, payload))]
pub async fn guardar_usuario(
    State(state): State<AppState>,
    Json(payload): Json<CrearUsuario>,
) -> Result<(StatusCode, Json<Usuario>), ApiError> {
    let correo_ocupado = Usuario::find_by_correo(&state.db, &payload.correo)
        .await
        .map_err(ApiError::Internal)?
        .is_some();
    if let Err(e) = validar_registro(&payload.correo, correo_ocupado) {
        warn!(correo = %payload.correo, "registro rechazado");
        return Err(e);
    }

    let existentes = Usuario::count(&state.db).await.map_err(ApiError::Internal)?;
    let rol = match rol_para_registro(existentes) {
        Rol::Admin => Rol::Admin,
        Rol::User => payload.rol.unwrap_or(Rol::User),
    };

    let contra = hashear_contra(&payload.contra).map_err(ApiError::Internal)?;
    let nuevo = Usuario {
        usuario_id: Uuid::new_v4(),
        nombres: payload.nombres,
        apellidos: payload.apellidos,
        correo: payload.correo,
        contra,
        pais: payload.pais,
        ciudad: payload.ciudad,
        inactivo: payload.inactivo,
        rol,
    };

    let creado = Usuario::create(&state.db, &nuevo)
        .await
        .map_err(ApiError::Internal)?;
    info!(usuario_id = %creado.usuario_id, correo = %creado.correo, rol = ?creado.rol, "usuario registrado");
    Ok((StatusCode::CREATED, Json(creado)))
}

#[instrument(skip(state, patch))]
pub async fn actualizar_usuario(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(usuario_id): Path<Uuid>,
    Json(mut patch): Json<ActualizarUsuario>,
) -> Result<Json<Usuario>, ApiError> {
    let mut usuario = Usuario::find_by_id(&state.db, usuario_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound(format!("usuario con id: {usuario_id} no encontrado")))?;

    if let Some(contra) = &patch.contra {
        patch.contra = Some(hashear_contra(contra).map_err(ApiError::Internal)?);
    }

    if patch.aplicar(&mut usuario) == 0 {
        return Err(ApiError::InvalidArgument(
            "No se proporcionaron datos para actualizar".into(),
        ));
    }

    let actualizado = Usuario::update(&state.db, &usuario)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(actualizado))
}

#[instrument(skip(state))]
pub async fn eliminar_usuario(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(usuario_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if Usuario::delete(&state.db, usuario_id)
        .await
        .map_err(ApiError::Internal)?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "usuario con id {usuario_id} no encontrado"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primeros_tres_registros_son_admin() {
        assert_eq!(rol_para_registro(0), Rol::Admin);
        assert_eq!(rol_para_registro(1), Rol::Admin);
        assert_eq!(rol_para_registro(2), Rol::Admin);
    }

    #[test]
    fn cuarto_registro_es_user() {
        assert_eq!(rol_para_registro(3), Rol::User);
        assert_eq!(rol_para_registro(100), Rol::User);
    }

    #[test]
    fn valida_formato_de_correo() {
        assert!(correo_valido("ana@ejemplo.com"));
        assert!(!correo_valido("sin-arroba"));
        assert!(!correo_valido("dos @espacios.com"));
    }

    #[test]
    fn correo_duplicado_rechaza_el_registro() {
        let error = validar_registro("ana@ejemplo.com", true).unwrap_err();
        match error {
            ApiError::InvalidArgument(mensaje) => assert_eq!(mensaje, "Correo ya registrado"),
            otro => panic!("se esperaba InvalidArgument, no {otro:?}"),
        }
    }

    #[test]
    fn correo_libre_y_valido_pasa() {
        assert!(validar_registro("ana@ejemplo.com", false).is_ok());
    }
}
