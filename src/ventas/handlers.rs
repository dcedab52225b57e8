use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::UsuarioActual,
    error::ApiError,
    state::AppState,
    ventas::dto::CrearRegistro,
    ventas::repo::Registro,
};

pub fn venta_routes() -> Router<AppState> {
    Router::new()
        .route("/ventas", get(listar_ventas))
        .route("/ventas/usuario/:usuario_id", get(obtener_ventas_de_usuario))
        .route("/ventas/documento/:nombre", get(obtener_ventas_de_documento))
        .route("/ventas/tipo/:tipo", get(obtener_ventas_por_tipo))
        .route("/ventas/guardar", post(guardar_registro))
}

#[instrument(skip_all)]
pub async fn listar_ventas(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
) -> Result<Json<Vec<Registro>>, ApiError> {
    let registros = Registro::find_all(&state.db)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(registros))
}

#[instrument(skip(state))]
pub async fn obtener_ventas_de_usuario(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(usuario_id): Path<Uuid>,
) -> Result<Json<Vec<Registro>>, ApiError> {
    let registros = Registro::find_by_cliente(&state.db, usuario_id)
        .await
        .map_err(ApiError::Internal)?;
    if registros.is_empty() {
        return Err(ApiError::NotFound(format!(
            "cliente {usuario_id} no encontrado"
        )));
    }
    Ok(Json(registros))
}

#[instrument(skip(state))]
pub async fn obtener_ventas_de_documento(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(nombre): Path<String>,
) -> Result<Json<Vec<Registro>>, ApiError> {
    let registros = Registro::find_by_titulo(&state.db, &nombre)
        .await
        .map_err(ApiError::Internal)?;
    if registros.is_empty() {
        return Err(ApiError::NotFound(format!("documento {nombre} no encontrado")));
    }
    Ok(Json(registros))
}

#[instrument(skip(state))]
pub async fn obtener_ventas_por_tipo(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(tipo): Path<String>,
) -> Result<Json<Vec<Registro>>, ApiError> {
    let registros = Registro::find_by_tipo(&state.db, &tipo)
        .await
        .map_err(ApiError::Internal)?;
    if registros.is_empty() {
        return Err(ApiError::NotFound(format!(
            "no hay ventas de tipo {tipo}"
        )));
    }
    Ok(Json(registros))
}

#[instrument(skip(state, payload))]
pub async fn guardar_registro(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Json(payload): Json<CrearRegistro>,
) -> Result<(StatusCode, Json<Registro>), ApiError> {
    if payload.cantidad <= 0 {
        return Err(ApiError::InvalidArgument(
            "La cantidad debe ser mayor que cero".into(),
        ));
    }

    let nuevo = Registro {
        registro_id: Uuid::new_v4(),
        id_cliente: payload.id_cliente,
        id_documento: payload.id_documento,
        titulo_documento: payload.titulo_documento,
        tipo_de_adquisicion: payload.tipo_de_adquisicion,
        cantidad: payload.cantidad,
    };

    let creado = Registro::create(&state.db, &nuevo)
        .await
        .map_err(ApiError::Internal)?;
    info!(registro_id = %creado.registro_id, "venta registrada");
    Ok((StatusCode::CREATED, Json(creado)))
}
