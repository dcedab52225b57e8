use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::UsuarioActual,
    documentos::repo::Documento,
    error::ApiError,
    notificaciones::dto::{
        ActualizarRecordatorio, CrearNotificacion, CrearRecordatorio, FiltroNotificaciones,
        FiltroRecordatorios,
    },
    notificaciones::repo::{Notificacion, Recordatorio},
    state::AppState,
};

pub fn notificaciones_routes() -> Router<AppState> {
    Router::new()
        .route("/notificaciones", get(listar_notificaciones))
        .route("/notificaciones", post(crear_notificacion))
        .route("/notificaciones/:id/leer", put(marcar_leida))
        .route("/notificaciones/leer-todas", put(marcar_todas_leidas))
        .route("/recordatorios", get(listar_recordatorios))
        .route("/recordatorios", post(crear_recordatorio))
        .route("/recordatorios/:id", put(actualizar_recordatorio))
        .route("/recordatorios/:id", delete(eliminar_recordatorio))
}

fn fecha_es_futura(fecha: OffsetDateTime) -> bool {
    fecha > OffsetDateTime::now_utc()
}

#[instrument(skip(state, usuario))]
pub async fn listar_notificaciones(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Query(filtro): Query<FiltroNotificaciones>,
) -> Result<Json<Vec<Notificacion>>, ApiError> {
    let notificaciones =
        Notificacion::find_by_usuario(&state.db, usuario.usuario_id, filtro.estado, filtro.tipo)
            .await
            .map_err(ApiError::Internal)?;
    Ok(Json(notificaciones))
}

#[instrument(skip(state, usuario, cuerpo))]
pub async fn crear_notificacion(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Json(cuerpo): Json<CrearNotificacion>,
) -> Result<(StatusCode, Json<Notificacion>), ApiError> {
    if cuerpo.titulo.trim().is_empty() {
        return Err(ApiError::InvalidArgument(
            "El título de la notificación no puede estar vacío".into(),
        ));
    }
    if let Some(documento_id) = cuerpo.documento_id {
        Documento::find_by_id(&state.db, documento_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Documento con ID {documento_id} no encontrado"))
            })?;
    }
    let notificacion = Notificacion::create(
        &state.db,
        usuario.usuario_id,
        cuerpo.documento_id,
        &cuerpo.titulo,
        &cuerpo.mensaje,
        cuerpo.tipo,
    )
    .await
    .map_err(ApiError::Internal)?;
    Ok((StatusCode::CREATED, Json(notificacion)))
}

#[instrument(skip(state, usuario))]
pub async fn marcar_leida(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let marcada = Notificacion::marcar_leida(&state.db, id, usuario.usuario_id)
        .await
        .map_err(ApiError::Internal)?;
    if !marcada {
        return Err(ApiError::NotFound(format!(
            "Notificación con ID {id} no encontrada o no pertenece al usuario"
        )));
    }
    Ok(Json(json!({ "mensaje": "Notificación marcada como leída" })))
}

#[instrument(skip(state, usuario))]
pub async fn marcar_todas_leidas(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cuantas = Notificacion::marcar_todas_leidas(&state.db, usuario.usuario_id)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(json!({
        "mensaje": format!("{cuantas} notificaciones marcadas como leídas")
    })))
}

#[instrument(skip(state, usuario))]
pub async fn listar_recordatorios(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Query(filtro): Query<FiltroRecordatorios>,
) -> Result<Json<Vec<Recordatorio>>, ApiError> {
    let recordatorios = Recordatorio::find_by_usuario(
        &state.db,
        usuario.usuario_id,
        filtro.activo,
        filtro.documento_id,
    )
    .await
    .map_err(ApiError::Internal)?;
    Ok(Json(recordatorios))
}

#[instrument(skip(state, usuario, cuerpo))]
pub async fn crear_recordatorio(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Json(cuerpo): Json<CrearRecordatorio>,
) -> Result<(StatusCode, Json<Recordatorio>), ApiError> {
    Documento::find_by_id(&state.db, cuerpo.documento_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Documento con ID {} no encontrado",
                cuerpo.documento_id
            ))
        })?;
    if !fecha_es_futura(cuerpo.fecha_programada) {
        return Err(ApiError::InvalidArgument(
            "La fecha del recordatorio debe ser futura".into(),
        ));
    }
    let nuevo = Recordatorio {
        recordatorio_id: Uuid::new_v4(),
        usuario_id: usuario.usuario_id,
        documento_id: cuerpo.documento_id,
        titulo: cuerpo.titulo,
        mensaje: cuerpo.mensaje,
        fecha_programada: cuerpo.fecha_programada,
        repetir: cuerpo.repetir,
        intervalo_repeticion: cuerpo.intervalo_repeticion,
        activo: true,
        fecha_creacion: OffsetDateTime::now_utc(),
    };
    let recordatorio = Recordatorio::create(&state.db, &nuevo)
        .await
        .map_err(ApiError::Internal)?;
    Ok((StatusCode::CREATED, Json(recordatorio)))
}

#[instrument(skip(state, usuario, parche))]
pub async fn actualizar_recordatorio(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Path(id): Path<Uuid>,
    Json(parche): Json<ActualizarRecordatorio>,
) -> Result<Json<Recordatorio>, ApiError> {
    let mut recordatorio = Recordatorio::find_by_id(&state.db, id, usuario.usuario_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Recordatorio con ID {id} no encontrado o no pertenece al usuario"
            ))
        })?;

    if parche.aplicar(&mut recordatorio) == 0 {
        return Err(ApiError::InvalidArgument(
            "No se proporcionaron datos para actualizar".into(),
        ));
    }
    // a rescheduled date must still be in the future
    if parche.fecha_programada.is_some() && !fecha_es_futura(recordatorio.fecha_programada) {
        return Err(ApiError::InvalidArgument(
            "La fecha del recordatorio debe ser futura".into(),
        ));
    }
    recordatorio
        .update(&state.db)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(recordatorio))
}

#[instrument(skip(state, usuario))]
pub async fn eliminar_recordatorio(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let eliminado = Recordatorio::delete(&state.db, id, usuario.usuario_id)
        .await
        .map_err(ApiError::Internal)?;
    if !eliminado {
        return Err(ApiError::NotFound(format!(
            "Recordatorio con ID {id} no encontrado o no pertenece al usuario"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn una_fecha_pasada_no_es_futura() {
        let ayer = OffsetDateTime::now_utc() - Duration::days(1);
        assert!(!fecha_es_futura(ayer));
    }

    #[test]
    fn una_fecha_de_manana_es_futura() {
        let manana = OffsetDateTime::now_utc() + Duration::days(1);
        assert!(fecha_es_futura(manana));
    }
}
