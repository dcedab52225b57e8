use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::{UsuarioActual, UsuarioAdmin},
    documentos::dto::ActualizarDocumento,
    documentos::repo::Documento,
    error::ApiError,
    imagenes,
    state::AppState,
};

pub fn documento_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(listar_documentos))
        .route("/documentos/:documento_id", get(obtener_documento_por_id))
        .route("/documentos/titulo/:titulo", get(obtener_documentos_por_titulo))
        .route(
            "/documentos/guardar",
            post(guardar_documento).layer(DefaultBodyLimit::max(20 * 1024 * 1024)),
        )
        .route("/documentos/actualizar/:documento_id", put(actualizar_documento))
        .route("/documentos/eliminar/:documento_id", delete(eliminar_documento))
}

#[instrument(skip_all)]
pub async fn listar_documentos(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
) -> Result<Json<Vec<Documento>>, ApiError> {
    let documentos = Documento::find_all(&state.db)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(documentos))
}

#[instrument(skip(state))]
pub async fn obtener_documento_por_id(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(documento_id): Path<Uuid>,
) -> Result<Json<Documento>, ApiError> {
    Documento::find_by_id(&state.db, documento_id)
        .await
        .map_err(ApiError::Internal)?
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!("documento con id {documento_id} no encontrado"))
        })
}

#[instrument(skip(state))]
pub async fn obtener_documentos_por_titulo(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(titulo): Path<String>,
) -> Result<Json<Vec<Documento>>, ApiError> {
    let documentos = Documento::find_by_titulo(&state.db, &titulo)
        .await
        .map_err(ApiError::Internal)?;
    if documentos.is_empty() {
        return Err(ApiError::NotFound(format!(
            "documento con {titulo} no encontrado"
        )));
    }
    Ok(Json(documentos))
}

#[derive(Default)]
struct FormDocumento {
    tipo_documento: Option<String>,
    autor: Option<String>,
    titulo: Option<String>,
    descripcion: Option<String>,
    categoria: Option<String>,
    stock: Option<i32>,
    precio: Option<i32>,
    editorial: Option<String>,
    idioma: Option<String>,
    paginas: Option<i32>,
    imagen: Option<(String, Bytes)>,
}

fn campo_faltante(nombre: &str) -> ApiError {
    ApiError::InvalidArgument(format!("Falta el campo {nombre}"))
}

fn entero(nombre: &str, valor: &str) -> Result<i32, ApiError> {
    valor
        .trim()
        .parse::<i32>()
        .map_err(|_| ApiError::InvalidArgument(format!("El campo {nombre} debe ser un entero")))
}

/// POST /documentos/guardar: multipart form with the document fields plus an
/// `imagen` file that is stored on disk and referenced by URL.
#[instrument(skip(state, mp))]
pub async fn guardar_documento(
    State(state): State<AppState>,
    UsuarioAdmin(_): UsuarioAdmin,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<Documento>), ApiError> {
    let mut form = FormDocumento::default();
    while let Ok(Some(field)) = mp.next_field().await {
        let nombre = field.name().map(|s| s.to_string()).unwrap_or_default();
        match nombre.as_str() {
            "imagen" => {
                let archivo = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| campo_faltante("imagen"))?;
                let datos = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Internal(e.into()))?;
                form.imagen = Some((archivo, datos));
            }
            otro => {
                let valor = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Internal(e.into()))?;
                match otro {
                    "tipo_documento" => form.tipo_documento = Some(valor),
                    "autor" => form.autor = Some(valor),
                    "titulo" => form.titulo = Some(valor),
                    "descripcion" => form.descripcion = Some(valor),
                    "categoria" => form.categoria = Some(valor),
                    "stock" => form.stock = Some(entero("stock", &valor)?),
                    "precio" => form.precio = Some(entero("precio", &valor)?),
                    "editorial" => form.editorial = Some(valor),
                    "idioma" => form.idioma = Some(valor),
                    "paginas" => form.paginas = Some(entero("paginas", &valor)?),
                    _ => {} // unknown fields are ignored
                }
            }
        }
    }

    let (nombre_imagen, datos_imagen) = form.imagen.ok_or_else(|| campo_faltante("imagen"))?;
    let url_imagen = imagenes::guardar_imagen(&state.config.images_dir, &nombre_imagen, &datos_imagen)
        .await
        .map_err(ApiError::Internal)?;

    let nuevo = Documento {
        documento_id: Uuid::new_v4(),
        tipo_documento: form.tipo_documento.ok_or_else(|| campo_faltante("tipo_documento"))?,
        autor: form.autor.ok_or_else(|| campo_faltante("autor"))?,
        titulo: form.titulo.ok_or_else(|| campo_faltante("titulo"))?,
        descripcion: form.descripcion.ok_or_else(|| campo_faltante("descripcion"))?,
        categoria: form.categoria.ok_or_else(|| campo_faltante("categoria"))?,
        stock: form.stock.ok_or_else(|| campo_faltante("stock"))?,
        precio: form.precio.ok_or_else(|| campo_faltante("precio"))?,
        editorial: form.editorial.ok_or_else(|| campo_faltante("editorial"))?,
        idioma: form.idioma.ok_or_else(|| campo_faltante("idioma"))?,
        paginas: form.paginas.ok_or_else(|| campo_faltante("paginas"))?,
        imagen: url_imagen,
    };

    let creado = Documento::create(&state.db, &nuevo)
        .await
        .map_err(ApiError::Internal)?;
    info!(documento_id = %creado.documento_id, titulo = %creado.titulo, "documento creado");
    Ok((StatusCode::CREATED, Json(creado)))
}

#[instrument(skip(state, patch))]
pub async fn actualizar_documento(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(documento_id): Path<Uuid>,
    Json(patch): Json<ActualizarDocumento>,
) -> Result<Json<Documento>, ApiError> {
    let mut documento = Documento::find_by_id(&state.db, documento_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("documento con id: {documento_id} no encontrado"))
        })?;

    if patch.aplicar(&mut documento) == 0 {
        return Err(ApiError::InvalidArgument(
            "No se proporcionaron datos para actualizar".into(),
        ));
    }

    let actualizado = Documento::update(&state.db, &documento)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(actualizado))
}

#[instrument(skip(state))]
pub async fn eliminar_documento(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Path(documento_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if Documento::delete(&state.db, documento_id)
        .await
        .map_err(ApiError::Internal)?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "documento con id {documento_id} no encontrado"
        )))
    }
}
