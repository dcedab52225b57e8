use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/images/:nombre", get(obtener_imagen))
}

fn nombre_valido(nombre: &str) -> bool {
    !nombre.is_empty() && !nombre.contains('/') && !nombre.contains("..")
}

fn tipo_contenido(nombre: &str) -> &'static str {
    match nombre.rsplit('.').next().map(|e| e.to_ascii_lowercase()) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "gif" => "image/gif",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Writes the uploaded image under the configured directory and returns the
/// URL it will be served from.
pub async fn guardar_imagen(dir: &str, nombre: &str, datos: &[u8]) -> anyhow::Result<String> {
    if !nombre_valido(nombre) {
        anyhow::bail!("nombre de imagen invalido");
    }
    tokio::fs::create_dir_all(dir).await?;
    let ruta = std::path::Path::new(dir).join(nombre);
    tokio::fs::write(&ruta, datos).await?;
    Ok(format!("/images/{nombre}"))
}

#[instrument(skip(state))]
pub async fn obtener_imagen(
    State(state): State<AppState>,
    Path(nombre): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !nombre_valido(&nombre) {
        return Err(ApiError::NotFound(format!(
            "Imagen con nombre {nombre} no encontrada"
        )));
    }
    let ruta = std::path::Path::new(&state.config.images_dir).join(&nombre);
    let datos = tokio::fs::read(&ruta).await.map_err(|_| {
        ApiError::NotFound(format!("Imagen con nombre {nombre} no encontrada"))
    })?;
    Ok(([(header::CONTENT_TYPE, tipo_contenido(&nombre))], datos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rechaza_rutas_con_traversal() {
        assert!(!nombre_valido("../secreto.png"));
        assert!(!nombre_valido("a/b.png"));
        assert!(!nombre_valido(""));
        assert!(nombre_valido("portada.png"));
    }

    #[test]
    fn tipo_de_contenido_por_extension() {
        assert_eq!(tipo_contenido("foto.JPG"), "image/jpeg");
        assert_eq!(tipo_contenido("foto.png"), "image/png");
        assert_eq!(tipo_contenido("foto.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn guarda_y_devuelve_url() {
        let dir = std::env::temp_dir().join("bibliodoc-test-imagenes");
        let dir = dir.to_str().unwrap();
        let url = guardar_imagen(dir, "portada.png", b"png-bytes")
            .await
            .expect("guardar");
        assert_eq!(url, "/images/portada.png");
        let contenido = tokio::fs::read(std::path::Path::new(dir).join("portada.png"))
            .await
            .expect("leer");
        assert_eq!(contenido, b"png-bytes");
    }

    #[tokio::test]
    async fn no_guarda_nombres_invalidos() {
        let dir = std::env::temp_dir().join("bibliodoc-test-imagenes");
        assert!(guardar_imagen(dir.to_str().unwrap(), "../x.png", b"x")
            .await
            .is_err());
    }
}
