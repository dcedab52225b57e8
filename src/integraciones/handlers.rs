use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rand::Rng;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::UsuarioActual,
    documentos::repo::Documento,
    error::ApiError,
    integraciones::dto::{
        ConfigurarIntegracion, DatosEstadisticos, DocumentoReciente, DocumentoVisto,
        ExportarCuerpo, FiltroSincronizaciones, RespuestaConfiguracion, RespuestaSincronizacion,
        SincronizarCuerpo, UsuarioDestacado,
    },
    integraciones::repo::{
        conteo_por_columna, ConfiguracionNube, EstadoSincronizacion, Exportacion, ProveedorNube,
        Sincronizacion,
    },
    state::AppState,
    usuarios::repo::Usuario,
};

const FORMATOS_EXPORTACION: &[&str] = &["pdf", "docx", "txt", "csv", "xml", "json"];

pub fn integracion_routes() -> Router<AppState> {
    Router::new()
        .route("/integracion/nube/configurar", post(configurar_nube))
        .route("/integracion/nube/configuraciones", get(listar_configuraciones))
        .route("/integracion/nube/sincronizar", post(sincronizar_documento))
        .route("/integracion/nube/sincronizaciones", get(listar_sincronizaciones))
        .route("/integracion/exportar", post(exportar_documento))
        .route("/integracion/dashboard/estadisticas", get(obtener_estadisticas))
}

// --- cloud configuration ---

/// The stored access token never leaves the server whole.
fn abreviar_token(token: &str) -> String {
    if token.is_empty() {
        return "No configurado".into();
    }
    let prefijo: String = token.chars().take(10).collect();
    format!("{prefijo}...")
}

#[instrument(skip(state, usuario, cuerpo))]
pub async fn configurar_nube(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Json(cuerpo): Json<ConfigurarIntegracion>,
) -> Result<Json<RespuestaConfiguracion>, ApiError> {
    let config = ConfiguracionNube {
        integracion_id: Uuid::new_v4(),
        usuario_id: usuario.usuario_id,
        proveedor: cuerpo.proveedor,
        token_acceso: cuerpo.token_acceso,
        carpeta_id: cuerpo.carpeta_id,
        sincronizacion_automatica: cuerpo.sincronizacion_automatica,
        intervalo_sincronizacion: cuerpo.intervalo_sincronizacion,
        fecha_actualizacion: OffsetDateTime::now_utc(),
    };
    let sobrescrita = ConfiguracionNube::guardar(&state.db, &config)
        .await
        .map_err(ApiError::Internal)?;

    let accion = if sobrescrita { "actualizada" } else { "guardada" };
    let mensaje = format!(
        "Configuración para {} {accion} exitosamente",
        cuerpo.proveedor.nombre()
    );
    info!(proveedor = cuerpo.proveedor.nombre(), "integracion configurada");
    Ok(Json(RespuestaConfiguracion {
        mensaje,
        proveedor: cuerpo.proveedor,
    }))
}

#[instrument(skip_all)]
pub async fn listar_configuraciones(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
) -> Result<Json<Vec<ConfiguracionNube>>, ApiError> {
    let mut configuraciones = ConfiguracionNube::find_by_usuario(&state.db, usuario.usuario_id)
        .await
        .map_err(ApiError::Internal)?;
    for config in &mut configuraciones {
        config.token_acceso = abreviar_token(&config.token_acceso);
    }
    Ok(Json(configuraciones))
}

// --- sync ---

fn url_base(proveedor: ProveedorNube) -> &'static str {
    match proveedor {
        ProveedorNube::GoogleDrive => "https://drive.google.com/file/d/",
        ProveedorNube::Dropbox => "https://www.dropbox.com/s/",
        ProveedorNube::Onedrive => "https://1drv.ms/",
        ProveedorNube::Otro => "https://cloud.example.com/",
    }
}

fn id_en_nube_simulado(proveedor: ProveedorNube) -> String {
    let sufijo: u32 = rand::thread_rng().gen_range(1000..=9999);
    format!(
        "{}_{}_{sufijo}",
        proveedor.nombre(),
        OffsetDateTime::now_utc().unix_timestamp()
    )
}

fn pausa_simulada(min_ms: u64, max_ms: u64) -> Duration {
    Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
}

#[instrument(skip(state, usuario, cuerpo))]
pub async fn sincronizar_documento(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Json(cuerpo): Json<SincronizarCuerpo>,
) -> Result<Json<RespuestaSincronizacion>, ApiError> {
    let documento = Documento::find_by_id(&state.db, cuerpo.documento_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Documento con ID {} no encontrado",
                cuerpo.documento_id
            ))
        })?;

    let config = ConfiguracionNube::find_by_proveedor(&state.db, usuario.usuario_id, cuerpo.proveedor)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No se ha configurado la integración con {}. Configure primero la integración.",
                cuerpo.proveedor.nombre()
            ))
        })?;

    // the provider round-trip is simulated
    tokio::time::sleep(pausa_simulada(1000, 2500)).await;

    let id_en_nube = id_en_nube_simulado(cuerpo.proveedor);
    let url_en_nube = format!("{}{id_en_nube}/view", url_base(cuerpo.proveedor));
    let ahora = OffsetDateTime::now_utc();
    let proxima = config
        .sincronizacion_automatica
        .then(|| ahora + TimeDuration::hours(24));

    let sinc = Sincronizacion {
        sincronizacion_id: Uuid::new_v4(),
        usuario_id: usuario.usuario_id,
        proveedor: cuerpo.proveedor,
        documento_id: cuerpo.documento_id,
        documento_nombre: documento.titulo,
        id_en_nube: id_en_nube.clone(),
        url_en_nube: url_en_nube.clone(),
        estado: EstadoSincronizacion::Completado,
        ultima_sincronizacion: ahora,
        proxima_sincronizacion: proxima,
    };
    Sincronizacion::upsert(&state.db, &sinc)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(RespuestaSincronizacion {
        mensaje: format!("Documento sincronizado con {}", cuerpo.proveedor.nombre()),
        id_en_nube,
        url_en_nube,
        estado: EstadoSincronizacion::Completado,
    }))
}

#[instrument(skip(state, usuario))]
pub async fn listar_sincronizaciones(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Query(filtro): Query<FiltroSincronizaciones>,
) -> Result<Json<Vec<Sincronizacion>>, ApiError> {
    let sincronizaciones =
        Sincronizacion::find_by_usuario(&state.db, usuario.usuario_id, filtro.proveedor)
            .await
            .map_err(ApiError::Internal)?;
    Ok(Json(sincronizaciones))
}

// --- export ---

fn formato_valido(formato: &str) -> bool {
    FORMATOS_EXPORTACION.contains(&formato)
}

fn tipo_contenido_exportacion(formato: &str) -> &'static str {
    match formato {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "csv" => "text/csv",
        "xml" => "application/xml",
        "json" => "application/json",
        _ => "text/plain",
    }
}

fn nombre_archivo_exportacion(titulo: &str, formato: &str) -> String {
    format!("{}.{formato}", titulo.replace(' ', "_"))
}

fn contenido_exportado(documento: &Documento, formato: &str) -> anyhow::Result<String> {
    if formato == "json" {
        return Ok(serde_json::to_string_pretty(documento)?);
    }
    Ok(format!(
        "DOCUMENTO EXPORTADO\n\n\
         Título: {}\nAutor: {}\nDescripción: {}\n\n\
         Este es un documento simulado en formato {}.",
        documento.titulo,
        documento.autor,
        documento.descripcion,
        formato.to_uppercase(),
    ))
}

#[instrument(skip(state, usuario, cuerpo))]
pub async fn exportar_documento(
    State(state): State<AppState>,
    UsuarioActual(usuario): UsuarioActual,
    Json(cuerpo): Json<ExportarCuerpo>,
) -> Result<impl IntoResponse, ApiError> {
    let documento = Documento::find_by_id(&state.db, cuerpo.documento_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Documento con ID {} no encontrado",
                cuerpo.documento_id
            ))
        })?;

    let formato = cuerpo.formato.to_lowercase();
    if !formato_valido(&formato) {
        return Err(ApiError::InvalidArgument(format!(
            "Formato no soportado. Formatos válidos: {}",
            FORMATOS_EXPORTACION.join(", ")
        )));
    }

    // generation is simulated
    tokio::time::sleep(pausa_simulada(500, 2000)).await;
    let contenido = contenido_exportado(&documento, &formato).map_err(ApiError::Internal)?;

    Exportacion::insert(&state.db, usuario.usuario_id, cuerpo.documento_id, &formato)
        .await
        .map_err(ApiError::Internal)?;

    let disposicion = format!(
        "attachment; filename={}",
        nombre_archivo_exportacion(&documento.titulo, &formato)
    );
    Ok((
        [
            (header::CONTENT_TYPE, tipo_contenido_exportacion(&formato).to_string()),
            (header::CONTENT_DISPOSITION, disposicion),
        ],
        contenido,
    ))
}

// --- dashboard ---

fn estadisticas_simuladas(
    total_documentos: i64,
    por_categoria: Vec<(String, i64)>,
    por_idioma: Vec<(String, i64)>,
    documentos: &[Documento],
    usuarios: &[Usuario],
) -> DatosEstadisticos {
    let mut rng = rand::thread_rng();

    // view and activity counters are simulated until real usage tracking lands
    let documentos_mas_vistos = documentos
        .iter()
        .take(5)
        .map(|d| DocumentoVisto {
            documento_id: d.documento_id,
            titulo: d.titulo.clone(),
            autor: d.autor.clone(),
            vistas: rng.gen_range(50..=500),
        })
        .collect();

    let usuarios_mas_activos = usuarios
        .iter()
        .take(5)
        .map(|u| UsuarioDestacado {
            usuario_id: u.usuario_id,
            nombre: format!("{} {}", u.nombres, u.apellidos),
            documentos_creados: rng.gen_range(5..=30),
            acciones: rng.gen_range(20..=100),
        })
        .collect();

    let ahora = OffsetDateTime::now_utc();
    let mut documentos_recientes: Vec<DocumentoReciente> = documentos
        .iter()
        .take(8)
        .map(|d| DocumentoReciente {
            documento_id: d.documento_id,
            titulo: d.titulo.clone(),
            autor: d.autor.clone(),
            fecha_creacion: ahora - TimeDuration::days(rng.gen_range(0..=14)),
        })
        .collect();
    documentos_recientes.sort_by(|a, b| b.fecha_creacion.cmp(&a.fecha_creacion));

    DatosEstadisticos {
        total_documentos,
        documentos_por_categoria: por_categoria.into_iter().collect::<BTreeMap<_, _>>(),
        documentos_por_idioma: por_idioma.into_iter().collect::<BTreeMap<_, _>>(),
        documentos_mas_vistos,
        usuarios_mas_activos,
        documentos_recientes,
    }
}

#[instrument(skip_all)]
pub async fn obtener_estadisticas(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
) -> Result<Json<DatosEstadisticos>, ApiError> {
    let documentos = Documento::find_all(&state.db)
        .await
        .map_err(ApiError::Internal)?;
    let usuarios = Usuario::find_all(&state.db)
        .await
        .map_err(ApiError::Internal)?;
    let por_categoria = conteo_por_columna(&state.db, "categoria")
        .await
        .map_err(ApiError::Internal)?;
    let por_idioma = conteo_por_columna(&state.db, "idioma")
        .await
        .map_err(ApiError::Internal)?;

    let estadisticas = estadisticas_simuladas(
        documentos.len() as i64,
        por_categoria,
        por_idioma,
        &documentos,
        &usuarios,
    );
    Ok(Json(estadisticas))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documento(titulo: &str) -> Documento {
        Documento {
            documento_id: Uuid::new_v4(),
            tipo_documento: "digital".into(),
            autor: "Robert C. Martin".into(),
            titulo: titulo.into(),
            descripcion: "un libro para aprender codigo".into(),
            categoria: "desarrollo".into(),
            stock: 1,
            precio: 10,
            editorial: "betulia-editoriales".into(),
            idioma: "es".into(),
            paginas: 100,
            imagen: String::new(),
        }
    }

    #[test]
    fn el_token_se_abrevia() {
        assert_eq!(abreviar_token("ya29.a0AfH6SMBgkVV"), "ya29.a0AfH...");
        assert_eq!(abreviar_token(""), "No configurado");
        // short tokens still get the suffix, never the raw value alone
        assert_eq!(abreviar_token("abc"), "abc...");
    }

    #[test]
    fn url_por_proveedor() {
        assert_eq!(url_base(ProveedorNube::GoogleDrive), "https://drive.google.com/file/d/");
        assert_eq!(url_base(ProveedorNube::Otro), "https://cloud.example.com/");
    }

    #[test]
    fn el_id_simulado_lleva_el_proveedor() {
        let id = id_en_nube_simulado(ProveedorNube::Dropbox);
        assert!(id.starts_with("dropbox_"));
    }

    #[test]
    fn formatos_de_exportacion() {
        assert!(formato_valido("pdf"));
        assert!(formato_valido("json"));
        assert!(!formato_valido("exe"));
    }

    #[test]
    fn tipo_de_contenido_por_formato() {
        assert_eq!(tipo_contenido_exportacion("pdf"), "application/pdf");
        assert_eq!(tipo_contenido_exportacion("txt"), "text/plain");
        assert_eq!(tipo_contenido_exportacion("json"), "application/json");
    }

    #[test]
    fn nombre_de_archivo_sin_espacios() {
        assert_eq!(
            nombre_archivo_exportacion("clean code para todos", "pdf"),
            "clean_code_para_todos.pdf"
        );
    }

    #[test]
    fn exportacion_json_es_el_documento() {
        let doc = documento("clean code");
        let contenido = contenido_exportado(&doc, "json").expect("json");
        let valor: serde_json::Value = serde_json::from_str(&contenido).expect("parse");
        assert_eq!(valor["titulo"], "clean code");
    }

    #[test]
    fn exportacion_de_texto_lleva_el_formato() {
        let doc = documento("clean code");
        let contenido = contenido_exportado(&doc, "txt").expect("txt");
        assert!(contenido.contains("Título: clean code"));
        assert!(contenido.contains("formato TXT"));
    }

    #[test]
    fn estadisticas_cubren_las_fuentes() {
        let documentos: Vec<Documento> = (0..10).map(|i| documento(&format!("doc {i}"))).collect();
        let estadisticas = estadisticas_simuladas(
            documentos.len() as i64,
            vec![("desarrollo".into(), 7), ("ciencia".into(), 3)],
            vec![("es".into(), 10)],
            &documentos,
            &[],
        );
        assert_eq!(estadisticas.total_documentos, 10);
        assert_eq!(estadisticas.documentos_por_categoria["desarrollo"], 7);
        assert_eq!(estadisticas.documentos_mas_vistos.len(), 5);
        assert_eq!(estadisticas.documentos_recientes.len(), 8);
        // recent documents come back newest first
        for par in estadisticas.documentos_recientes.windows(2) {
            assert!(par[0].fecha_creacion >= par[1].fecha_creacion);
        }
        for visto in &estadisticas.documentos_mas_vistos {
            assert!((50..=500).contains(&visto.vistas));
        }
    }
}
