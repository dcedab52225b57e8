use std::time::Instant;

use axum::{
    extract::{Multipart, Query, State},
    routing::post,
    Json, Router,
};
use futures::stream::{self, StreamExt};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::UsuarioActual,
    documentos::repo::Documento,
    error::ApiError,
    ia::dto::{
        ConsultaBusquedaSemantica, DocumentoEtiquetas, DocumentoIdQuery, EtiquetaIA,
        RespuestaAsistente, RespuestaBusquedaSemantica, RespuestaClasificacion,
        RespuestaTraduccion, ResultadoBusqueda, ResultadoOCR, SolicitudAsistente,
        SolicitudTraduccion, UmbralQuery,
    },
    ia::ranker::{
        aplicar_umbral_manual, corte_adaptativo, fragmento, ordenar_por_relevancia, redondear2,
        redondear3, Candidato,
    },
    ia::repo::{Clasificacion, EtiquetasIa},
    state::AppState,
};

/// Cap on similarity calls in flight per search request.
const MAX_SIMILITUDES_EN_VUELO: usize = 5;

const CATEGORIAS: &[&str] = &[
    "tecnología",
    "ciencia",
    "literatura",
    "negocios",
    "arte",
    "medicina",
    "derecho",
    "ingeniería",
    "educación",
];

const EXTENSIONES_OCR: &[&str] = &[".pdf", ".jpg", ".jpeg", ".png", ".tiff"];

const IDIOMAS_VALIDOS: &[&str] = &["es", "en", "fr", "de", "it", "pt", "ru", "zh", "ja"];

pub fn ia_routes() -> Router<AppState> {
    Router::new()
        .route("/ia/busqueda-semantica", post(busqueda_semantica))
        .route("/ia/clasificar", post(clasificar_documento))
        .route("/ia/ocr", post(extraer_texto_documento))
        .route("/ia/etiquetar", post(etiquetar_documento))
        .route("/ia/traducir", post(traducir_documento))
        .route("/ia/asistente", post(consultar_asistente))
}

// --- semantic search ---

fn validar_busqueda(
    query: &str,
    umbral_manual: Option<f64>,
    num_resultados: usize,
) -> Result<(), ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::InvalidArgument(
            "La consulta de búsqueda no puede estar vacía".into(),
        ));
    }
    if let Some(umbral) = umbral_manual {
        if !(0.0..=1.0).contains(&umbral) {
            return Err(ApiError::InvalidArgument(
                "El umbral de relevancia debe estar entre 0 y 1".into(),
            ));
        }
    }
    if num_resultados == 0 {
        return Err(ApiError::InvalidArgument(
            "El número de resultados debe ser mayor que cero".into(),
        ));
    }
    Ok(())
}

/// Shared by the search endpoint and the assistant: fetches the corpus and
/// delegates to [`buscar_entre`].
pub(crate) async fn ejecutar_busqueda(
    state: &AppState,
    query: &str,
    num_resultados: usize,
    umbral_manual: Option<f64>,
) -> Result<RespuestaBusquedaSemantica, ApiError> {
    validar_busqueda(query, umbral_manual, num_resultados)?;
    let documentos = Documento::find_all(&state.db)
        .await
        .map_err(ApiError::Internal)?;
    Ok(buscar_entre(&state.ai, documentos, query, num_resultados, umbral_manual).await)
}

/// Scores every document against the query (bounded fan-out), sorts, applies
/// the adaptive or manual cutoff, and maps the survivors to the response
/// shape. An empty corpus short-circuits without touching the provider.
async fn buscar_entre(
    ai: &std::sync::Arc<dyn crate::gemini::AiProvider>,
    documentos: Vec<Documento>,
    query: &str,
    num_resultados: usize,
    umbral_manual: Option<f64>,
) -> RespuestaBusquedaSemantica {
    let inicio = Instant::now();

    // documents without any text cannot be compared
    let con_texto: Vec<Documento> = documentos
        .into_iter()
        .filter(|d| !d.titulo.trim().is_empty() || !d.descripcion.trim().is_empty())
        .collect();

    if con_texto.is_empty() {
        return RespuestaBusquedaSemantica {
            resultados: Vec::new(),
            tiempo_ejecucion: redondear3(inicio.elapsed().as_secs_f64()),
            total_encontrados: 0,
            mensaje: Some("No se encontraron documentos para evaluar".into()),
        };
    }

    let ai = ai.clone();
    let mut puntuados: Vec<(usize, Candidato)> = stream::iter(con_texto.into_iter().enumerate())
        .map(|(indice, doc)| {
            let ai = ai.clone();
            let query = query.to_string();
            async move {
                let texto = format!("{} {}", doc.titulo.trim(), doc.descripcion.trim());
                let relevancia = ai.similitud_semantica(&query, &texto).await;
                let candidato = Candidato {
                    documento_id: doc.documento_id,
                    titulo: doc.titulo.trim().to_string(),
                    descripcion: doc.descripcion.trim().to_string(),
                    relevancia,
                };
                (indice, candidato)
            }
        })
        .buffer_unordered(MAX_SIMILITUDES_EN_VUELO)
        .collect()
        .await;

    // fan-in: restore enumeration order so the sort below breaks ties by it
    puntuados.sort_by_key(|(indice, _)| *indice);
    let mut candidatos: Vec<Candidato> = puntuados.into_iter().map(|(_, c)| c).collect();
    ordenar_por_relevancia(&mut candidatos);

    let relevancias: Vec<f64> = candidatos.iter().map(|c| c.relevancia).collect();
    let corte = match umbral_manual {
        Some(umbral) => aplicar_umbral_manual(&relevancias, umbral),
        None => corte_adaptativo(&relevancias),
    };
    candidatos.truncate(corte);
    candidatos.truncate(num_resultados);

    let resultados: Vec<ResultadoBusqueda> = candidatos
        .into_iter()
        .map(|c| ResultadoBusqueda {
            documento_id: c.documento_id,
            titulo: c.titulo,
            relevancia: redondear2(c.relevancia),
            fragmento: fragmento(&c.descripcion),
        })
        .collect();

    let mensaje = if resultados.is_empty() {
        Some(
            "No se encontraron documentos que coincidan con su consulta. \
             Intente con términos más generales."
                .into(),
        )
    } else {
        None
    };

    RespuestaBusquedaSemantica {
        total_encontrados: resultados.len(),
        resultados,
        tiempo_ejecucion: redondear3(inicio.elapsed().as_secs_f64()),
        mensaje,
    }
}

#[instrument(skip(state, consulta))]
pub async fn busqueda_semantica(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Query(umbral): Query<UmbralQuery>,
    Json(consulta): Json<ConsultaBusquedaSemantica>,
) -> Result<Json<RespuestaBusquedaSemantica>, ApiError> {
    let respuesta = ejecutar_busqueda(
        &state,
        &consulta.query,
        consulta.num_resultados,
        umbral.umbral_manual,
    )
    .await?;
    info!(
        total = respuesta.total_encontrados,
        tiempo = respuesta.tiempo_ejecucion,
        "busqueda semantica"
    );
    Ok(Json(respuesta))
}

// --- classification ---

fn clasificacion_simulada() -> (String, f64) {
    let mut rng = rand::thread_rng();
    let clasificacion = CATEGORIAS.choose(&mut rng).unwrap_or(&"tecnología");
    let confianza = redondear2(rng.gen_range(0.65..0.98));
    (clasificacion.to_string(), confianza)
}

#[instrument(skip(state))]
pub async fn clasificar_documento(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Query(q): Query<DocumentoIdQuery>,
) -> Result<Json<RespuestaClasificacion>, ApiError> {
    let documento_id = q.documento_id;
    Documento::find_by_id(&state.db, documento_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Documento con ID {documento_id} no encontrado"))
        })?;

    let (clasificacion, confianza) = clasificacion_simulada();

    Clasificacion::insert(&state.db, documento_id, &clasificacion, confianza, "auto-IA")
        .await
        .map_err(ApiError::Internal)?;

    // high confidence propagates to the document's category
    if confianza > 0.85 {
        Documento::set_categoria(&state.db, documento_id, &clasificacion)
            .await
            .map_err(ApiError::Internal)?;
    }

    Ok(Json(RespuestaClasificacion {
        documento_id,
        clasificacion,
        confianza,
    }))
}

// --- OCR ---

fn extension_permitida(nombre: &str) -> bool {
    let nombre = nombre.to_lowercase();
    EXTENSIONES_OCR.iter().any(|ext| nombre.ends_with(ext))
}

fn ocr_simulado(nombre: &str) -> (String, serde_json::Value, f64) {
    let texto = if nombre.to_lowercase().ends_with(".pdf") {
        format!(
            "Contenido extraído del PDF: {nombre}. Este documento parece contener información sobre..."
        )
    } else {
        format!(
            "Texto detectado en la imagen: {nombre}. Se identifican varios párrafos y tablas..."
        )
    };
    let mut rng = rand::thread_rng();
    let metadatos = serde_json::json!({
        "num_paginas": rng.gen_range(1..=30),
        "idioma_detectado": (["es", "en", "fr"].choose(&mut rng).copied().unwrap_or("es")),
        "tiene_tablas": rng.gen_bool(0.5),
        "tiene_imagenes": rng.gen_bool(0.5),
    });
    let confianza = redondear2(rng.gen_range(0.70..0.95));
    (texto, metadatos, confianza)
}

#[instrument(skip_all)]
pub async fn extraer_texto_documento(
    UsuarioActual(_): UsuarioActual,
    mut mp: Multipart,
) -> Result<Json<ResultadoOCR>, ApiError> {
    let mut nombre_archivo: Option<String> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() == Some("archivo") {
            nombre_archivo = field.file_name().map(|s| s.to_string());
            // the content itself is not processed; extraction is simulated
            let _ = field.bytes().await;
            break;
        }
    }

    let nombre = nombre_archivo.ok_or_else(|| {
        ApiError::InvalidArgument("No se proporcionó un nombre de archivo".into())
    })?;

    if !extension_permitida(&nombre) {
        return Err(ApiError::InvalidArgument(format!(
            "Tipo de archivo no soportado. Extensiones permitidas: {}",
            EXTENSIONES_OCR.join(", ")
        )));
    }

    let (texto_extraido, metadatos_extraidos, confianza) = ocr_simulado(&nombre);
    let documento_id = format!("ocr_{}", time::OffsetDateTime::now_utc().unix_timestamp());

    Ok(Json(ResultadoOCR {
        documento_id,
        texto_extraido,
        metadatos_extraidos,
        confianza,
    }))
}

// --- tagging ---

fn etiquetas_candidatas(
    titulo: &str,
    descripcion: &str,
    categoria: &str,
    autor: &str,
) -> Vec<String> {
    let mut etiquetas: Vec<String> = Vec::new();
    if !categoria.is_empty() {
        etiquetas.push(categoria.to_string());
    }
    if !autor.is_empty() {
        etiquetas.push(autor.to_string());
    }
    for palabra in titulo.split_whitespace() {
        if palabra.chars().count() > 4 {
            etiquetas.push(palabra.to_lowercase());
        }
    }
    for palabra in descripcion.split_whitespace() {
        let minuscula = palabra.to_lowercase();
        if palabra.chars().count() > 5
            && !etiquetas.iter().any(|e| e.to_lowercase() == minuscula)
        {
            etiquetas.push(minuscula);
        }
    }
    etiquetas
}

fn seleccionar_etiquetas(candidatas: Vec<String>) -> Vec<EtiquetaIA> {
    let mut rng = rand::thread_rng();
    let cuantas = usize::min(rng.gen_range(3..=7), candidatas.len());
    let mut elegidas = candidatas;
    elegidas.shuffle(&mut rng);
    elegidas.truncate(cuantas);

    let mut etiquetas: Vec<EtiquetaIA> = elegidas
        .into_iter()
        .map(|nombre| EtiquetaIA {
            nombre,
            confianza: redondear2(rng.gen_range(0.70..0.98)),
        })
        .collect();
    etiquetas.sort_by(|a, b| {
        b.confianza
            .partial_cmp(&a.confianza)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    etiquetas
}

#[instrument(skip(state))]
pub async fn etiquetar_documento(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Query(q): Query<DocumentoIdQuery>,
) -> Result<Json<DocumentoEtiquetas>, ApiError> {
    let documento_id = q.documento_id;
    let documento = Documento::find_by_id(&state.db, documento_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Documento con ID {documento_id} no encontrado"))
        })?;

    let candidatas = etiquetas_candidatas(
        &documento.titulo,
        &documento.descripcion,
        &documento.categoria,
        &documento.autor,
    );
    let etiquetas = seleccionar_etiquetas(candidatas);

    let etiquetas_json = serde_json::to_value(&etiquetas).map_err(|e| ApiError::Internal(e.into()))?;
    EtiquetasIa::upsert(&state.db, documento_id, &etiquetas_json)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(DocumentoEtiquetas {
        documento_id,
        etiquetas,
    }))
}

// --- translation ---

#[instrument(skip(state, solicitud))]
pub async fn traducir_documento(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Json(solicitud): Json<SolicitudTraduccion>,
) -> Result<Json<RespuestaTraduccion>, ApiError> {
    let documento = Documento::find_by_id(&state.db, solicitud.documento_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "Documento con ID {} no encontrado",
                solicitud.documento_id
            ))
        })?;

    if !IDIOMAS_VALIDOS.contains(&solicitud.idioma_destino.as_str()) {
        return Err(ApiError::InvalidArgument(format!(
            "Idioma no soportado. Idiomas válidos: {}",
            IDIOMAS_VALIDOS.join(", ")
        )));
    }

    let destino = &solicitud.idioma_destino;
    let origen = documento.idioma.clone();
    Ok(Json(RespuestaTraduccion {
        documento_id: documento.documento_id,
        titulo_traducido: format!("[Traducido a {destino}] {}", documento.titulo),
        descripcion_traducida: format!(
            "[Traducido a {destino} desde {origen}] {}",
            documento.descripcion
        ),
        idioma_origen: origen,
        idioma_destino: solicitud.idioma_destino,
        titulo_original: documento.titulo,
        descripcion_original: documento.descripcion,
        nota: "Esta es una traducción automática y puede contener errores.".into(),
    }))
}

// --- assistant ---

fn bloque_contexto(documento: &Documento, relevancia: f64) -> String {
    format!(
        "ID: {}\nTítulo: {}\nAutor: {}\nCategoría: {}\nDescripción: {}\n\
         Editorial: {}\nIdioma: {}\nPáginas: {}\nRelevancia: {}\n",
        documento.documento_id,
        documento.titulo,
        documento.autor,
        documento.categoria,
        documento.descripcion,
        documento.editorial,
        documento.idioma,
        documento.paginas,
        relevancia,
    )
}

#[instrument(skip(state, solicitud))]
pub async fn consultar_asistente(
    State(state): State<AppState>,
    UsuarioActual(_): UsuarioActual,
    Json(solicitud): Json<SolicitudAsistente>,
) -> Result<Json<RespuestaAsistente>, ApiError> {
    let inicio = Instant::now();
    if solicitud.consulta.trim().is_empty() {
        return Err(ApiError::InvalidArgument(
            "La consulta no puede estar vacía".into(),
        ));
    }

    let busqueda = ejecutar_busqueda(
        &state,
        &solicitud.consulta,
        solicitud.max_documentos_contexto,
        solicitud.umbral_relevancia,
    )
    .await?;

    let mut bloques: Vec<String> = Vec::new();
    let mut documentos_consultados: Vec<Uuid> = Vec::new();
    for resultado in &busqueda.resultados {
        match Documento::find_by_id(&state.db, resultado.documento_id).await {
            Ok(Some(documento)) => {
                bloques.push(bloque_contexto(&documento, resultado.relevancia));
                documentos_consultados.push(documento.documento_id);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "error obteniendo detalles del documento"),
        }
    }

    let contexto = if bloques.is_empty() {
        "No se encontraron documentos relevantes para esta consulta.".to_string()
    } else {
        format!("=== DOCUMENTOS RELEVANTES ===\n\n{}", bloques.join("\n\n---\n\n"))
    };

    let respuesta = state.ai.generar_respuesta(&solicitud.consulta, &contexto).await;

    Ok(Json(RespuestaAsistente {
        respuesta,
        documentos_consultados,
        tiempo_ejecucion: redondear3(inicio.elapsed().as_secs_f64()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valida_consulta_vacia() {
        assert!(validar_busqueda("   ", None, 5).is_err());
        assert!(validar_busqueda("python", None, 5).is_ok());
    }

    #[test]
    fn valida_umbral_fuera_de_rango() {
        assert!(validar_busqueda("python", Some(1.5), 5).is_err());
        assert!(validar_busqueda("python", Some(-0.1), 5).is_err());
        assert!(validar_busqueda("python", Some(0.0), 5).is_ok());
        assert!(validar_busqueda("python", Some(1.0), 5).is_ok());
    }

    #[test]
    fn valida_num_resultados() {
        assert!(validar_busqueda("python", None, 0).is_err());
        assert!(validar_busqueda("python", None, 1).is_ok());
    }

    #[test]
    fn extensiones_de_ocr() {
        assert!(extension_permitida("escaneo.PDF"));
        assert!(extension_permitida("pagina.jpeg"));
        assert!(!extension_permitida("documento.docx"));
        assert!(!extension_permitida("sin_extension"));
    }

    #[test]
    fn candidatas_incluyen_categoria_autor_y_palabras_largas() {
        let etiquetas = etiquetas_candidatas(
            "clean code para todos",
            "un libro para aprender codigo limpio",
            "desarrollo",
            "Robert C. Martin",
        );
        assert!(etiquetas.contains(&"desarrollo".to_string()));
        assert!(etiquetas.contains(&"Robert C. Martin".to_string()));
        // title words longer than 4 chars, lowercased
        assert!(etiquetas.contains(&"clean".to_string()));
        assert!(etiquetas.contains(&"todos".to_string()));
        // short words skipped
        assert!(!etiquetas.contains(&"code".to_string()));
        // description words longer than 5 chars, no duplicates
        assert!(etiquetas.contains(&"aprender".to_string()));
        assert_eq!(
            etiquetas.iter().filter(|e| e.as_str() == "limpio").count(),
            1
        );
    }

    #[test]
    fn seleccion_de_etiquetas_respeta_el_maximo() {
        let candidatas: Vec<String> = (0..20).map(|i| format!("etiqueta{i}")).collect();
        let etiquetas = seleccionar_etiquetas(candidatas);
        assert!(etiquetas.len() >= 3 && etiquetas.len() <= 7);
        // sorted by confidence, descending
        for par in etiquetas.windows(2) {
            assert!(par[0].confianza >= par[1].confianza);
        }
    }

    #[test]
    fn seleccion_con_pocas_candidatas_no_falla() {
        let etiquetas = seleccionar_etiquetas(vec!["una".into()]);
        assert_eq!(etiquetas.len(), 1);
    }

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::async_trait;

    use crate::gemini::AiProvider;

    /// Scores by title keyword and counts every similarity call.
    struct AiGuiado {
        llamadas: AtomicUsize,
        puntuaciones: Vec<(&'static str, f64)>,
    }

    impl AiGuiado {
        fn new(puntuaciones: Vec<(&'static str, f64)>) -> Arc<Self> {
            Arc::new(Self {
                llamadas: AtomicUsize::new(0),
                puntuaciones,
            })
        }
    }

    #[async_trait]
    impl AiProvider for AiGuiado {
        async fn similitud_semantica(&self, _consulta: &str, texto: &str) -> f64 {
            self.llamadas.fetch_add(1, Ordering::SeqCst);
            self.puntuaciones
                .iter()
                .find(|(clave, _)| texto.contains(clave))
                .map(|(_, puntuacion)| *puntuacion)
                .unwrap_or(0.0)
        }

        async fn generar_respuesta(&self, _consulta: &str, _contexto: &str) -> String {
            "respuesta de prueba".into()
        }
    }

    fn documento(titulo: &str, descripcion: &str) -> crate::documentos::repo::Documento {
        crate::documentos::repo::Documento {
            documento_id: Uuid::new_v4(),
            tipo_documento: "digital".into(),
            autor: "autor".into(),
            titulo: titulo.into(),
            descripcion: descripcion.into(),
            categoria: "general".into(),
            stock: 1,
            precio: 10,
            editorial: "editorial".into(),
            idioma: "es".into(),
            paginas: 100,
            imagen: String::new(),
        }
    }

    #[tokio::test]
    async fn corpus_vacio_no_llama_al_proveedor() {
        let fake = AiGuiado::new(vec![]);
        let ai: Arc<dyn AiProvider> = fake.clone();

        let respuesta = buscar_entre(&ai, Vec::new(), "python", 5, None).await;

        assert!(respuesta.resultados.is_empty());
        assert_eq!(respuesta.total_encontrados, 0);
        assert_eq!(
            respuesta.mensaje.as_deref(),
            Some("No se encontraron documentos para evaluar")
        );
        assert_eq!(fake.llamadas.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn documentos_sin_texto_no_se_evaluan() {
        let fake = AiGuiado::new(vec![]);
        let ai: Arc<dyn AiProvider> = fake.clone();

        let documentos = vec![documento("   ", ""), documento("", "  ")];
        let respuesta = buscar_entre(&ai, documentos, "python", 5, None).await;

        assert_eq!(
            respuesta.mensaje.as_deref(),
            Some("No se encontraron documentos para evaluar")
        );
        assert_eq!(fake.llamadas.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn la_brecha_corta_y_cada_documento_se_evalua_una_vez() {
        let fake = AiGuiado::new(vec![
            ("alfa", 0.9),
            ("beta", 0.85),
            ("gama", 0.5),
            ("delta", 0.4),
            ("epsilon", 0.3),
        ]);
        let ai: Arc<dyn AiProvider> = fake.clone();

        let documentos = vec![
            documento("alfa", "sobre lenguajes"),
            documento("beta", "sobre lenguajes"),
            documento("gama", "sobre cocina"),
            documento("delta", "sobre cocina"),
            documento("epsilon", "sobre cocina"),
        ];
        let respuesta = buscar_entre(&ai, documentos, "lenguajes", 5, None).await;

        assert_eq!(fake.llamadas.load(Ordering::SeqCst), 5);
        assert_eq!(respuesta.resultados.len(), 2);
        assert_eq!(respuesta.total_encontrados, 2);
        assert_eq!(respuesta.resultados[0].titulo, "alfa");
        assert_eq!(respuesta.resultados[0].relevancia, 0.9);
        assert_eq!(respuesta.resultados[1].titulo, "beta");
        assert!(respuesta.mensaje.is_none());
    }

    #[tokio::test]
    async fn sin_coincidencias_devuelve_mensaje_de_ayuda() {
        let fake = AiGuiado::new(vec![("alfa", 0.3), ("beta", 0.29), ("gama", 0.28)]);
        let ai: Arc<dyn AiProvider> = fake.clone();

        let documentos = vec![
            documento("alfa", "x"),
            documento("beta", "y"),
            documento("gama", "z"),
        ];
        let respuesta = buscar_entre(&ai, documentos, "astronomia", 5, None).await;

        assert!(respuesta.resultados.is_empty());
        assert_eq!(
            respuesta.mensaje.as_deref(),
            Some(
                "No se encontraron documentos que coincidan con su consulta. \
                 Intente con términos más generales."
            )
        );
    }

    #[tokio::test]
    async fn el_umbral_manual_filtra_estrictamente() {
        let fake = AiGuiado::new(vec![("alfa", 0.9), ("beta", 0.5), ("gama", 0.3)]);
        let ai: Arc<dyn AiProvider> = fake.clone();

        let documentos = vec![
            documento("alfa", "x"),
            documento("beta", "y"),
            documento("gama", "z"),
        ];
        let respuesta = buscar_entre(&ai, documentos, "algo", 5, Some(0.6)).await;

        assert_eq!(respuesta.resultados.len(), 1);
        assert_eq!(respuesta.resultados[0].titulo, "alfa");
    }
}
