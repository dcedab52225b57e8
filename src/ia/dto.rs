use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn num_resultados_por_defecto() -> usize {
    5
}

fn max_documentos_por_defecto() -> usize {
    3
}

/// Body of `POST /ia/busqueda-semantica`.
#[derive(Debug, Deserialize)]
pub struct ConsultaBusquedaSemantica {
    pub query: String,
    #[serde(default = "num_resultados_por_defecto")]
    pub num_resultados: usize,
}

/// Optional manual threshold, as a query parameter.
#[derive(Debug, Deserialize)]
pub struct UmbralQuery {
    pub umbral_manual: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ResultadoBusqueda {
    pub documento_id: Uuid,
    pub titulo: String,
    pub relevancia: f64,
    pub fragmento: String,
}

#[derive(Debug, Serialize)]
pub struct RespuestaBusquedaSemantica {
    pub resultados: Vec<ResultadoBusqueda>,
    pub tiempo_ejecucion: f64,
    pub total_encontrados: usize,
    pub mensaje: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentoIdQuery {
    pub documento_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RespuestaClasificacion {
    pub documento_id: Uuid,
    pub clasificacion: String,
    pub confianza: f64,
}

#[derive(Debug, Serialize)]
pub struct ResultadoOCR {
    pub documento_id: String,
    pub texto_extraido: String,
    pub metadatos_extraidos: serde_json::Value,
    pub confianza: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EtiquetaIA {
    pub nombre: String,
    pub confianza: f64,
}

#[derive(Debug, Serialize)]
pub struct DocumentoEtiquetas {
    pub documento_id: Uuid,
    pub etiquetas: Vec<EtiquetaIA>,
}

#[derive(Debug, Deserialize)]
pub struct SolicitudTraduccion {
    pub documento_id: Uuid,
    pub idioma_destino: String,
}

#[derive(Debug, Serialize)]
pub struct RespuestaTraduccion {
    pub documento_id: Uuid,
    pub idioma_origen: String,
    pub idioma_destino: String,
    pub titulo_original: String,
    pub titulo_traducido: String,
    pub descripcion_original: String,
    pub descripcion_traducida: String,
    pub nota: String,
}

/// Body of `POST /ia/asistente`.
#[derive(Debug, Deserialize)]
pub struct SolicitudAsistente {
    pub consulta: String,
    #[serde(default = "max_documentos_por_defecto")]
    pub max_documentos_contexto: usize,
    pub umbral_relevancia: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RespuestaAsistente {
    pub respuesta: String,
    pub documentos_consultados: Vec<Uuid>,
    pub tiempo_ejecucion: f64,
}
