use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::integraciones::repo::{EstadoSincronizacion, ProveedorNube};

/// Body of `POST /integracion/nube/configurar`.
#[derive(Debug, Deserialize)]
pub struct ConfigurarIntegracion {
    pub proveedor: ProveedorNube,
    pub token_acceso: String,
    pub carpeta_id: Option<String>,
    #[serde(default)]
    pub sincronizacion_automatica: bool,
    pub intervalo_sincronizacion: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct RespuestaConfiguracion {
    pub mensaje: String,
    pub proveedor: ProveedorNube,
}

/// Body of `POST /integracion/nube/sincronizar`.
#[derive(Debug, Deserialize)]
pub struct SincronizarCuerpo {
    pub documento_id: Uuid,
    pub proveedor: ProveedorNube,
}

#[derive(Debug, Serialize)]
pub struct RespuestaSincronizacion {
    pub mensaje: String,
    pub id_en_nube: String,
    pub url_en_nube: String,
    pub estado: EstadoSincronizacion,
}

#[derive(Debug, Deserialize)]
pub struct FiltroSincronizaciones {
    pub proveedor: Option<ProveedorNube>,
}

/// Body of `POST /integracion/exportar`.
#[derive(Debug, Deserialize)]
pub struct ExportarCuerpo {
    pub documento_id: Uuid,
    pub formato: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentoVisto {
    pub documento_id: Uuid,
    pub titulo: String,
    pub autor: String,
    pub vistas: i64,
}

#[derive(Debug, Serialize)]
pub struct UsuarioDestacado {
    pub usuario_id: Uuid,
    pub nombre: String,
    pub documentos_creados: i64,
    pub acciones: i64,
}

#[derive(Debug, Serialize)]
pub struct DocumentoReciente {
    pub documento_id: Uuid,
    pub titulo: String,
    pub autor: String,
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_creacion: OffsetDateTime,
}

/// Payload of `GET /integracion/dashboard/estadisticas`.
#[derive(Debug, Serialize)]
pub struct DatosEstadisticos {
    pub total_documentos: i64,
    pub documentos_por_categoria: BTreeMap<String, i64>,
    pub documentos_por_idioma: BTreeMap<String, i64>,
    pub documentos_mas_vistos: Vec<DocumentoVisto>,
    pub usuarios_mas_activos: Vec<UsuarioDestacado>,
    pub documentos_recientes: Vec<DocumentoReciente>,
}
