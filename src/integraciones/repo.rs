use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "proveedor_nube", rename_all = "snake_case")]
pub enum ProveedorNube {
    GoogleDrive,
    Dropbox,
    Onedrive,
    Otro,
}

impl ProveedorNube {
    pub fn nombre(self) -> &'static str {
        match self {
            ProveedorNube::GoogleDrive => "google_drive",
            ProveedorNube::Dropbox => "dropbox",
            ProveedorNube::Onedrive => "onedrive",
            ProveedorNube::Otro => "otro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "estado_sincronizacion", rename_all = "snake_case")]
pub enum EstadoSincronizacion {
    Pendiente,
    EnProgreso,
    Completado,
    Fallido,
}

/// Per-user cloud connection; one row per provider.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConfiguracionNube {
    pub integracion_id: Uuid,
    pub usuario_id: Uuid,
    pub proveedor: ProveedorNube,
    pub token_acceso: String,
    pub carpeta_id: Option<String>,
    pub sincronizacion_automatica: bool,
    pub intervalo_sincronizacion: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_actualizacion: OffsetDateTime,
}

const COLUMNAS_CONFIG: &str =
    "integracion_id, usuario_id, proveedor, token_acceso, carpeta_id, \
     sincronizacion_automatica, intervalo_sincronizacion, fecha_actualizacion";

impl ConfiguracionNube {
    pub async fn find_by_usuario(
        db: &PgPool,
        usuario_id: Uuid,
    ) -> anyhow::Result<Vec<ConfiguracionNube>> {
        let filas = sqlx::query_as::<_, ConfiguracionNube>(&format!(
            "SELECT {COLUMNAS_CONFIG} FROM integraciones_nube WHERE usuario_id = $1"
        ))
        .bind(usuario_id)
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn find_by_proveedor(
        db: &PgPool,
        usuario_id: Uuid,
        proveedor: ProveedorNube,
    ) -> anyhow::Result<Option<ConfiguracionNube>> {
        let fila = sqlx::query_as::<_, ConfiguracionNube>(&format!(
            "SELECT {COLUMNAS_CONFIG} FROM integraciones_nube
             WHERE usuario_id = $1 AND proveedor = $2"
        ))
        .bind(usuario_id)
        .bind(proveedor)
        .fetch_optional(db)
        .await?;
        Ok(fila)
    }

    /// Inserts or replaces the user's configuration for the provider.
    /// Returns `true` when a prior configuration was overwritten.
    pub async fn guardar(db: &PgPool, config: &ConfiguracionNube) -> anyhow::Result<bool> {
        let existente =
            Self::find_by_proveedor(db, config.usuario_id, config.proveedor).await?;
        sqlx::query(
            "INSERT INTO integraciones_nube
                 (integracion_id, usuario_id, proveedor, token_acceso, carpeta_id,
                  sincronizacion_automatica, intervalo_sincronizacion, fecha_actualizacion)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (usuario_id, proveedor)
             DO UPDATE SET token_acceso = EXCLUDED.token_acceso,
                           carpeta_id = EXCLUDED.carpeta_id,
                           sincronizacion_automatica = EXCLUDED.sincronizacion_automatica,
                           intervalo_sincronizacion = EXCLUDED.intervalo_sincronizacion,
                           fecha_actualizacion = EXCLUDED.fecha_actualizacion",
        )
        .bind(config.integracion_id)
        .bind(config.usuario_id)
        .bind(config.proveedor)
        .bind(&config.token_acceso)
        .bind(&config.carpeta_id)
        .bind(config.sincronizacion_automatica)
        .bind(config.intervalo_sincronizacion)
        .bind(config.fecha_actualizacion)
        .execute(db)
        .await?;
        Ok(existente.is_some())
    }
}

/// Sync record; one row per (user, document, provider), replaced on re-sync.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sincronizacion {
    pub sincronizacion_id: Uuid,
    pub usuario_id: Uuid,
    pub proveedor: ProveedorNube,
    pub documento_id: Uuid,
    pub documento_nombre: String,
    pub id_en_nube: String,
    pub url_en_nube: String,
    pub estado: EstadoSincronizacion,
    #[serde(with = "time::serde::rfc3339")]
    pub ultima_sincronizacion: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub proxima_sincronizacion: Option<OffsetDateTime>,
}

const COLUMNAS_SINC: &str =
    "sincronizacion_id, usuario_id, proveedor, documento_id, documento_nombre, \
     id_en_nube, url_en_nube, estado, ultima_sincronizacion, proxima_sincronizacion";

impl Sincronizacion {
    pub async fn find_by_usuario(
        db: &PgPool,
        usuario_id: Uuid,
        proveedor: Option<ProveedorNube>,
    ) -> anyhow::Result<Vec<Sincronizacion>> {
        let filas = sqlx::query_as::<_, Sincronizacion>(&format!(
            "SELECT {COLUMNAS_SINC} FROM sincronizaciones
             WHERE usuario_id = $1
               AND ($2::proveedor_nube IS NULL OR proveedor = $2)
             ORDER BY ultima_sincronizacion DESC"
        ))
        .bind(usuario_id)
        .bind(proveedor)
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn upsert(db: &PgPool, sinc: &Sincronizacion) -> anyhow::Result<()> {
        sqlx::query(&format!(
            "INSERT INTO sincronizaciones ({COLUMNAS_SINC})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (usuario_id, documento_id, proveedor)
             DO UPDATE SET documento_nombre = EXCLUDED.documento_nombre,
                           id_en_nube = EXCLUDED.id_en_nube,
                           url_en_nube = EXCLUDED.url_en_nube,
                           estado = EXCLUDED.estado,
                           ultima_sincronizacion = EXCLUDED.ultima_sincronizacion,
                           proxima_sincronizacion = EXCLUDED.proxima_sincronizacion"
        ))
        .bind(sinc.sincronizacion_id)
        .bind(sinc.usuario_id)
        .bind(sinc.proveedor)
        .bind(sinc.documento_id)
        .bind(&sinc.documento_nombre)
        .bind(&sinc.id_en_nube)
        .bind(&sinc.url_en_nube)
        .bind(sinc.estado)
        .bind(sinc.ultima_sincronizacion)
        .bind(sinc.proxima_sincronizacion)
        .execute(db)
        .await?;
        Ok(())
    }
}

/// Export audit row.
pub struct Exportacion;

impl Exportacion {
    pub async fn insert(
        db: &PgPool,
        usuario_id: Uuid,
        documento_id: Uuid,
        formato: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO exportaciones
                 (exportacion_id, usuario_id, documento_id, formato, fecha_exportacion)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(usuario_id)
        .bind(documento_id)
        .bind(formato)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;
        Ok(())
    }
}

/// Aggregate counts over the document corpus for the dashboard.
pub async fn conteo_por_columna(db: &PgPool, columna: &str) -> anyhow::Result<Vec<(String, i64)>> {
    // columna comes from a fixed set in the handler, never from input
    let filas = sqlx::query_as::<_, (String, i64)>(&format!(
        "SELECT {columna}, COUNT(*) FROM documentos GROUP BY {columna} ORDER BY COUNT(*) DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(filas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nombres_de_proveedor() {
        assert_eq!(ProveedorNube::GoogleDrive.nombre(), "google_drive");
        assert_eq!(ProveedorNube::Otro.nombre(), "otro");
    }

    #[test]
    fn estados_serializan_en_snake_case() {
        assert_eq!(
            serde_json::to_string(&EstadoSincronizacion::EnProgreso).unwrap(),
            "\"en_progreso\""
        );
        assert_eq!(
            serde_json::to_string(&ProveedorNube::GoogleDrive).unwrap(),
            "\"google_drive\""
        );
    }
}
