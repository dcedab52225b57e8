use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

/// Stored output of the automatic classifier.
pub struct Clasificacion;

impl Clasificacion {
    pub async fn insert(
        db: &PgPool,
        documento_id: Uuid,
        clasificacion: &str,
        confianza: f64,
        metodo: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO clasificaciones
                 (clasificacion_id, documento_id, clasificacion, confianza, metodo, fecha_clasificacion)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::new_v4())
        .bind(documento_id)
        .bind(clasificacion)
        .bind(confianza)
        .bind(metodo)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;
        Ok(())
    }
}

/// Stored tag set of a document; one row per document, replaced on re-tag.
pub struct EtiquetasIa;

impl EtiquetasIa {
    pub async fn upsert(
        db: &PgPool,
        documento_id: Uuid,
        etiquetas: &serde_json::Value,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO etiquetas_ia (documento_id, etiquetas, fecha_generacion)
             VALUES ($1, $2, $3)
             ON CONFLICT (documento_id)
             DO UPDATE SET etiquetas = EXCLUDED.etiquetas,
                           fecha_generacion = EXCLUDED.fecha_generacion",
        )
        .bind(documento_id)
        .bind(etiquetas)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;
        Ok(())
    }
}
