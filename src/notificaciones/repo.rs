use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "tipo_notificacion", rename_all = "snake_case")]
pub enum TipoNotificacion {
    Info,
    Alerta,
    Error,
    Exito,
}

impl TipoNotificacion {
    /// Client-side icon name for each kind.
    pub fn icono(self) -> &'static str {
        match self {
            TipoNotificacion::Info => "info-circle",
            TipoNotificacion::Alerta => "exclamation-triangle",
            TipoNotificacion::Error => "x-circle",
            TipoNotificacion::Exito => "check-circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "estado_notificacion", rename_all = "snake_case")]
pub enum EstadoNotificacion {
    NoLeida,
    Leida,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notificacion {
    pub notificacion_id: Uuid,
    pub usuario_id: Uuid,
    pub documento_id: Option<Uuid>,
    pub titulo: String,
    pub mensaje: String,
    pub tipo: TipoNotificacion,
    pub estado: EstadoNotificacion,
    pub icono: String,
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_creacion: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub fecha_lectura: Option<OffsetDateTime>,
}

const COLUMNAS: &str = "notificacion_id, usuario_id, documento_id, titulo, mensaje, tipo, \
                        estado, icono, fecha_creacion, fecha_lectura";

impl Notificacion {
    pub async fn find_by_usuario(
        db: &PgPool,
        usuario_id: Uuid,
        estado: Option<EstadoNotificacion>,
        tipo: Option<TipoNotificacion>,
    ) -> anyhow::Result<Vec<Notificacion>> {
        let filas = sqlx::query_as::<_, Notificacion>(&format!(
            "SELECT {COLUMNAS} FROM notificaciones
             WHERE usuario_id = $1
               AND ($2::estado_notificacion IS NULL OR estado = $2)
               AND ($3::tipo_notificacion IS NULL OR tipo = $3)
             ORDER BY fecha_creacion DESC"
        ))
        .bind(usuario_id)
        .bind(estado)
        .bind(tipo)
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn create(
        db: &PgPool,
        usuario_id: Uuid,
        documento_id: Option<Uuid>,
        titulo: &str,
        mensaje: &str,
        tipo: TipoNotificacion,
    ) -> anyhow::Result<Notificacion> {
        let fila = sqlx::query_as::<_, Notificacion>(&format!(
            "INSERT INTO notificaciones
                 (notificacion_id, usuario_id, documento_id, titulo, mensaje, tipo,
                  estado, icono, fecha_creacion)
             VALUES ($1, $2, $3, $4, $5, $6, 'no_leida', $7, $8)
             RETURNING {COLUMNAS}"
        ))
        .bind(Uuid::new_v4())
        .bind(usuario_id)
        .bind(documento_id)
        .bind(titulo)
        .bind(mensaje)
        .bind(tipo)
        .bind(tipo.icono())
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await?;
        Ok(fila)
    }

    /// Marks one notification of the given user as read. Returns `false` when
    /// it does not exist or belongs to someone else.
    pub async fn marcar_leida(
        db: &PgPool,
        notificacion_id: Uuid,
        usuario_id: Uuid,
    ) -> anyhow::Result<bool> {
        let resultado = sqlx::query(
            "UPDATE notificaciones
             SET estado = 'leida', fecha_lectura = $3
             WHERE notificacion_id = $1 AND usuario_id = $2",
        )
        .bind(notificacion_id)
        .bind(usuario_id)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;
        Ok(resultado.rows_affected() > 0)
    }

    /// Marks every unread notification of the user as read, returning how many
    /// changed.
    pub async fn marcar_todas_leidas(db: &PgPool, usuario_id: Uuid) -> anyhow::Result<u64> {
        let resultado = sqlx::query(
            "UPDATE notificaciones
             SET estado = 'leida', fecha_lectura = $2
             WHERE usuario_id = $1 AND estado = 'no_leida'",
        )
        .bind(usuario_id)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;
        Ok(resultado.rows_affected())
    }
}

/// Scheduled reminder tied to a document. The repeat interval is in days.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recordatorio {
    pub recordatorio_id: Uuid,
    pub usuario_id: Uuid,
    pub documento_id: Uuid,
    pub titulo: String,
    pub mensaje: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_programada: OffsetDateTime,
    pub repetir: bool,
    pub intervalo_repeticion: Option<i32>,
    pub activo: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_creacion: OffsetDateTime,
}

const COLUMNAS_RECORDATORIO: &str =
    "recordatorio_id, usuario_id, documento_id, titulo, mensaje, fecha_programada, \
     repetir, intervalo_repeticion, activo, fecha_creacion";

impl Recordatorio {
    pub async fn find_by_usuario(
        db: &PgPool,
        usuario_id: Uuid,
        activo: Option<bool>,
        documento_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<Recordatorio>> {
        let filas = sqlx::query_as::<_, Recordatorio>(&format!(
            "SELECT {COLUMNAS_RECORDATORIO} FROM recordatorios
             WHERE usuario_id = $1
               AND ($2::boolean IS NULL OR activo = $2)
               AND ($3::uuid IS NULL OR documento_id = $3)
             ORDER BY fecha_programada ASC"
        ))
        .bind(usuario_id)
        .bind(activo)
        .bind(documento_id)
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn find_by_id(
        db: &PgPool,
        recordatorio_id: Uuid,
        usuario_id: Uuid,
    ) -> anyhow::Result<Option<Recordatorio>> {
        let fila = sqlx::query_as::<_, Recordatorio>(&format!(
            "SELECT {COLUMNAS_RECORDATORIO} FROM recordatorios
             WHERE recordatorio_id = $1 AND usuario_id = $2"
        ))
        .bind(recordatorio_id)
        .bind(usuario_id)
        .fetch_optional(db)
        .await?;
        Ok(fila)
    }

    pub async fn create(db: &PgPool, nuevo: &Recordatorio) -> anyhow::Result<Recordatorio> {
        let fila = sqlx::query_as::<_, Recordatorio>(&format!(
            "INSERT INTO recordatorios ({COLUMNAS_RECORDATORIO})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNAS_RECORDATORIO}"
        ))
        .bind(nuevo.recordatorio_id)
        .bind(nuevo.usuario_id)
        .bind(nuevo.documento_id)
        .bind(&nuevo.titulo)
        .bind(&nuevo.mensaje)
        .bind(nuevo.fecha_programada)
        .bind(nuevo.repetir)
        .bind(nuevo.intervalo_repeticion)
        .bind(nuevo.activo)
        .bind(nuevo.fecha_creacion)
        .fetch_one(db)
        .await?;
        Ok(fila)
    }

    pub async fn update(&self, db: &PgPool) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE recordatorios
             SET titulo = $2, mensaje = $3, fecha_programada = $4,
                 repetir = $5, intervalo_repeticion = $6, activo = $7
             WHERE recordatorio_id = $1",
        )
        .bind(self.recordatorio_id)
        .bind(&self.titulo)
        .bind(&self.mensaje)
        .bind(self.fecha_programada)
        .bind(self.repetir)
        .bind(self.intervalo_repeticion)
        .bind(self.activo)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn delete(
        db: &PgPool,
        recordatorio_id: Uuid,
        usuario_id: Uuid,
    ) -> anyhow::Result<bool> {
        let resultado = sqlx::query(
            "DELETE FROM recordatorios WHERE recordatorio_id = $1 AND usuario_id = $2",
        )
        .bind(recordatorio_id)
        .bind(usuario_id)
        .execute(db)
        .await?;
        Ok(resultado.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icono_por_tipo() {
        assert_eq!(TipoNotificacion::Info.icono(), "info-circle");
        assert_eq!(TipoNotificacion::Alerta.icono(), "exclamation-triangle");
        assert_eq!(TipoNotificacion::Error.icono(), "x-circle");
        assert_eq!(TipoNotificacion::Exito.icono(), "check-circle");
    }

    #[test]
    fn tipos_serializan_en_snake_case() {
        assert_eq!(
            serde_json::to_string(&TipoNotificacion::Exito).unwrap(),
            "\"exito\""
        );
        assert_eq!(
            serde_json::to_string(&EstadoNotificacion::NoLeida).unwrap(),
            "\"no_leida\""
        );
    }
}
