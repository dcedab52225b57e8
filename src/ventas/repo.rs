use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Loan-or-purchase record linking a user and a document. The document title
/// is denormalized for read convenience.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Registro {
    pub registro_id: Uuid,
    pub id_cliente: Uuid,
    pub id_documento: Uuid,
    pub titulo_documento: String,
    pub tipo_de_adquisicion: String,
    pub cantidad: i32,
}

const COLUMNAS: &str =
    "registro_id, id_cliente, id_documento, titulo_documento, tipo_de_adquisicion, cantidad";

impl Registro {
    pub async fn find_all(db: &PgPool) -> anyhow::Result<Vec<Registro>> {
        let filas =
            sqlx::query_as::<_, Registro>(&format!("SELECT {COLUMNAS} FROM ventas"))
                .fetch_all(db)
                .await?;
        Ok(filas)
    }

    pub async fn find_by_cliente(db: &PgPool, id_cliente: Uuid) -> anyhow::Result<Vec<Registro>> {
        let filas = sqlx::query_as::<_, Registro>(&format!(
            "SELECT {COLUMNAS} FROM ventas WHERE id_cliente = $1"
        ))
        .bind(id_cliente)
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn find_by_titulo(db: &PgPool, titulo: &str) -> anyhow::Result<Vec<Registro>> {
        let filas = sqlx::query_as::<_, Registro>(&format!(
            "SELECT {COLUMNAS} FROM ventas WHERE titulo_documento = $1"
        ))
        .bind(titulo)
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn find_by_tipo(db: &PgPool, tipo: &str) -> anyhow::Result<Vec<Registro>> {
        let filas = sqlx::query_as::<_, Registro>(&format!(
            "SELECT {COLUMNAS} FROM ventas WHERE tipo_de_adquisicion = $1"
        ))
        .bind(tipo)
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn create(db: &PgPool, nuevo: &Registro) -> anyhow::Result<Registro> {
        let fila = sqlx::query_as::<_, Registro>(&format!(
            "INSERT INTO ventas ({COLUMNAS})
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNAS}"
        ))
        .bind(nuevo.registro_id)
        .bind(nuevo.id_cliente)
        .bind(nuevo.id_documento)
        .bind(&nuevo.titulo_documento)
        .bind(&nuevo.tipo_de_adquisicion)
        .bind(nuevo.cantidad)
        .fetch_one(db)
        .await?;
        Ok(fila)
    }
}
