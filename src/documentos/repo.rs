use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Bibliographic record with its stored image reference.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Documento {
    pub documento_id: Uuid,
    pub tipo_documento: String,
    pub autor: String,
    pub titulo: String,
    pub descripcion: String,
    pub categoria: String,
    pub stock: i32,
    pub precio: i32,
    pub editorial: String,
    pub idioma: String,
    pub paginas: i32,
    pub imagen: String,
}

const COLUMNAS: &str = "documento_id, tipo_documento, autor, titulo, descripcion, categoria, \
                        stock, precio, editorial, idioma, paginas, imagen";

impl Documento {
    pub async fn find_all(db: &PgPool) -> anyhow::Result<Vec<Documento>> {
        let filas = sqlx::query_as::<_, Documento>(&format!(
            "SELECT {COLUMNAS} FROM documentos ORDER BY titulo"
        ))
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Documento>> {
        let fila = sqlx::query_as::<_, Documento>(&format!(
            "SELECT {COLUMNAS} FROM documentos WHERE documento_id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(fila)
    }

    pub async fn find_by_titulo(db: &PgPool, titulo: &str) -> anyhow::Result<Vec<Documento>> {
        let filas = sqlx::query_as::<_, Documento>(&format!(
            "SELECT {COLUMNAS} FROM documentos WHERE titulo = $1"
        ))
        .bind(titulo)
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn create(db: &PgPool, nuevo: &Documento) -> anyhow::Result<Documento> {
        let fila = sqlx::query_as::<_, Documento>(&format!(
            "INSERT INTO documentos ({COLUMNAS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNAS}"
        ))
        .bind(nuevo.documento_id)
        .bind(&nuevo.tipo_documento)
        .bind(&nuevo.autor)
        .bind(&nuevo.titulo)
        .bind(&nuevo.descripcion)
        .bind(&nuevo.categoria)
        .bind(nuevo.stock)
        .bind(nuevo.precio)
        .bind(&nuevo.editorial)
        .bind(&nuevo.idioma)
        .bind(nuevo.paginas)
        .bind(&nuevo.imagen)
        .fetch_one(db)
        .await?;
        Ok(fila)
    }

    pub async fn update(db: &PgPool, documento: &Documento) -> anyhow::Result<Documento> {
        let fila = sqlx::query_as::<_, Documento>(&format!(
            "UPDATE documentos
             SET tipo_documento = $2, autor = $3, titulo = $4, descripcion = $5,
                 categoria = $6, stock = $7, precio = $8, editorial = $9,
                 idioma = $10, paginas = $11, imagen = $12
             WHERE documento_id = $1
             RETURNING {COLUMNAS}"
        ))
        .bind(documento.documento_id)
        .bind(&documento.tipo_documento)
        .bind(&documento.autor)
        .bind(&documento.titulo)
        .bind(&documento.descripcion)
        .bind(&documento.categoria)
        .bind(documento.stock)
        .bind(documento.precio)
        .bind(&documento.editorial)
        .bind(&documento.idioma)
        .bind(documento.paginas)
        .bind(&documento.imagen)
        .fetch_one(db)
        .await?;
        Ok(fila)
    }

    pub async fn set_categoria(db: &PgPool, id: Uuid, categoria: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE documentos SET categoria = $2 WHERE documento_id = $1")
            .bind(id)
            .bind(categoria)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM documentos WHERE documento_id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() == 1)
    }
}
