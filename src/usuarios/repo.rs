use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Application role stored on the user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "rol", rename_all = "UPPERCASE")]
pub enum Rol {
    User,
    Admin,
}

/// User record. The password hash never serializes to clients.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Usuario {
    pub usuario_id: Uuid,
    pub nombres: String,
    pub apellidos: String,
    pub correo: String,
    #[serde(skip_serializing)]
    pub contra: String,
    pub pais: String,
    pub ciudad: String,
    pub inactivo: bool,
    pub rol: Rol,
}

const COLUMNAS: &str =
    "usuario_id, nombres, apellidos, correo, contra, pais, ciudad, inactivo, rol";

impl Usuario {
    pub async fn find_all(db: &PgPool) -> anyhow::Result<Vec<Usuario>> {
        let filas = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNAS} FROM usuarios ORDER BY correo"
        ))
        .fetch_all(db)
        .await?;
        Ok(filas)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Usuario>> {
        let fila = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNAS} FROM usuarios WHERE usuario_id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(fila)
    }

    pub async fn find_by_correo(db: &PgPool, correo: &str) -> anyhow::Result<Option<Usuario>> {
        let fila = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNAS} FROM usuarios WHERE correo = $1"
        ))
        .bind(correo)
        .fetch_optional(db)
        .await?;
        Ok(fila)
    }

    pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios")
            .fetch_one(db)
            .await?;
        Ok(total)
    }

    pub async fn create(db: &PgPool, nuevo: &Usuario) -> anyhow::Result<Usuario> {
        let fila = sqlx::query_as::<_, Usuario>(&format!(
            "INSERT INTO usuarios ({COLUMNAS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNAS}"
        ))
        .bind(nuevo.usuario_id)
        .bind(&nuevo.nombres)
        .bind(&nuevo.apellidos)
        .bind(&nuevo.correo)
        .bind(&nuevo.contra)
        .bind(&nuevo.pais)
        .bind(&nuevo.ciudad)
        .bind(nuevo.inactivo)
        .bind(nuevo.rol)
        .fetch_one(db)
        .await?;
        Ok(fila)
    }

    /// Full-row write; callers merge patches beforehand (last write wins).
    pub async fn update(db: &PgPool, usuario: &Usuario) -> anyhow::Result<Usuario> {
        let fila = sqlx::query_as::<_, Usuario>(&format!(
            "UPDATE usuarios
             SET nombres = $2, apellidos = $3, correo = $4, contra = $5,
                 pais = $6, ciudad = $7, inactivo = $8, rol = $9
             WHERE usuario_id = $1
             RETURNING {COLUMNAS}"
        ))
        .bind(usuario.usuario_id)
        .bind(&usuario.nombres)
        .bind(&usuario.apellidos)
        .bind(&usuario.correo)
        .bind(&usuario.contra)
        .bind(&usuario.pais)
        .bind(&usuario.ciudad)
        .bind(usuario.inactivo)
        .bind(usuario.rol)
        .fetch_one(db)
        .await?;
        Ok(fila)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM usuarios WHERE usuario_id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() == 1)
    }
}
