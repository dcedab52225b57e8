use serde::Deserialize;
use uuid::Uuid;

/// Body of `POST /ventas/guardar`.
#[derive(Debug, Deserialize)]
pub struct CrearRegistro {
    pub id_cliente: Uuid,
    pub id_documento: Uuid,
    pub titulo_documento: String,
    pub tipo_de_adquisicion: String,
    pub cantidad: i32,
}
