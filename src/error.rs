use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Request failure taxonomy. Every handler maps domain outcomes onto these
/// variants; the wire shape is always `{"detail": <mensaje>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detalle) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => {
                let cuerpo = Json(json!({ "detail": msg }));
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    cuerpo,
                )
                    .into_response();
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(e) => {
                error!(error = ?e, "error interno");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detalle }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_encontrado_es_404() {
        let res = ApiError::NotFound("x".into()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn no_autorizado_lleva_www_authenticate() {
        let res = ApiError::Unauthorized("x".into()).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn interno_oculta_el_detalle() {
        let res = ApiError::Internal(anyhow::anyhow!("secreto")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
