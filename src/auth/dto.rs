use serde::{Deserialize, Serialize};

/// Form body of `POST /token` (OAuth2 password-style field names).
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

/// Response of `POST /token`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub tipo_token: String,
}
