use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutos: i64,
}

/// Optional bootstrap credentials; when set, an ADMIN account is created at
/// startup if no user with that email exists yet.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminBootstrap {
    pub correo: String,
    pub contra: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub gemini_api_key: String,
    pub cors_origins: Vec<String>,
    pub images_dir: String,
    pub admin: Option<AdminBootstrap>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("CLAVE_SECRETA")?,
            ttl_minutos: std::env::var("TOKEN_TTL_MINUTOS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let gemini_api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new());
        let images_dir = std::env::var("IMAGES_DIR").unwrap_or_else(|_| "images".into());
        let admin = match (std::env::var("ADMIN_CORREO"), std::env::var("ADMIN_CONTRA")) {
            (Ok(correo), Ok(contra)) => Some(AdminBootstrap { correo, contra }),
            _ => None,
        };
        Ok(Self {
            database_url,
            jwt,
            gemini_api_key,
            cors_origins,
            images_dir,
            admin,
        })
    }
}
