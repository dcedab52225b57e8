mod app;
mod auth;
mod config;
mod documentos;
mod error;
mod gemini;
mod ia;
mod imagenes;
mod integraciones;
mod notificaciones;
mod state;
mod usuarios;
mod ventas;

use uuid::Uuid;

use crate::state::AppState;
use crate::usuarios::repo::{Rol, Usuario};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "bibliodoc=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    // Run migrations if present
    if let Err(e) = sqlx::migrate!("./migrations").run(&app_state.db).await {
        tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
    }

    if let Err(e) = asegurar_admin(&app_state).await {
        tracing::warn!(error = %e, "no se pudo crear el administrador inicial; continuing");
    }

    let app = app::build_app(app_state);
    app::serve(app).await
}

/// Creates the configured bootstrap administrator if no user with that email
/// exists yet.
async fn asegurar_admin(state: &AppState) -> anyhow::Result<()> {
    let Some(admin) = &state.config.admin else {
        return Ok(());
    };
    if Usuario::find_by_correo(&state.db, &admin.correo)
        .await?
        .is_some()
    {
        return Ok(());
    }
    let usuario = Usuario {
        usuario_id: Uuid::new_v4(),
        nombres: "Administrador".into(),
        apellidos: "Sistema".into(),
        correo: admin.correo.clone(),
        contra: auth::password::hashear_contra(&admin.contra)?,
        pais: String::new(),
        ciudad: String::new(),
        inactivo: false,
        rol: Rol::Admin,
    };
    Usuario::create(&state.db, &usuario).await?;
    tracing::info!(correo = %admin.correo, "administrador inicial creado");
    Ok(())
}
