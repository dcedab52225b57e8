pub mod dto;
pub mod handlers;
pub mod ranker;
pub mod repo;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::ia_routes()
}
