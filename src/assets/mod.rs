use crate::state::AppState;
use axum::Router;

pub mod category;
mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::asset_routes()
}
