pub mod dto;
pub mod error;
pub mod gemini;
pub mod handlers;
pub mod parse;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
