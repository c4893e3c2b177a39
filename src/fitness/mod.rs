pub mod calculator;
pub mod goals;
pub mod handlers;
pub mod routines;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
