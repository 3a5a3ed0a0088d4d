use axum::{Router, routing::get};
use crate::{AppState, controllers::status_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/status", get(status_controller::status))
}
