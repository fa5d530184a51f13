mod forms;
mod games;
mod utils;

use crate::prelude::*;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::Redirect,
    routing::get,
    Router,
};

const KB: usize = 1024;
const MB: usize = 1024 * KB;

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    let router = forms::add_routes(router).route_layer(DefaultBodyLimit::max(10 * MB));

    let router = games::add_routes(router);

    return router
        .route("/", get(index))
        .route("/health", get(|| async { StatusCode::NO_CONTENT }));
}

async fn index() -> Redirect {
    return Redirect::to("/games");
}
