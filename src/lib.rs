pub mod api;
pub mod config;
mod controllers;
pub mod init;
pub mod models;
pub mod prelude;
pub mod render;
pub mod result;
pub mod views;

pub use crate::result::Result;

use crate::{
    api::GameApi,
    config::Config,
    render::{HtmlRenderer, Renderer},
    views::{ListView, PendingUploads},
};

use std::{sync::Arc, time::Duration};

use axum::Router;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::info;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub api: Arc<dyn GameApi>,
    pub renderer: Arc<dyn Renderer>,
    pub list: Arc<Mutex<ListView>>,
    pub uploads: Arc<Mutex<PendingUploads>>,
}

impl AppState {
    pub fn new(cfg: Config, api: Arc<dyn GameApi>) -> Self {
        let renderer = HtmlRenderer::new(cfg.skin);

        return Self {
            cfg: Arc::new(cfg),
            api,
            renderer: Arc::new(renderer),
            list: Arc::new(Mutex::new(ListView::new())),
            uploads: Arc::new(Mutex::new(PendingUploads::default())),
        };
    }
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new();

    // dynamic paths
    let router = controllers::add_routes(router);

    // static assets
    let router = router.nest_service("/assets", ServeDir::new("assets"));

    return router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
    );
}

pub async fn run() -> Result {
    let cfg = config::build()?;

    let api = init::init_api_client(&cfg)?;
    let addr = cfg.bind_addr()?;

    let state = AppState::new(cfg, Arc::new(api));

    info!(
        "serving {} skin on {}",
        state.cfg.skin.theme().name,
        state.cfg.server_host_uri
    );

    let router = build_router(state);

    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await?;

    return Ok(());
}
