use crate::{api::HttpGameApi, prelude::*};

use tracing::info;

pub fn init_api_client(cfg: &Config) -> Result<HttpGameApi> {
    let http = reqwest::Client::builder()
        .timeout(cfg.api_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    info!("using game backend at {}", cfg.api_base_url);

    return Ok(HttpGameApi::new(http, cfg.api_base_url.clone()));
}
