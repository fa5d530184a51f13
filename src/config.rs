use crate::render::Skin;

use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/games/";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_protocol: String,
    pub server_domain: String,
    pub server_port: String,
    pub server_host_uri: String,

    pub api_base_url: Url,
    pub api_timeout: Duration,

    pub skin: Skin,
}

impl Config {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let port = if self.server_port.is_empty() {
            "80"
        } else {
            &self.server_port
        };

        let addr = format!("{}:{port}", self.server_domain);

        return addr
            .parse()
            .with_context(|| format!("SERVER_DOMAIN and SERVER_PORT are not a bind address: {addr}"));
    }
}

/// Reads `.env` (if there is one) and the process environment.
pub fn build() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    return from_lookup(|key| std::env::var(key).ok());
}

pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
    let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

    let server_protocol = var("SERVER_PROTOCOL", "http");
    let server_domain = var("SERVER_DOMAIN", "127.0.0.1");
    let server_port = var("SERVER_PORT", "3000");

    if !server_port.is_empty() {
        server_port
            .parse::<u16>()
            .with_context(|| format!("SERVER_PORT is not a port number: {server_port}"))?;
    }

    let server_port_postfix = if server_port.is_empty() {
        "".to_string()
    } else {
        format!(":{server_port}")
    };

    let server_host_uri = format!("{server_protocol}://{server_domain}{server_port_postfix}");

    let api_base_url = var("API_BASE_URL", DEFAULT_API_BASE_URL);
    let mut api_base_url: Url = api_base_url
        .parse()
        .with_context(|| format!("API_BASE_URL is not a URL: {api_base_url}"))?;
    if !api_base_url.path().ends_with('/') {
        let path = format!("{}/", api_base_url.path());
        api_base_url.set_path(&path);
    }

    let api_timeout = var("API_TIMEOUT_SECS", "10");
    let api_timeout = api_timeout
        .parse::<u64>()
        .map(Duration::from_secs)
        .with_context(|| format!("API_TIMEOUT_SECS is not a number of seconds: {api_timeout}"))?;

    let skin = var("UI_SKIN", "desktop");
    let skin = Skin::parse(&skin)
        .ok_or_else(|| anyhow!("UI_SKIN must be `desktop` or `mobile`, got: {skin}"))?;

    return Ok(Config {
        server_protocol,
        server_domain,
        server_port,
        server_host_uri,

        api_base_url,
        api_timeout,

        skin,
    });
}
