mod api;
mod logging;

pub use api::init_api_client;
pub use logging::init_tracing;
