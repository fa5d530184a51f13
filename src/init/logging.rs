use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,game_shelf=debug";

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();
}
