use crate::{api::GameApi, models::CollectionStats};

use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum StatsPanel {
    Ready(CollectionStats),
    Unavailable(String),
}

impl StatsPanel {
    /// Fetches the stats once; a failure only affects this panel.
    pub async fn load(api: &dyn GameApi) -> Self {
        return match api.stats().await {
            Ok(stats) => StatsPanel::Ready(stats),
            Err(err) => {
                warn!("could not load collection stats: {err}");
                StatsPanel::Unavailable(err.user_message())
            }
        };
    }
}
