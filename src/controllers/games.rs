use super::utils;

use crate::{
    models::{FilterCriteria, FilterParams},
    prelude::*,
    render::ListPage,
    views::{list, FilterPanel, Notice, StatsPanel},
};

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::warn;

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router
        .route("/games", get(games))
        .route("/games/:id/delete", post(delete_game));
}

#[derive(Debug, Deserialize)]
struct NoticeParams {
    notice: Option<String>,
}

/// Every visit mounts the page: filter options, the list and the stats are
/// fetched side by side, each failing on its own.
async fn games(
    State(state): State<AppState>,
    Query(filters): Query<FilterParams>,
    Query(params): Query<NoticeParams>,
) -> Result<Html<String>> {
    let criteria = FilterCriteria::from(filters);
    let api = state.api.as_ref();

    let (mut filters, list, stats) = futures::join!(
        FilterPanel::mount(api, criteria.clone()),
        list::refresh(&state.list, api, criteria),
        StatsPanel::load(api),
    );

    // A newer fetch may have settled the list for other filters.
    filters.criteria = list.criteria.clone();

    let notice = params.notice.as_deref().and_then(Notice::parse);

    let html = state.renderer.list_page(&ListPage {
        list: &list,
        filters: &filters,
        stats: &stats,
        notice,
    })?;

    return Ok(Html(html));
}

async fn delete_game(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    let notice = match list::delete_entry(state.api.as_ref(), id).await {
        Ok(()) => None,
        Err(err) => {
            warn!("could not delete game entry {id}: {err}");
            Some(Notice::DeleteFailed)
        }
    };

    return Redirect::to(&utils::list_href(&state, notice).await);
}
