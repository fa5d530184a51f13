use super::{ListPage, Renderer, Skin, Theme};

use crate::{
    models::{rating_stars, CollectionStats, GameEntry, GameStatus, Genre, ImageChange},
    prelude::*,
    views::{FilterOption, FormMode, GameForm, ListState, StatsPanel},
};

use askama::Template;

const APP_TITLE: &str = "Mi Colección de Juegos";

/// Server-side HTML through askama templates, in the configured skin.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    theme: Theme,
    minify: bool,
}

impl HtmlRenderer {
    pub fn new(skin: Skin) -> Self {
        return Self {
            theme: skin.theme(),
            minify: true,
        };
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        return self;
    }

    fn finish(&self, html: String) -> Result<String> {
        if !self.minify {
            return Ok(html);
        }

        let mut cfg = minify_html::Cfg::new();
        cfg.do_not_minify_doctype = true;
        cfg.keep_closing_tags = true;
        cfg.keep_html_and_head_opening_tags = true;

        let minified = minify_html::minify(html.as_bytes(), &cfg);
        return Ok(String::from_utf8(minified)?);
    }
}

struct EntryCard {
    name: String,
    platform: String,
    status_label: String,
    status_badge: String,
    genre_label: String,
    genre_badge: String,
    has_image: bool,
    image_url: String,
    has_description: bool,
    description: String,
    hours_label: String,
    has_rating: bool,
    stars: String,
    rating_label: String,
    has_release_date: bool,
    release_date: String,
    has_added: bool,
    added: String,
    edit_href: String,
    delete_action: String,
}

impl EntryCard {
    fn new(entry: &GameEntry, theme: &Theme) -> Self {
        let description = entry.description_preview();
        let stars: String = entry
            .rating
            .map(|rating| {
                rating_stars(rating)
                    .into_iter()
                    .map(|filled| if filled { '★' } else { '☆' })
                    .collect()
            })
            .unwrap_or_default();

        return Self {
            name: entry.name.clone(),
            platform: entry.platform.clone(),
            status_label: entry.status_label().to_string(),
            status_badge: theme.badge(entry.status.badge_tone()),
            genre_label: entry.genre_label().to_string(),
            genre_badge: theme.badge(entry.genre.badge_tone()),
            has_image: entry.image_url.is_some(),
            image_url: entry.image_url.clone().unwrap_or_default(),
            has_description: description.is_some(),
            description: description.unwrap_or_default(),
            hours_label: entry.hours_label(),
            has_rating: entry.rating.is_some(),
            stars,
            rating_label: entry
                .rating
                .map(|r| format!("({r}/10)"))
                .unwrap_or_default(),
            has_release_date: entry.release_date.is_some(),
            release_date: entry
                .release_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            has_added: entry.created_at.is_some(),
            added: entry
                .created_at
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            edit_href: format!("/games/{}/edit", entry.id),
            delete_action: format!("/games/{}/delete", entry.id),
        };
    }
}

#[derive(Default)]
struct StatsView {
    total: u64,
    completed: u64,
    completed_pct: u64,
    playing: u64,
    playing_pct: u64,
    not_started: u64,
    not_started_pct: u64,
    active_pct: u64,
    total_hours: String,
    has_average_hours: bool,
    average_hours: u64,
    average_rating: String,
    rating_badge: String,
    rating_verdict: &'static str,
    has_abandoned: bool,
    abandoned: String,
}

impl StatsView {
    fn new(stats: &CollectionStats, theme: &Theme) -> Self {
        let abandoned = stats.abandoned_label();

        return Self {
            total: stats.total,
            completed: stats.completed,
            completed_pct: stats.completed_pct(),
            playing: stats.playing,
            playing_pct: stats.playing_pct(),
            not_started: stats.not_started,
            not_started_pct: stats.not_started_pct(),
            active_pct: stats.active_pct(),
            total_hours: stats.total_hours_label(),
            has_average_hours: stats.average_hours_per_game().is_some(),
            average_hours: stats.average_hours_per_game().unwrap_or_default(),
            average_rating: stats.average_rating_label(),
            rating_badge: theme.badge(stats.rating_tone()),
            rating_verdict: stats.rating_verdict(),
            has_abandoned: abandoned.is_some(),
            abandoned: abandoned.unwrap_or_default(),
        };
    }
}

#[derive(Template)]
#[template(path = "games.html")]
struct GamesTemplate {
    title: &'static str,
    theme: Theme,

    has_notice: bool,
    notice: &'static str,

    search: String,
    min_hours: String,
    status_options: Vec<FilterOption>,
    genre_options: Vec<FilterOption>,
    platform_options: Vec<FilterOption>,
    rating_options: Vec<FilterOption>,
    has_active_filters: bool,
    filter_summary: String,

    has_stats: bool,
    stats: StatsView,
    stats_message: String,

    is_loading: bool,
    is_failed: bool,
    is_empty: bool,
    failure: String,
    refresh_href: String,
    cards: Vec<EntryCard>,
}

#[derive(Template)]
#[template(path = "form.html")]
struct FormTemplate {
    title: &'static str,
    theme: Theme,

    heading: &'static str,
    action: String,
    submit_label: &'static str,

    has_error: bool,
    error: String,

    name: String,
    description: String,
    platform: String,
    status_options: Vec<FilterOption>,
    genre_options: Vec<FilterOption>,
    hours: String,
    release_date: String,
    rating: String,

    is_edit: bool,
    has_current_image: bool,
    current_image_url: String,
    has_pending_image: bool,
    pending_image: String,
    pending_preview_href: String,
    clear_checked: bool,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    title: &'static str,
    theme: Theme,
    message: &'a str,
    back_href: &'a str,
}

fn status_choices(selected: GameStatus) -> Vec<FilterOption> {
    return GameStatus::ALL
        .iter()
        .map(|status| FilterOption {
            value: status.as_str().to_string(),
            label: status.label().to_string(),
            selected: *status == selected,
        })
        .collect();
}

fn genre_choices(selected: Genre) -> Vec<FilterOption> {
    return Genre::ALL
        .iter()
        .map(|genre| FilterOption {
            value: genre.as_str().to_string(),
            label: genre.label().to_string(),
            selected: *genre == selected,
        })
        .collect();
}

impl Renderer for HtmlRenderer {
    fn list_page(&self, page: &ListPage<'_>) -> Result<String> {
        let criteria = &page.filters.criteria;

        let (has_stats, stats, stats_message) = match page.stats {
            StatsPanel::Ready(stats) => (true, StatsView::new(stats, &self.theme), String::new()),
            StatsPanel::Unavailable(message) => (false, StatsView::default(), message.clone()),
        };

        let (failure, cards): (String, Vec<EntryCard>) = match &page.list.state {
            ListState::Failed(message) => (message.clone(), vec![]),
            ListState::Ready(entries) => (
                String::new(),
                entries
                    .iter()
                    .map(|entry| EntryCard::new(entry, &self.theme))
                    .collect(),
            ),
            ListState::Loading => (String::new(), vec![]),
        };

        let template = GamesTemplate {
            title: APP_TITLE,
            theme: self.theme,

            has_notice: page.notice.is_some(),
            notice: page.notice.map(|n| n.message()).unwrap_or_default(),

            search: criteria.search.clone().unwrap_or_default(),
            min_hours: criteria
                .min_hours
                .map(|h| h.to_string())
                .unwrap_or_default(),
            status_options: page.filters.status_options(),
            genre_options: page.filters.genre_options(),
            platform_options: page.filters.platform_options(),
            rating_options: page.filters.rating_options(),
            has_active_filters: page.filters.has_active(),
            filter_summary: criteria.summary(),

            has_stats,
            stats,
            stats_message,

            is_loading: matches!(page.list.state, ListState::Loading),
            is_failed: matches!(page.list.state, ListState::Failed(_)),
            is_empty: page.list.is_empty_collection(),
            failure,
            refresh_href: page.list.retry_href(),
            cards,
        };

        return self.finish(template.render()?);
    }

    fn form_page(&self, form: &GameForm) -> Result<String> {
        let draft = &form.draft;

        let (heading, action, submit_label) = match &form.mode {
            FormMode::Create => ("Agregar Juego", "/games/new".to_string(), "Guardar"),
            FormMode::Edit { id, .. } => ("Editar Juego", format!("/games/{id}/edit"), "Actualizar"),
        };

        let pending_image = form.pending_image.clone().unwrap_or_default();

        let template = FormTemplate {
            title: APP_TITLE,
            theme: self.theme,

            heading,
            action,
            submit_label,

            has_error: form.error.is_some(),
            error: form.error.clone().unwrap_or_default(),

            name: draft.name.clone(),
            description: draft.description.clone(),
            platform: draft.platform.clone(),
            status_options: status_choices(draft.status),
            genre_options: genre_choices(draft.genre),
            hours: form.hours_input(),
            release_date: form.release_date_input(),
            rating: form.rating_input(),

            is_edit: form.is_edit(),
            has_current_image: form.current_image_url().is_some(),
            current_image_url: form.current_image_url().unwrap_or_default().to_string(),
            has_pending_image: form.pending_image.is_some(),
            pending_preview_href: format!("/uploads/pending/{pending_image}"),
            pending_image,
            clear_checked: matches!(draft.image, ImageChange::Clear),
        };

        return self.finish(template.render()?);
    }

    fn error_page(&self, message: &str, back_href: &str) -> Result<String> {
        let template = ErrorTemplate {
            title: APP_TITLE,
            theme: self.theme,
            message,
            back_href,
        };

        return self.finish(template.render()?);
    }
}
