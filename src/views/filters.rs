use crate::{
    api::GameApi,
    models::{FilterCriteria, GameStatus, Genre},
};

use tracing::warn;

/// One `<option>` of a filter select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Filter criteria plus the choice lists that feed its selects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterPanel {
    pub criteria: FilterCriteria,
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    return match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
}

impl FilterPanel {
    /// Fetches the known platforms and genres side by side. A failed fetch
    /// leaves that choice list empty instead of failing the panel.
    pub async fn mount(api: &dyn GameApi, criteria: FilterCriteria) -> Self {
        let (platforms, genres) = futures::join!(api.list_platforms(), api.list_genres());

        let platforms = platforms.unwrap_or_else(|err| {
            warn!("could not load platform options: {err}");
            vec![]
        });
        let genres = genres.unwrap_or_else(|err| {
            warn!("could not load genre options: {err}");
            vec![]
        });

        return Self {
            criteria,
            platforms,
            genres,
        };
    }

    pub fn has_active(&self) -> bool {
        return !self.criteria.is_empty();
    }

    pub fn status_options(&self) -> Vec<FilterOption> {
        return GameStatus::ALL
            .iter()
            .map(|status| FilterOption {
                value: status.as_str().to_string(),
                label: status.label().to_string(),
                selected: self.criteria.status == Some(*status),
            })
            .collect();
    }

    pub fn genre_options(&self) -> Vec<FilterOption> {
        return self
            .genres
            .iter()
            .map(|value| {
                let genre = Genre::parse(value);
                FilterOption {
                    value: value.clone(),
                    label: genre.map_or_else(|| capitalize(value), |g| g.label().to_string()),
                    selected: genre.is_some() && self.criteria.genre == genre,
                }
            })
            .collect();
    }

    pub fn platform_options(&self) -> Vec<FilterOption> {
        return self
            .platforms
            .iter()
            .map(|value| FilterOption {
                value: value.clone(),
                label: value.clone(),
                selected: self.criteria.platform.as_deref() == Some(value.as_str()),
            })
            .collect();
    }

    pub fn rating_options(&self) -> Vec<FilterOption> {
        return (1..=10u8)
            .map(|rating| FilterOption {
                value: rating.to_string(),
                label: format!("{rating}+ estrellas"),
                selected: self.criteria.min_rating == Some(rating),
            })
            .collect();
    }
}
