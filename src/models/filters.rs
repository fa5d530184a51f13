use super::{GameStatus, Genre};

use serde::Deserialize;
use url::form_urlencoded;

/// Transient constraints narrowing a list fetch. `None` means no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub status: Option<GameStatus>,
    pub genre: Option<Genre>,
    pub platform: Option<String>,
    pub min_rating: Option<u8>,
    pub min_hours: Option<u32>,
}

/// Filter fields exactly as the browser submits them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub search: Option<String>,
    pub estado: Option<String>,
    pub genero: Option<String>,
    pub plataforma: Option<String>,
    pub calificacion_min: Option<String>,
    pub horas_min: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    return Some(trimmed.to_string());
}

impl From<FilterParams> for FilterCriteria {
    fn from(params: FilterParams) -> Self {
        let min_rating = non_empty(params.calificacion_min)
            .and_then(|v| v.parse::<u8>().ok())
            .filter(|v| *v > 0);
        let min_hours = non_empty(params.horas_min)
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0);

        return Self {
            search: non_empty(params.search),
            status: non_empty(params.estado).and_then(|v| GameStatus::parse(&v)),
            genre: non_empty(params.genero).and_then(|v| Genre::parse(&v)),
            platform: non_empty(params.plataforma),
            min_rating,
            min_hours,
        };
    }
}

impl FilterCriteria {
    /// Query parameters for the collection endpoint, skipping every unset field.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![];

        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("estado", status.as_str().to_string()));
        }
        if let Some(genre) = self.genre {
            pairs.push(("genero", genre.as_str().to_string()));
        }
        if let Some(platform) = &self.platform {
            pairs.push(("plataforma", platform.clone()));
        }
        if let Some(min_rating) = self.min_rating {
            pairs.push(("calificacion_min", min_rating.to_string()));
        }
        if let Some(min_hours) = self.min_hours {
            pairs.push(("horas_min", min_hours.to_string()));
        }

        return pairs;
    }

    pub fn query_string(&self) -> String {
        return form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish();
    }

    pub fn is_empty(&self) -> bool {
        return self.query_pairs().is_empty();
    }

    /// Link back to the list view with these filters applied.
    pub fn list_href(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            return "/games".to_string();
        }

        return format!("/games?{query}");
    }

    /// Human summary of the active filters, empty when none are set.
    pub fn summary(&self) -> String {
        let mut parts = vec![];

        if let Some(search) = &self.search {
            parts.push(format!("Búsqueda: \"{search}\""));
        }
        if let Some(status) = self.status {
            parts.push(format!("Estado: {}", status.label()));
        }
        if let Some(genre) = self.genre {
            parts.push(format!("Género: {}", genre.label()));
        }
        if let Some(platform) = &self.platform {
            parts.push(format!("Plataforma: {platform}"));
        }
        if let Some(min_rating) = self.min_rating {
            parts.push(format!("Calificación: {min_rating}+"));
        }
        if let Some(min_hours) = self.min_hours {
            parts.push(format!("Horas: {min_hours}+"));
        }

        return parts.join(" · ");
    }
}
