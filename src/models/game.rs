use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Longest description shown on an entry card before it gets cut.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 80;

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 10;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "sin iniciar")]
    NotStarted,
    #[serde(rename = "jugando")]
    Playing,
    #[serde(rename = "completado")]
    Completed,
    #[serde(rename = "abandonado")]
    Abandoned,
}

impl GameStatus {
    pub const ALL: [GameStatus; 4] = [
        GameStatus::NotStarted,
        GameStatus::Playing,
        GameStatus::Completed,
        GameStatus::Abandoned,
    ];

    pub fn as_str(&self) -> &'static str {
        return match self {
            GameStatus::NotStarted => "sin iniciar",
            GameStatus::Playing => "jugando",
            GameStatus::Completed => "completado",
            GameStatus::Abandoned => "abandonado",
        };
    }

    pub fn parse(value: &str) -> Option<Self> {
        return Self::ALL.into_iter().find(|s| s.as_str() == value.trim());
    }

    pub fn label(&self) -> &'static str {
        return match self {
            GameStatus::NotStarted => "Sin Iniciar",
            GameStatus::Playing => "Jugando",
            GameStatus::Completed => "Completado",
            GameStatus::Abandoned => "Abandonado",
        };
    }

    pub fn badge_tone(&self) -> &'static str {
        return match self {
            GameStatus::NotStarted => "secondary",
            GameStatus::Playing => "primary",
            GameStatus::Completed => "success",
            GameStatus::Abandoned => "danger",
        };
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Genre {
    #[default]
    #[serde(rename = "rpg")]
    Rpg,
    #[serde(rename = "accion")]
    Action,
    #[serde(rename = "aventura")]
    Adventure,
    #[serde(rename = "estrategia")]
    Strategy,
    #[serde(rename = "deportes")]
    Sports,
    #[serde(rename = "otros")]
    Other,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Rpg,
        Genre::Action,
        Genre::Adventure,
        Genre::Strategy,
        Genre::Sports,
        Genre::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        return match self {
            Genre::Rpg => "rpg",
            Genre::Action => "accion",
            Genre::Adventure => "aventura",
            Genre::Strategy => "estrategia",
            Genre::Sports => "deportes",
            Genre::Other => "otros",
        };
    }

    pub fn parse(value: &str) -> Option<Self> {
        return Self::ALL.into_iter().find(|g| g.as_str() == value.trim());
    }

    pub fn label(&self) -> &'static str {
        return match self {
            Genre::Rpg => "RPG",
            Genre::Action => "Acción",
            Genre::Adventure => "Aventura",
            Genre::Strategy => "Estrategia",
            Genre::Sports => "Deportes",
            Genre::Other => "Otros",
        };
    }

    pub fn badge_tone(&self) -> &'static str {
        return match self {
            Genre::Rpg => "info",
            Genre::Action => "warning",
            Genre::Adventure => "success",
            Genre::Strategy => "primary",
            Genre::Sports => "danger",
            Genre::Other => "secondary",
        };
    }
}

/// A tracked game as the backend returns it.
///
/// The list endpoint answers with a reduced shape, so every field the backend
/// may leave out falls back to its default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameEntry {
    pub id: i64,

    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "plataforma")]
    pub platform: String,

    #[serde(rename = "estado", default)]
    pub status: GameStatus,
    #[serde(rename = "genero", default)]
    pub genre: Genre,

    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "fecha_lanzamiento", default)]
    pub release_date: Option<NaiveDate>,
    #[serde(rename = "horas_jugadas", default)]
    pub hours_played: u32,
    #[serde(rename = "calificacion", default)]
    pub rating: Option<u8>,

    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "fecha_actualizacion", default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "estado_display", default)]
    pub status_display: Option<String>,
    #[serde(rename = "genero_display", default)]
    pub genre_display: Option<String>,
}

impl GameEntry {
    pub fn status_label(&self) -> &str {
        return match &self.status_display {
            Some(display) if !display.is_empty() => display,
            _ => self.status.label(),
        };
    }

    pub fn genre_label(&self) -> &str {
        return match &self.genre_display {
            Some(display) if !display.is_empty() => display,
            _ => self.genre.label(),
        };
    }

    pub fn description_preview(&self) -> Option<String> {
        let description = self.description.as_deref()?.trim();
        if description.is_empty() {
            return None;
        }

        return Some(truncate(description, DESCRIPTION_PREVIEW_CHARS));
    }

    pub fn hours_label(&self) -> String {
        return hours_played_label(self.hours_played);
    }
}

/// Cuts `text` to `max` characters, appending `...` when something was dropped.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(max).collect();
    cut.push_str("...");
    return cut;
}

pub fn hours_played_label(hours: u32) -> String {
    if hours == 1 {
        return "1 hora jugada".to_string();
    }

    return format!("{hours} horas jugadas");
}

/// Ten slots, the first `rating` of them filled.
pub fn rating_stars(rating: u8) -> Vec<bool> {
    return (0..RATING_MAX).map(|i| i < rating).collect();
}
