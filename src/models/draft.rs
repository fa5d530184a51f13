use super::{GameEntry, GameStatus, Genre, RATING_MAX, RATING_MIN};

use chrono::NaiveDate;
use thiserror::Error;

/// Mirrors the backend's own ceiling on played hours.
pub const HOURS_MAX: u32 = 9999;

/// An image picked in a form, held in memory until the form is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Sniffs the bytes to find the image format; unrecognized data keeps
    /// `content_type` empty and fails draft validation.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let content_type = image::guess_format(&bytes)
            .ok()
            .map(|format| format.to_mime_type().to_string());

        return Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        };
    }

    pub fn is_image(&self) -> bool {
        return self.content_type.is_some();
    }
}

/// What a submission should do with the entry's image.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageChange {
    /// Leave whatever the backend has.
    #[default]
    Keep,
    Replace(ImageUpload),
    Clear,
}

/// Client-side checks run before any submission reaches the network.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    #[error("El nombre del juego es obligatorio.")]
    NameRequired,
    #[error("La plataforma es obligatoria.")]
    PlatformRequired,
    #[error("Selecciona un estado válido.")]
    UnknownStatus,
    #[error("Selecciona un género válido.")]
    UnknownGenre,
    #[error("Las horas jugadas deben ser un número entero no negativo.")]
    HoursNotANumber,
    #[error("Las horas jugadas no pueden exceder 9999.")]
    HoursTooHigh,
    #[error("Un juego completado debe tener al menos 1 hora jugada.")]
    CompletedWithoutHours,
    #[error("La calificación debe estar entre 1 y 10.")]
    RatingOutOfRange,
    #[error("La fecha de lanzamiento no es válida.")]
    InvalidReleaseDate,
    #[error("El archivo seleccionado no es una imagen válida.")]
    ImageNotRecognized,
}

/// The user-edited, not yet submitted form of an entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameDraft {
    pub name: String,
    pub description: String,
    pub platform: String,
    pub status: GameStatus,
    pub genre: Genre,
    pub release_date: Option<NaiveDate>,
    pub hours_played: u32,
    pub rating: Option<u8>,
    pub image: ImageChange,
}

impl GameDraft {
    pub fn from_entry(entry: &GameEntry) -> Self {
        return Self {
            name: entry.name.clone(),
            description: entry.description.clone().unwrap_or_default(),
            platform: entry.platform.clone(),
            status: entry.status,
            genre: entry.genre,
            release_date: entry.release_date,
            hours_played: entry.hours_played,
            rating: entry.rating,
            image: ImageChange::Keep,
        };
    }

    /// Reports the first broken rule, in form order.
    pub fn validate(&self) -> Result<(), ValidationRule> {
        if self.name.trim().is_empty() {
            return Err(ValidationRule::NameRequired);
        }

        if self.platform.trim().is_empty() {
            return Err(ValidationRule::PlatformRequired);
        }

        if self.hours_played > HOURS_MAX {
            return Err(ValidationRule::HoursTooHigh);
        }

        if self.status == GameStatus::Completed && self.hours_played < 1 {
            return Err(ValidationRule::CompletedWithoutHours);
        }

        if let Some(rating) = self.rating {
            if !(RATING_MIN..=RATING_MAX).contains(&rating) {
                return Err(ValidationRule::RatingOutOfRange);
            }
        }

        if let ImageChange::Replace(upload) = &self.image {
            if !upload.is_image() {
                return Err(ValidationRule::ImageNotRecognized);
            }
        }

        return Ok(());
    }
}
