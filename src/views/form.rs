use crate::{
    api::{ApiError, GameApi},
    models::{GameDraft, GameEntry, GameStatus, Genre, ImageChange, ImageUpload, ValidationRule},
};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum FormError {
    /// Caught before any request was made.
    #[error("{0}")]
    Invalid(ValidationRule),

    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit {
        id: i64,
        /// Image the backend currently holds for the entry.
        image_url: Option<String>,
    },
}

/// Raw values of a submitted create or edit form.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pub name: String,
    pub description: String,
    pub platform: String,
    pub status: String,
    pub genre: String,
    pub hours_played: String,
    pub release_date: String,
    pub rating: String,
    pub image: Option<ImageUpload>,
    pub clear_image: bool,
    /// Key of an attachment kept from an earlier, rejected submission.
    pub pending_image: Option<String>,
    pub current_image_url: Option<String>,
}

/// Number and date inputs that didn't parse, kept as typed.
#[derive(Debug, Clone, Default, PartialEq)]
struct Unparsed {
    hours_played: Option<String>,
    rating: Option<String>,
    release_date: Option<String>,
}

/// Local state of the create and edit forms.
#[derive(Debug, Clone, PartialEq)]
pub struct GameForm {
    pub mode: FormMode,
    pub draft: GameDraft,
    pub pending_image: Option<String>,
    pub error: Option<String>,
    problem: Option<ValidationRule>,
    unparsed: Unparsed,
}

impl GameForm {
    pub fn create() -> Self {
        return Self {
            mode: FormMode::Create,
            draft: GameDraft::default(),
            pending_image: None,
            error: None,
            problem: None,
            unparsed: Unparsed::default(),
        };
    }

    pub fn edit(id: i64, image_url: Option<String>) -> Self {
        return Self {
            mode: FormMode::Edit { id, image_url },
            ..Self::create()
        };
    }

    pub fn from_entry(entry: &GameEntry) -> Self {
        return Self {
            draft: GameDraft::from_entry(entry),
            ..Self::edit(entry.id, entry.image_url.clone())
        };
    }

    /// Initializes an edit form from the backend. Any failure is terminal for
    /// the form: there is no partially filled fallback.
    pub async fn load(api: &dyn GameApi, id: i64) -> Result<Self, ApiError> {
        let entry = api.get(id).await?;
        return Ok(Self::from_entry(&entry));
    }

    pub fn is_edit(&self) -> bool {
        return matches!(self.mode, FormMode::Edit { .. });
    }

    pub fn current_image_url(&self) -> Option<&str> {
        return match &self.mode {
            FormMode::Edit { image_url, .. } => image_url.as_deref(),
            FormMode::Create => None,
        };
    }

    /// Text for the hours input: what the user typed if it didn't parse.
    pub fn hours_input(&self) -> String {
        if let Some(text) = &self.unparsed.hours_played {
            return text.clone();
        }

        return self.draft.hours_played.to_string();
    }

    pub fn rating_input(&self) -> String {
        if let Some(text) = &self.unparsed.rating {
            return text.clone();
        }

        return self.draft.rating.map(|r| r.to_string()).unwrap_or_default();
    }

    pub fn release_date_input(&self) -> String {
        if let Some(text) = &self.unparsed.release_date {
            return text.clone();
        }

        return self
            .draft
            .release_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
    }

    /// Copies submitted values into the draft. Values that don't parse are
    /// remembered and reported by the next [`GameForm::check`].
    pub fn apply(&mut self, fields: FormFields) {
        self.problem = None;
        self.unparsed = Unparsed::default();

        self.draft.name = fields.name;
        self.draft.description = fields.description;
        self.draft.platform = fields.platform;

        match GameStatus::parse(&fields.status) {
            Some(status) => self.draft.status = status,
            None => self.note(ValidationRule::UnknownStatus),
        }
        match Genre::parse(&fields.genre) {
            Some(genre) => self.draft.genre = genre,
            None => self.note(ValidationRule::UnknownGenre),
        }

        let hours = fields.hours_played.trim();
        if hours.is_empty() {
            self.draft.hours_played = 0;
        } else {
            match hours.parse::<u32>() {
                Ok(hours) => self.draft.hours_played = hours,
                Err(_) => {
                    self.unparsed.hours_played = Some(hours.to_string());
                    self.note(ValidationRule::HoursNotANumber);
                }
            }
        }

        let rating = fields.rating.trim();
        if rating.is_empty() {
            self.draft.rating = None;
        } else {
            match rating.parse::<u8>() {
                Ok(rating) => self.draft.rating = Some(rating),
                Err(_) => {
                    self.unparsed.rating = Some(rating.to_string());
                    self.note(ValidationRule::RatingOutOfRange);
                }
            }
        }

        let release_date = fields.release_date.trim();
        if release_date.is_empty() {
            self.draft.release_date = None;
        } else {
            match NaiveDate::parse_from_str(release_date, "%Y-%m-%d") {
                Ok(date) => self.draft.release_date = Some(date),
                Err(_) => {
                    self.unparsed.release_date = Some(release_date.to_string());
                    self.note(ValidationRule::InvalidReleaseDate);
                }
            }
        }

        if let FormMode::Edit { image_url, .. } = &mut self.mode {
            *image_url = fields.current_image_url;
        }

        self.pending_image = fields.pending_image;
        self.draft.image = match (fields.image, fields.clear_image) {
            (Some(upload), _) => ImageChange::Replace(upload),
            (None, true) => ImageChange::Clear,
            (None, false) => ImageChange::Keep,
        };
    }

    fn note(&mut self, rule: ValidationRule) {
        if self.problem.is_none() {
            self.problem = Some(rule);
        }
    }

    /// First problem found, parse errors before draft rules.
    pub fn check(&self) -> Result<(), ValidationRule> {
        if let Some(rule) = self.problem {
            return Err(rule);
        }

        return self.draft.validate();
    }

    /// Validates, then creates or updates. On failure the draft is kept as it
    /// is and the message to show is stored in `error`.
    pub async fn submit(&mut self, api: &dyn GameApi) -> Result<GameEntry, FormError> {
        let outcome = self.send(api).await;

        match &outcome {
            Ok(entry) => {
                info!("saved game entry {}", entry.id);
                self.error = None;
            }
            Err(err) => {
                warn!("game form not saved: {err}");
                self.error = Some(err.to_string());
            }
        }

        return outcome;
    }

    async fn send(&self, api: &dyn GameApi) -> Result<GameEntry, FormError> {
        self.check().map_err(FormError::Invalid)?;

        let entry = match &self.mode {
            FormMode::Create => api.create(&self.draft).await?,
            FormMode::Edit { id, .. } => api.update(*id, &self.draft).await?,
        };

        return Ok(entry);
    }
}
