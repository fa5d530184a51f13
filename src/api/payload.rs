use super::ApiError;

use crate::models::{GameDraft, ImageChange, ImageUpload};

use reqwest::multipart::{Form, Part};

pub const IMAGE_FIELD: &str = "imagen";

/// How the `imagen` field appears in a submitted payload.
#[derive(Debug, PartialEq)]
pub enum ImagePart<'a> {
    /// Field left out, the backend keeps the current image.
    Omit,
    /// Field sent empty, the backend drops the current image.
    Clear,
    Attach(&'a ImageUpload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Create,
    Update,
}

/// Every text field of the draft, numbers as their decimal form and unset
/// optionals as empty strings so an update fully replaces the entry.
pub fn text_fields(draft: &GameDraft) -> Vec<(&'static str, String)> {
    return vec![
        ("nombre", draft.name.trim().to_string()),
        ("descripcion", draft.description.clone()),
        ("plataforma", draft.platform.trim().to_string()),
        ("estado", draft.status.as_str().to_string()),
        ("genero", draft.genre.as_str().to_string()),
        ("horas_jugadas", draft.hours_played.to_string()),
        (
            "fecha_lanzamiento",
            draft
                .release_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ),
        (
            "calificacion",
            draft.rating.map(|r| r.to_string()).unwrap_or_default(),
        ),
    ];
}

pub fn image_part(image: &ImageChange, submission: Submission) -> ImagePart<'_> {
    return match (image, submission) {
        (ImageChange::Replace(upload), _) => ImagePart::Attach(upload),
        (ImageChange::Clear, Submission::Update) => ImagePart::Clear,
        (ImageChange::Clear, Submission::Create) | (ImageChange::Keep, _) => ImagePart::Omit,
    };
}

pub fn multipart_form(draft: &GameDraft, submission: Submission) -> Result<Form, ApiError> {
    let mut form = Form::new();

    for (name, value) in text_fields(draft) {
        form = form.text(name, value);
    }

    form = match image_part(&draft.image, submission) {
        ImagePart::Omit => form,
        ImagePart::Clear => form.text(IMAGE_FIELD, ""),
        ImagePart::Attach(upload) => {
            let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
            if let Some(content_type) = &upload.content_type {
                part = part
                    .mime_str(content_type)
                    .map_err(|e| ApiError::Transport(format!("invalid image type: {e}")))?;
            }

            form.part(IMAGE_FIELD, part)
        }
    };

    return Ok(form);
}
