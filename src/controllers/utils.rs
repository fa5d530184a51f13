use crate::{
    api::payload::IMAGE_FIELD,
    models::{FilterCriteria, ImageUpload},
    prelude::*,
    views::{FormFields, Notice},
};

use axum::extract::{multipart::MultipartError, Multipart};
use tracing::debug;

/// Back to the list the user was last looking at.
pub async fn list_href(state: &AppState, notice: Option<Notice>) -> String {
    let criteria = state.list.lock().await.criteria().clone();
    return href_with_notice(&criteria, notice);
}

pub fn href_with_notice(criteria: &FilterCriteria, notice: Option<Notice>) -> String {
    let Some(notice) = notice else {
        return criteria.list_href();
    };

    let separator = if criteria.is_empty() { "?" } else { "&" };
    return format!("{}{separator}notice={}", criteria.list_href(), notice.as_param());
}

/// Collects the create/edit form. A file input left empty arrives as a part
/// with no bytes and counts as no new image. On error `fields` keeps the
/// parts read before the body broke off.
pub async fn read_form_fields(
    mut multipart: Multipart,
    fields: &mut FormFields,
) -> Result<(), MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            if !bytes.is_empty() {
                fields.image = Some(ImageUpload::new(file_name, bytes.to_vec()));
            }
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "nombre" => fields.name = value,
            "descripcion" => fields.description = value,
            "plataforma" => fields.platform = value,
            "estado" => fields.status = value,
            "genero" => fields.genre = value,
            "horas_jugadas" => fields.hours_played = value,
            "fecha_lanzamiento" => fields.release_date = value,
            "calificacion" => fields.rating = value,
            "quitar_imagen" => fields.clear_image = !value.is_empty(),
            "imagen_pendiente" => fields.pending_image = non_empty(value),
            "imagen_url" => fields.current_image_url = non_empty(value),
            _ => debug!("ignoring unknown form field {name}"),
        }
    }

    return Ok(());
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }

    return Some(value);
}
