use super::utils;

use crate::{
    api::ApiError,
    models::ImageChange,
    prelude::*,
    views::{FormError, FormFields, GameForm, Notice},
};

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tracing::{debug, warn};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

const IMAGE_TOO_LARGE_MESSAGE: &str =
    "La imagen es demasiado grande. El tamaño máximo es de 10 MB.";
const FORM_UNREADABLE_MESSAGE: &str =
    "No se pudo leer el formulario enviado. Inténtalo de nuevo.";

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router
        .route("/games/new", get(new_game).post(create_game))
        .route("/games/:id/edit", get(edit_game).post(update_game))
        .route("/uploads/pending/:key", get(pending_image));
}

async fn new_game(State(state): State<AppState>) -> Result<Html<String>> {
    return Ok(Html(state.renderer.form_page(&GameForm::create())?));
}

async fn create_game(State(state): State<AppState>, multipart: Multipart) -> Result<Response> {
    let mut fields = FormFields::default();
    if let Err(err) = utils::read_form_fields(multipart, &mut fields).await {
        return unreadable_form(&state, GameForm::create(), fields, err);
    }

    return submit(&state, GameForm::create(), fields).await;
}

async fn edit_game(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Response> {
    let form = match GameForm::load(state.api.as_ref(), id).await {
        Ok(form) => form,
        Err(ApiError::NotFound) => {
            let href = utils::list_href(&state, Some(Notice::EntryMissing)).await;
            return Ok(Redirect::to(&href).into_response());
        }
        Err(err) => {
            warn!("could not load game entry {id} for editing: {err}");
            let html = state.renderer.error_page(&err.user_message(), "/games")?;
            return Ok((StatusCode::BAD_GATEWAY, Html(html)).into_response());
        }
    };

    return Ok(Html(state.renderer.form_page(&form)?).into_response());
}

async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Response> {
    let mut fields = FormFields::default();
    if let Err(err) = utils::read_form_fields(multipart, &mut fields).await {
        return unreadable_form(&state, GameForm::edit(id, None), fields, err);
    }

    return submit(&state, GameForm::edit(id, None), fields).await;
}

/// The body broke off before the end, usually at the upload limit. The text
/// that made it through is shown again and nothing is sent to the backend.
fn unreadable_form(
    state: &AppState,
    mut form: GameForm,
    fields: FormFields,
    err: MultipartError,
) -> Result<Response> {
    let status = match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    warn!("could not read submitted game form ({status}): {}", err.body_text());

    form.apply(FormFields {
        image: None,
        ..fields
    });
    form.error = Some(match status {
        StatusCode::PAYLOAD_TOO_LARGE => IMAGE_TOO_LARGE_MESSAGE.to_string(),
        _ => FORM_UNREADABLE_MESSAGE.to_string(),
    });

    return Ok((status, Html(state.renderer.form_page(&form)?)).into_response());
}

async fn submit(state: &AppState, mut form: GameForm, mut fields: FormFields) -> Result<Response> {
    resolve_pending_image(state, &mut fields).await;

    form.apply(fields);

    let err = match form.submit(state.api.as_ref()).await {
        Ok(_) => {
            if let Some(key) = form.pending_image.take() {
                state.uploads.lock().await.remove(&key);
            }
            return Ok(Redirect::to(&utils::list_href(state, None).await).into_response());
        }
        Err(err) => err,
    };

    if let FormError::Api(ApiError::NotFound) = err {
        let href = utils::list_href(state, Some(Notice::EntryMissing)).await;
        return Ok(Redirect::to(&href).into_response());
    }

    // Keep a freshly picked image around so the user doesn't have to pick it again.
    if form.pending_image.is_none() {
        if let ImageChange::Replace(upload) = &form.draft.image {
            if upload.is_image() {
                let key = state.uploads.lock().await.stash(upload.clone());
                debug!("keeping rejected image attachment as {key}");
                form.pending_image = Some(key);
            }
        }
    }

    let status = match err {
        FormError::Api(ApiError::Transport(_)) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };

    return Ok((status, Html(state.renderer.form_page(&form)?)).into_response());
}

/// A form re-rendered after a failed submission carries its attachment as a
/// key. A newly picked file supersedes it.
async fn resolve_pending_image(state: &AppState, fields: &mut FormFields) {
    let Some(key) = fields.pending_image.clone() else {
        return;
    };

    let mut uploads = state.uploads.lock().await;

    if fields.image.is_some() {
        uploads.remove(&key);
        fields.pending_image = None;
        return;
    }

    match uploads.get(&key) {
        Some(upload) => fields.image = Some(upload.clone()),
        None => {
            warn!("pending image {key} is gone, keeping the current image");
            fields.pending_image = None;
        }
    }
}

async fn pending_image(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let uploads = state.uploads.lock().await;

    let Some(upload) = uploads.get(&key) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let content_type = upload
        .content_type
        .clone()
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

    return ([(header::CONTENT_TYPE, content_type)], upload.bytes.clone()).into_response();
}
