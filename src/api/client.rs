use super::{
    payload::{self, Submission},
    ApiError, GameApi, ValidationErrors,
};

use crate::models::{CollectionStats, FilterCriteria, GameDraft, GameEntry};

use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, info, warn};

/// The list endpoint may paginate; the client only takes the page it is given.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Page { results: Vec<GameEntry> },
    Plain(Vec<GameEntry>),
}

/// Create and update answer either with the entry or with `{message, data}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedBody {
    Wrapped { data: GameEntry },
    Plain(GameEntry),
}

/// [`GameApi`] over HTTP against the `/api/games/` collection.
#[derive(Debug, Clone)]
pub struct HttpGameApi {
    http: reqwest::Client,
    base: Url,
}

impl HttpGameApi {
    /// `base` is the collection URL; a missing trailing slash is added.
    pub fn new(http: reqwest::Client, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        return Self { http, base };
    }

    pub fn base_url(&self) -> &Url {
        return &self.base;
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        return self
            .base
            .join(path)
            .map_err(|e| ApiError::Transport(format!("bad url {path}: {e}")));
    }

    fn entry_url(&self, id: i64) -> Result<Url, ApiError> {
        return self.url(&format!("{id}/"));
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        return decode(response).await;
    }
}

async fn read_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }

    let body = response.text().await?;

    // Transient answers, not a rejected payload.
    if matches!(status, StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS) {
        return Err(ApiError::Transport(format!("backend answered {status}")));
    }

    if status.is_client_error() {
        let errors = ValidationErrors::from_body(&body);
        warn!("backend rejected request ({status}): {errors}");
        return Err(ApiError::Validation(errors));
    }

    if !status.is_success() {
        return Err(ApiError::Transport(format!("backend answered {status}")));
    }

    return Ok(body);
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = read_body(response).await?;

    return serde_json::from_str(&body)
        .map_err(|e| ApiError::Transport(format!("malformed response: {e}")));
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn list(&self, filters: &FilterCriteria) -> Result<Vec<GameEntry>, ApiError> {
        let pairs = filters.query_pairs();
        debug!("GET {} with {} filter(s)", self.base, pairs.len());

        let mut request = self.http.get(self.base.clone());
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }

        let body: ListBody = decode(request.send().await?).await?;

        return Ok(match body {
            ListBody::Page { results } => results,
            ListBody::Plain(entries) => entries,
        });
    }

    async fn get(&self, id: i64) -> Result<GameEntry, ApiError> {
        return self.get_json(self.entry_url(id)?).await;
    }

    async fn create(&self, draft: &GameDraft) -> Result<GameEntry, ApiError> {
        let form = payload::multipart_form(draft, Submission::Create)?;

        info!("creating game entry {:?}", draft.name.trim());
        let response = self
            .http
            .post(self.base.clone())
            .multipart(form)
            .send()
            .await?;

        let body: SavedBody = decode(response).await?;
        return Ok(body.into_entry());
    }

    async fn update(&self, id: i64, draft: &GameDraft) -> Result<GameEntry, ApiError> {
        let form = payload::multipart_form(draft, Submission::Update)?;

        info!("updating game entry {id}");
        let response = self
            .http
            .put(self.entry_url(id)?)
            .multipart(form)
            .send()
            .await?;

        let body: SavedBody = decode(response).await?;
        return Ok(body.into_entry());
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        info!("deleting game entry {id}");
        let response = self.http.delete(self.entry_url(id)?).send().await?;

        read_body(response).await?;
        return Ok(());
    }

    async fn list_platforms(&self) -> Result<Vec<String>, ApiError> {
        return self.get_json(self.url("plataformas/")?).await;
    }

    async fn list_genres(&self) -> Result<Vec<String>, ApiError> {
        return self.get_json(self.url("generos/")?).await;
    }

    async fn stats(&self) -> Result<CollectionStats, ApiError> {
        return self.get_json(self.url("estadisticas/")?).await;
    }
}

impl SavedBody {
    fn into_entry(self) -> GameEntry {
        return match self {
            SavedBody::Wrapped { data } => data,
            SavedBody::Plain(entry) => entry,
        };
    }
}
