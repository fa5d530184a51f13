use super::{ApiError, GameApi};

use crate::models::{
    CollectionStats, FilterCriteria, GameDraft, GameEntry, GameStatus, ImageChange,
};

use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use tokio::sync::{oneshot, Mutex};

type Gate = (oneshot::Receiver<()>, Vec<GameEntry>);

/// In-memory backend for view tests. Counts every call so tests can assert
/// that nothing reached the network.
#[derive(Default)]
pub struct StubApi {
    entries: Mutex<Vec<GameEntry>>,
    gates: Mutex<HashMap<String, Gate>>,
    list_calls: AtomicUsize,
    calls: AtomicUsize,
    offline: AtomicBool,
    options_offline: AtomicBool,
}

impl StubApi {
    pub fn entry(id: i64, name: &str, platform: &str) -> GameEntry {
        return GameEntry {
            id,
            name: name.to_string(),
            description: None,
            platform: platform.to_string(),
            status: GameStatus::NotStarted,
            genre: Default::default(),
            image_url: None,
            release_date: None,
            hours_played: 0,
            rating: None,
            created_at: None,
            updated_at: None,
            status_display: None,
            genre_display: None,
        };
    }

    pub async fn insert(&self, entry: GameEntry) {
        self.entries.lock().await.push(entry);
    }

    /// Makes a list call searching for `search` wait until `gate` fires, then
    /// answer with `entries`.
    pub async fn gate_list(
        &self,
        search: &str,
        gate: oneshot::Receiver<()>,
        entries: Vec<GameEntry>,
    ) {
        self.gates
            .lock()
            .await
            .insert(search.to_string(), (gate, entries));
    }

    pub async fn wait_for_list_calls(&self, n: usize) {
        while self.list_calls.load(Ordering::SeqCst) < n {
            tokio::task::yield_now().await;
        }
    }

    pub fn calls(&self) -> usize {
        return self.calls.load(Ordering::SeqCst);
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn options_offline(&self) {
        self.options_offline.store(true, Ordering::SeqCst);
    }

    fn call(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".to_string()));
        }

        return Ok(());
    }

    fn apply(entry: &mut GameEntry, draft: &GameDraft) {
        entry.name = draft.name.trim().to_string();
        entry.description = Some(draft.description.clone());
        entry.platform = draft.platform.trim().to_string();
        entry.status = draft.status;
        entry.genre = draft.genre;
        entry.release_date = draft.release_date;
        entry.hours_played = draft.hours_played;
        entry.rating = draft.rating;
        match &draft.image {
            ImageChange::Keep => {}
            ImageChange::Clear => entry.image_url = None,
            ImageChange::Replace(upload) => {
                entry.image_url = Some(format!("/media/{}", upload.file_name))
            }
        }
    }
}

#[async_trait]
impl GameApi for StubApi {
    async fn list(&self, filters: &FilterCriteria) -> Result<Vec<GameEntry>, ApiError> {
        self.call()?;
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let gate = match &filters.search {
            Some(search) => self.gates.lock().await.remove(search),
            None => None,
        };
        if let Some((gate, entries)) = gate {
            let _ = gate.await;
            return Ok(entries);
        }

        let entries = self.entries.lock().await;
        return Ok(entries
            .iter()
            .filter(|e| filters.status.map_or(true, |s| e.status == s))
            .filter(|e| {
                filters
                    .search
                    .as_ref()
                    .map_or(true, |s| e.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .cloned()
            .collect());
    }

    async fn get(&self, id: i64) -> Result<GameEntry, ApiError> {
        self.call()?;
        let entries = self.entries.lock().await;
        return entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ApiError::NotFound);
    }

    async fn create(&self, draft: &GameDraft) -> Result<GameEntry, ApiError> {
        self.call()?;
        let mut entries = self.entries.lock().await;
        let id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;

        let mut entry = Self::entry(id, "", "");
        Self::apply(&mut entry, draft);
        entries.push(entry.clone());

        return Ok(entry);
    }

    async fn update(&self, id: i64, draft: &GameDraft) -> Result<GameEntry, ApiError> {
        self.call()?;
        let mut entries = self.entries.lock().await;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ApiError::NotFound)?;

        Self::apply(entry, draft);
        return Ok(entry.clone());
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.call()?;
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(ApiError::NotFound);
        }

        return Ok(());
    }

    async fn list_platforms(&self) -> Result<Vec<String>, ApiError> {
        self.call()?;
        if self.options_offline.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("timed out".to_string()));
        }

        let mut platforms: Vec<String> = self
            .entries
            .lock()
            .await
            .iter()
            .map(|e| e.platform.clone())
            .collect();
        platforms.sort();
        platforms.dedup();
        return Ok(platforms);
    }

    async fn list_genres(&self) -> Result<Vec<String>, ApiError> {
        self.call()?;
        if self.options_offline.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("timed out".to_string()));
        }

        let mut genres: Vec<String> = self
            .entries
            .lock()
            .await
            .iter()
            .map(|e| e.genre.as_str().to_string())
            .collect();
        genres.sort();
        genres.dedup();
        return Ok(genres);
    }

    async fn stats(&self) -> Result<CollectionStats, ApiError> {
        self.call()?;
        let entries = self.entries.lock().await;
        let count = |status: GameStatus| entries.iter().filter(|e| e.status == status).count() as u64;

        return Ok(CollectionStats {
            total: entries.len() as u64,
            completed: count(GameStatus::Completed),
            playing: count(GameStatus::Playing),
            not_started: count(GameStatus::NotStarted),
            abandoned: count(GameStatus::Abandoned),
            total_hours: entries.iter().map(|e| e.hours_played as u64).sum(),
            average_rating: 0.0,
        });
    }
}
