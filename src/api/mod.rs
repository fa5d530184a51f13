mod client;
mod error;
pub mod payload;

#[cfg(test)]
pub mod testing;

pub use client::HttpGameApi;
pub use error::*;

use crate::models::{CollectionStats, FilterCriteria, GameDraft, GameEntry};

use async_trait::async_trait;

/// Typed calls against the game collection backend.
///
/// Implementations hold no cache: every call is one request and the backend
/// stays the source of truth.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Entries in backend order, narrowed by whichever filters are set.
    async fn list(&self, filters: &FilterCriteria) -> Result<Vec<GameEntry>, ApiError>;

    async fn get(&self, id: i64) -> Result<GameEntry, ApiError>;

    async fn create(&self, draft: &GameDraft) -> Result<GameEntry, ApiError>;

    /// Full replace: every field of `draft` is sent.
    async fn update(&self, id: i64, draft: &GameDraft) -> Result<GameEntry, ApiError>;

    async fn delete(&self, id: i64) -> Result<(), ApiError>;

    async fn list_platforms(&self) -> Result<Vec<String>, ApiError>;

    async fn list_genres(&self) -> Result<Vec<String>, ApiError>;

    async fn stats(&self) -> Result<CollectionStats, ApiError>;
}
