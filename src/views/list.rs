use crate::{
    api::{ApiError, GameApi, NOT_FOUND_MESSAGE},
    models::{FilterCriteria, GameEntry},
};

use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Ready(Vec<GameEntry>),
    /// Carries the user-facing message; the retry affordance re-runs the same fetch.
    Failed(String),
}

/// One-off message shown above the list after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EntryMissing,
    DeleteFailed,
}

impl Notice {
    pub fn parse(value: &str) -> Option<Self> {
        return match value {
            "missing" => Some(Notice::EntryMissing),
            "delete-failed" => Some(Notice::DeleteFailed),
            _ => None,
        };
    }

    pub fn as_param(&self) -> &'static str {
        return match self {
            Notice::EntryMissing => "missing",
            Notice::DeleteFailed => "delete-failed",
        };
    }

    pub fn message(&self) -> &'static str {
        return match self {
            Notice::EntryMissing => NOT_FOUND_MESSAGE,
            Notice::DeleteFailed => "No se pudo eliminar el juego. Inténtalo de nuevo.",
        };
    }
}

/// Handed out when a fetch starts and given back when it finishes.
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    pub criteria: FilterCriteria,
}

/// The list view's state machine: `Loading -> Ready | Failed`.
///
/// Only the most recently started fetch may settle the state, so a slow
/// response for old filters never overwrites a newer one.
#[derive(Debug)]
pub struct ListView {
    generation: u64,
    criteria: FilterCriteria,
    state: ListState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub criteria: FilterCriteria,
    pub state: ListState,
}

impl ListSnapshot {
    pub fn entries(&self) -> &[GameEntry] {
        return match &self.state {
            ListState::Ready(entries) => entries,
            _ => &[],
        };
    }

    /// Ready with nothing to show, which renders a placeholder rather than an error.
    pub fn is_empty_collection(&self) -> bool {
        return matches!(&self.state, ListState::Ready(entries) if entries.is_empty());
    }

    pub fn retry_href(&self) -> String {
        return self.criteria.list_href();
    }
}

impl Default for ListView {
    fn default() -> Self {
        return Self::new();
    }
}

impl ListView {
    pub fn new() -> Self {
        return Self {
            generation: 0,
            criteria: FilterCriteria::default(),
            state: ListState::Loading,
        };
    }

    pub fn state(&self) -> &ListState {
        return &self.state;
    }

    pub fn criteria(&self) -> &FilterCriteria {
        return &self.criteria;
    }

    pub fn begin(&mut self, criteria: FilterCriteria) -> FetchTicket {
        self.generation += 1;
        self.criteria = criteria.clone();
        self.state = ListState::Loading;

        return FetchTicket {
            generation: self.generation,
            criteria,
        };
    }

    /// Settles the fetch behind `ticket`. Returns `false` when a newer fetch
    /// has started since, in which case the outcome is dropped.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<GameEntry>, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "dropping stale list response (generation {} < {})",
                ticket.generation, self.generation
            );
            return false;
        }

        self.state = match outcome {
            Ok(entries) => ListState::Ready(entries),
            Err(err) => {
                warn!("list fetch failed: {err}");
                ListState::Failed(err.user_message())
            }
        };

        return true;
    }

    pub fn snapshot(&self) -> ListSnapshot {
        return ListSnapshot {
            criteria: self.criteria.clone(),
            state: self.state.clone(),
        };
    }
}

/// Runs one list fetch through the shared view and returns the state it
/// settled on. The lock is released while the request is in flight.
///
/// A response that arrives after a newer fetch has started is dropped, and
/// the caller gets the view as the newer fetch left it: its filters and
/// entries, or `Loading` while that fetch is still in flight. Every page
/// rendered from here therefore shows the latest requested filters.
pub async fn refresh(
    list: &Mutex<ListView>,
    api: &dyn GameApi,
    criteria: FilterCriteria,
) -> ListSnapshot {
    let ticket = list.lock().await.begin(criteria);

    let outcome = api.list(&ticket.criteria).await;

    let mut list = list.lock().await;
    list.complete(ticket, outcome);

    return list.snapshot();
}

/// Deletes an entry. An entry that is already gone counts as deleted.
pub async fn delete_entry(api: &dyn GameApi, id: i64) -> Result<(), ApiError> {
    return match api.delete(id).await {
        Ok(()) => Ok(()),
        Err(ApiError::NotFound) => {
            warn!("game entry {id} was already gone");
            Ok(())
        }
        Err(err) => Err(err),
    };
}
