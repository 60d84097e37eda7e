//! Read-only detail screen state.

use super::UiResource;
use crate::error::ErrorEnvelope;
use crate::routing::Route;
use crate::services::ResourceClient;
use tracing::info;

/// The four render states of a detail screen. Every terminal state offers a
/// return-to-list action; `NotFound` is distinguished from other failures so
/// the screen can say the record is gone rather than that the fetch broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState<R> {
    Loading,
    Loaded(R),
    NotFound,
    Failed(ErrorEnvelope),
}

impl<R: UiResource> DetailState<R> {
    /// Fetches the record and resolves to a terminal state.
    pub async fn load(service: &ResourceClient<R>, id: i64) -> Self {
        match service.get_by_id(id).await {
            Ok(value) => {
                info!(path = R::BASE_PATH, id, "loaded detail");
                DetailState::Loaded(value)
            }
            Err(e) if e.is_not_found() => DetailState::NotFound,
            Err(e) => DetailState::Failed(e.envelope()),
        }
    }

    /// The return-to-list route, available from every state.
    pub fn list_route(&self) -> Route {
        Route::List(R::KIND)
    }

    /// The edit route, once the record is loaded and has an id.
    pub fn edit_route(&self) -> Option<Route> {
        match self {
            DetailState::Loaded(value) => value.id().map(|id| Route::Edit(R::KIND, id)),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&R> {
        match self {
            DetailState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading)
    }
}
