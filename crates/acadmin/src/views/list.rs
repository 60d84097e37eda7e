//! List screen state: load, filter, and the two-step delete flow.

use crate::error::ErrorEnvelope;
use crate::models::{ClassSection, Instructor, Room, Subject};
use crate::services::{Resource, ResourceClient};
use tracing::info;

/// Case-insensitive substring matching over an entity's display fields.
pub trait Searchable {
    /// `needle` is already lowercased by the caller.
    fn matches(&self, needle: &str) -> bool;
}

impl Searchable for Subject {
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

impl Searchable for Instructor {
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.registration_code.to_lowercase().contains(needle)
    }
}

impl Searchable for Room {
    fn matches(&self, needle: &str) -> bool {
        self.number.to_string().contains(needle) || self.capacity.to_string().contains(needle)
    }
}

impl Searchable for ClassSection {
    fn matches(&self, needle: &str) -> bool {
        self.section_code.to_lowercase().contains(needle)
            || self
                .subject
                .as_ref()
                .is_some_and(|s| s.name.to_lowercase().contains(needle))
            || self
                .instructor
                .as_ref()
                .is_some_and(|i| i.name.to_lowercase().contains(needle))
    }
}

/// Pure filtering over a collection: the empty term returns everything, any
/// other term keeps exactly the records whose display fields contain it,
/// case-insensitively.
pub fn filter_items<'a, E: Searchable>(items: &'a [E], term: &str) -> Vec<&'a E> {
    if term.is_empty() {
        return items.iter().collect();
    }
    let needle = term.to_lowercase();
    items.iter().filter(|item| item.matches(&needle)).collect()
}

/// State behind a list screen.
pub struct ListState<R> {
    items: Vec<R>,
    search_term: String,
    loading: bool,
    error: Option<ErrorEnvelope>,
    pending_delete: Option<i64>,
}

impl<R> Default for ListState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_term: String::new(),
            loading: true,
            error: None,
            pending_delete: None,
        }
    }
}

impl<R: Resource + Searchable> ListState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the full collection, replacing the current snapshot.
    pub async fn load(&mut self, service: &ResourceClient<R>) {
        self.loading = true;
        self.apply(service.get_all().await);
    }

    fn apply(&mut self, result: Result<Vec<R>, crate::error::ApiError>) {
        match result {
            Ok(items) => {
                info!(path = R::BASE_PATH, count = items.len(), "loaded list");
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.envelope());
            }
        }
        self.loading = false;
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// The derived filtered view over the current snapshot and search term.
    pub fn filtered(&self) -> Vec<&R> {
        filter_items(&self.items, &self.search_term)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ErrorEnvelope> {
        self.error.as_ref()
    }

    /// Arms the delete confirmation dialog for a row.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    /// Dismisses the confirmation dialog without deleting.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// Confirms the armed delete.
    ///
    /// On success the dialog closes and the full list is re-fetched (no
    /// optimistic removal). On failure the prior snapshot stays, the dialog
    /// stays armed, and the error is surfaced inline.
    pub async fn confirm_delete(&mut self, service: &ResourceClient<R>) {
        let Some(id) = self.pending_delete else {
            return;
        };
        match service.delete(id).await {
            Ok(()) => {
                self.pending_delete = None;
                self.load(service).await;
            }
            Err(e) => {
                self.error = Some(e.envelope());
            }
        }
    }
}

impl ListState<ClassSection> {
    /// Fetches the collection with relations resolved, so the table can show
    /// subject and instructor names.
    pub async fn load_with_relations(&mut self, service: &ResourceClient<ClassSection>) {
        self.loading = true;
        self.apply(service.get_all_with_relations().await);
    }

    /// Delete confirmation for the relations-backed list.
    pub async fn confirm_delete_with_relations(&mut self, service: &ResourceClient<ClassSection>) {
        let Some(id) = self.pending_delete else {
            return;
        };
        match service.delete(id).await {
            Ok(()) => {
                self.pending_delete = None;
                self.load_with_relations(service).await;
            }
            Err(e) => {
                self.error = Some(e.envelope());
            }
        }
    }
}
