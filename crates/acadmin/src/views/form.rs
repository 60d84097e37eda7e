//! Create/edit form state.
//!
//! Mode is derived from the presence of a route id: no id means create with
//! the entity's zero-value defaults, an id means edit seeded from a fetch.
//! Validation runs before submission; an invalid form never issues a network
//! call.

use super::UiResource;
use crate::error::{ApiError, ErrorEnvelope};
use crate::models::{ClassSection, Instructor, Room, Subject};
use crate::routing::Route;
use crate::services::{AdminApi, ResourceClient};
use crate::validate::FieldErrors;
use thiserror::Error;
use tracing::info;

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    /// Derives the mode from the route's optional id.
    pub fn from_route_id(id: Option<i64>) -> Self {
        match id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }
}

/// Why a submission did not navigate away.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Client-side validation failed; no request was made.
    #[error("validation failed: {0}")]
    Invalid(FieldErrors),

    /// The server rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// State behind a create/edit screen for one entity.
pub struct FormState<R: UiResource> {
    mode: FormMode,
    value: R,
    field_errors: FieldErrors,
    error: Option<ErrorEnvelope>,
    loading: bool,
}

impl<R: UiResource> FormState<R> {
    /// Create mode, seeded with the entity's defaults.
    pub fn create() -> Self {
        Self::for_route_id(None)
    }

    /// Edit mode for the given record.
    pub fn edit(id: i64) -> Self {
        Self::for_route_id(Some(id))
    }

    /// Mode derived from the route id, as the page router supplies it.
    pub fn for_route_id(id: Option<i64>) -> Self {
        let mode = FormMode::from_route_id(id);
        Self {
            mode,
            value: R::default(),
            field_errors: FieldErrors::default(),
            error: None,
            loading: matches!(mode, FormMode::Edit(_)),
        }
    }

    /// Fetches the target record in edit mode and seeds the form with it.
    /// A no-op in create mode.
    pub async fn load(&mut self, service: &ResourceClient<R>) -> Result<(), ApiError> {
        if let FormMode::Edit(id) = self.mode {
            match service.get_by_id(id).await {
                Ok(value) => {
                    self.value = value;
                    self.error = None;
                }
                Err(e) => {
                    self.error = Some(e.envelope());
                    self.loading = false;
                    return Err(e);
                }
            }
        }
        self.loading = false;
        Ok(())
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn value(&self) -> &R {
        &self.value
    }

    /// Mutable access for field edits.
    pub fn value_mut(&mut self) -> &mut R {
        &mut self.value
    }

    /// Re-seeds the form, e.g. when the fetched record changes.
    pub fn set_value(&mut self, value: R) {
        self.value = value;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Per-field messages from the last failed validation.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Inline error from the last failed submission or load.
    pub fn error(&self) -> Option<&ErrorEnvelope> {
        self.error.as_ref()
    }

    /// Validates and submits the form.
    ///
    /// Invalid fields block submission with per-field messages and no network
    /// call. On success the saved record re-seeds the form and the entity's
    /// list route is returned for navigation; on failure the form stays with
    /// an inline error.
    pub async fn submit(&mut self, service: &ResourceClient<R>) -> Result<Route, SubmitError> {
        if let Err(errors) = self.value.validate() {
            self.field_errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }
        self.field_errors = FieldErrors::default();

        let result = match self.mode {
            FormMode::Create => service.create(&self.value).await,
            FormMode::Edit(id) => service.update(id, &self.value).await,
        };
        match result {
            Ok(saved) => {
                info!(path = R::BASE_PATH, "form saved");
                self.value = saved;
                self.error = None;
                Ok(Route::List(R::KIND))
            }
            Err(e) => {
                self.error = Some(e.envelope());
                Err(e.into())
            }
        }
    }
}

/// The class-section form, which needs the three reference collections
/// before it can render its selectors.
pub struct ClassSectionForm {
    form: FormState<ClassSection>,
    subjects: Vec<Subject>,
    instructors: Vec<Instructor>,
    rooms: Vec<Room>,
}

impl ClassSectionForm {
    pub fn for_route_id(id: Option<i64>) -> Self {
        Self {
            form: FormState::for_route_id(id),
            subjects: Vec::new(),
            instructors: Vec::new(),
            rooms: Vec::new(),
        }
    }

    /// Loads subjects, instructors, and rooms concurrently, then (in edit
    /// mode) fetches the target record and seeds the form.
    pub async fn load(&mut self, api: &AdminApi) -> Result<(), ApiError> {
        let loaded = tokio::try_join!(
            api.subjects.get_all(),
            api.instructors.get_all(),
            api.rooms.get_all(),
        );
        match loaded {
            Ok((subjects, instructors, rooms)) => {
                self.subjects = subjects;
                self.instructors = instructors;
                self.rooms = rooms;
            }
            Err(e) => {
                self.form.error = Some(e.envelope());
                self.form.loading = false;
                return Err(e);
            }
        }
        self.form.load(&api.class_sections).await
    }

    pub fn form(&self) -> &FormState<ClassSection> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<ClassSection> {
        &mut self.form
    }

    /// True while any reference collection is empty, which disables the
    /// selectors and the submit action.
    pub fn missing_references(&self) -> bool {
        self.subjects.is_empty() || self.instructors.is_empty() || self.rooms.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.missing_references()
    }

    /// Warning shown while references are missing.
    pub fn reference_warning(&self) -> Option<&'static str> {
        self.missing_references().then_some(
            "creating a class section requires registered subjects, instructors, and rooms",
        )
    }

    /// Selector options as (id, human-readable label).
    pub fn subject_options(&self) -> Vec<(i64, String)> {
        self.subjects
            .iter()
            .filter_map(|s| Some((s.id?, format!("{} ({}h)", s.name, s.credit_hours))))
            .collect()
    }

    pub fn instructor_options(&self) -> Vec<(i64, String)> {
        self.instructors
            .iter()
            .filter_map(|i| Some((i.id?, format!("{} ({})", i.name, i.registration_code))))
            .collect()
    }

    pub fn room_options(&self) -> Vec<(i64, String)> {
        self.rooms
            .iter()
            .filter_map(|r| Some((r.id?, format!("Room {} (capacity: {})", r.number, r.capacity))))
            .collect()
    }

    /// Submits the inner form, refusing while references are missing.
    pub async fn submit(&mut self, api: &AdminApi) -> Result<Route, SubmitError> {
        if self.missing_references() {
            let mut errors = FieldErrors::default();
            errors.push(
                "references",
                self.reference_warning().unwrap_or_default(),
            );
            return Err(SubmitError::Invalid(errors));
        }
        self.form.submit(&api.class_sections).await
    }
}
