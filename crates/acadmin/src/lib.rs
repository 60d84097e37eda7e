//! Administrative client for an academic-records API.
//!
//! Provides the data-access layer (a shared HTTP transport plus one generic
//! resource service per entity collection), client-side form validation, and
//! the framework-independent view-model state behind the list, create/edit,
//! and detail screens for subjects, instructors, rooms, and class sections.
//! Students and enrollments are exposed through the service layer only.
//!
//! All persistence is delegated to the remote API; the client holds no
//! durable state and every view re-fetches on mount.

pub mod error;
pub mod models;
pub mod routing;
pub mod services;
pub mod transport;
pub mod validate;
pub mod views;

pub use error::{ApiError, ErrorEnvelope};
pub use models::{ClassSection, Enrollment, Instructor, Room, Student, Subject};
pub use routing::{EntityKind, PageView, Route};
pub use services::{AdminApi, Resource, ResourceClient};
pub use transport::{ApiClient, ApiConfig};
pub use validate::{FieldErrors, Validate};
pub use views::{
    ClassSectionForm, DetailState, FormMode, FormState, ListState, Searchable, SubmitError,
    UiResource,
};

/// Installs a basic subscriber for binaries and test runs. Safe to call more
/// than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();
}
