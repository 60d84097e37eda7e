//! Framework-independent view models for the list, form, and detail screens.
//!
//! Each view owns its own fetched snapshot; nothing is cached across
//! navigations, and every view re-fetches on mount.

mod detail;
mod form;
mod list;

pub use detail::DetailState;
pub use form::{ClassSectionForm, FormMode, FormState, SubmitError};
pub use list::{filter_items, ListState, Searchable};

use crate::models::{ClassSection, Instructor, Room, Subject};
use crate::routing::EntityKind;
use crate::services::Resource;
use crate::validate::Validate;

/// A resource with a full screen set: list, create/edit form, and detail.
pub trait UiResource: Resource + Validate + Searchable + Default {
    /// Routing entity this resource's screens live under.
    const KIND: EntityKind;
}

impl UiResource for Subject {
    const KIND: EntityKind = EntityKind::Subjects;
}

impl UiResource for Instructor {
    const KIND: EntityKind = EntityKind::Instructors;
}

impl UiResource for Room {
    const KIND: EntityKind = EntityKind::Rooms;
}

impl UiResource for ClassSection {
    const KIND: EntityKind = EntityKind::ClassSections;
}
