//! Entity records exchanged with the academic-records API.
//!
//! All records are flat, identified by an optional numeric id that the remote
//! store assigns on creation and that is never produced client-side. The
//! `active` flag is a soft-delete marker, not a deletion. Wire format is
//! camelCase JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder rendered when an embedded relation snapshot is absent.
pub const MISSING_RELATION: &str = "N/A";

/// A course offering with a name and credit-hour load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub credit_hours: u32,
    pub active: bool,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            credit_hours: 0,
            active: true,
        }
    }
}

/// A teaching staff record with a registration code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub registration_code: String,
    pub active: bool,
}

impl Default for Instructor {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            registration_code: String::new(),
            active: true,
        }
    }
}

/// A physical space with a capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub number: u32,
    pub capacity: u32,
    pub active: bool,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            id: None,
            number: 0,
            capacity: 0,
            active: true,
        }
    }
}

/// A scheduled offering of a [`Subject`] taught by an [`Instructor`] in a
/// [`Room`] at a time slot.
///
/// The three foreign keys must reference existing records; the client only
/// requires a positive id and leaves referential integrity to the server.
/// The optional snapshots are populated when fetched "with relations".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub section_code: String,
    pub subject_id: i64,
    pub instructor_id: i64,
    pub room_id: i64,
    /// Hour of the day the section meets, 1 through 24.
    pub time_slot: u32,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<Instructor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
}

impl Default for ClassSection {
    fn default() -> Self {
        Self {
            id: None,
            section_code: String::new(),
            subject_id: 0,
            instructor_id: 0,
            room_id: 0,
            time_slot: 8,
            active: true,
            subject: None,
            instructor: None,
            room: None,
        }
    }
}

impl ClassSection {
    /// Name of the embedded subject, or the missing-relation placeholder.
    pub fn subject_name(&self) -> &str {
        self.subject
            .as_ref()
            .map_or(MISSING_RELATION, |s| s.name.as_str())
    }

    /// Name of the embedded instructor, or the missing-relation placeholder.
    pub fn instructor_name(&self) -> &str {
        self.instructor
            .as_ref()
            .map_or(MISSING_RELATION, |i| i.name.as_str())
    }

    /// Label for the embedded room, or the missing-relation placeholder.
    pub fn room_label(&self) -> String {
        self.room
            .as_ref()
            .map_or_else(|| MISSING_RELATION.to_string(), |r| format!("Room {}", r.number))
    }
}

/// A student record. Exposed through the service layer only; the view layer
/// intentionally has no student screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub registration_code: String,
    pub birth_date: NaiveDate,
    pub active: bool,
}

impl Default for Student {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            registration_code: String::new(),
            birth_date: NaiveDate::default(),
            active: true,
        }
    }
}

/// Join record tying a student to a class section. Service layer only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub class_section_id: i64,
    pub student_id: i64,
    pub active: bool,
}

impl Default for Enrollment {
    fn default() -> Self {
        Self {
            id: None,
            class_section_id: 0,
            student_id: 0,
            active: true,
        }
    }
}
