//! Client-side form validation.
//!
//! Rules run before submission; invalid fields block the network call
//! entirely. Field errors use the same field -> messages shape as the
//! server's error envelope, keyed by the wire field name.

use crate::models::{ClassSection, Instructor, Room, Subject};
use std::collections::BTreeMap;
use std::fmt;

/// Per-field validation messages, keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages for one field, empty when the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Accumulates rule checks for one form submission.
#[derive(Debug, Default)]
pub struct Rules {
    errors: FieldErrors,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required, non-blank string with a length ceiling.
    pub fn text(mut self, field: &str, label: &str, value: &str, max_len: usize) -> Self {
        if value.trim().is_empty() {
            self.errors.push(field, format!("{label} is required"));
        } else if value.chars().count() > max_len {
            self.errors
                .push(field, format!("{label} must be at most {max_len} characters"));
        }
        self
    }

    /// Strictly positive integer.
    pub fn positive(mut self, field: &str, label: &str, value: u32) -> Self {
        if value == 0 {
            self.errors
                .push(field, format!("{label} must be a positive integer"));
        }
        self
    }

    /// Integer within an inclusive range.
    pub fn range(mut self, field: &str, label: &str, value: u32, min: u32, max: u32) -> Self {
        if value < min || value > max {
            self.errors
                .push(field, format!("{label} must be between {min} and {max}"));
        }
        self
    }

    /// Foreign-key selector: a positive id means something was chosen.
    pub fn reference(mut self, field: &str, label: &str, id: i64) -> Self {
        if id <= 0 {
            self.errors.push(field, format!("select a valid {label}"));
        }
        self
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// An entity with client-side form validation rules.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

impl Validate for Subject {
    fn validate(&self) -> Result<(), FieldErrors> {
        Rules::new()
            .text("name", "name", &self.name, 200)
            .positive("creditHours", "credit hours", self.credit_hours)
            .finish()
    }
}

impl Validate for Instructor {
    fn validate(&self) -> Result<(), FieldErrors> {
        Rules::new()
            .text("name", "name", &self.name, 200)
            .text(
                "registrationCode",
                "registration code",
                &self.registration_code,
                30,
            )
            .finish()
    }
}

impl Validate for Room {
    fn validate(&self) -> Result<(), FieldErrors> {
        Rules::new()
            .positive("number", "room number", self.number)
            .positive("capacity", "capacity", self.capacity)
            .finish()
    }
}

impl Validate for ClassSection {
    fn validate(&self) -> Result<(), FieldErrors> {
        Rules::new()
            .text("sectionCode", "section code", &self.section_code, 10)
            .reference("subjectId", "subject", self.subject_id)
            .reference("instructorId", "instructor", self.instructor_id)
            .reference("roomId", "room", self.room_id)
            .range("timeSlot", "time slot", self.time_slot, 1, 24)
            .finish()
    }
}
