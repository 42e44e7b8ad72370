//! Catalog pre-validation.
//!
//! The solver treats a malformed catalog exactly like an over-constrained one:
//! it simply finds nothing. Running these checks first lets callers report
//! broken references separately from genuinely unsatisfiable constraints.

use crate::data::{Catalog, Room, SLOTS_PER_DAY};
use std::collections::HashSet;
use thiserror::Error;

/// A structural problem in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("subject '{subject}' references unknown instructor '{instructor}'")]
    UnknownInstructor { subject: String, instructor: String },

    #[error("subject '{subject}' references unknown group '{group}'")]
    UnknownGroup { subject: String, group: String },

    #[error("subject '{subject}' has a zero-slot duration")]
    ZeroDuration { subject: String },

    #[error("subject '{subject}' lasts {duration} slots but a day has only {slots}")]
    DurationTooLong {
        subject: String,
        duration: u32,
        slots: usize,
    },

    #[error("subject '{subject}' needs a {room_type} but the catalog has none")]
    NoRoomOfType { subject: String, room_type: String },

    #[error("no {room_type} seats group '{group}' ({size}) for subject '{subject}'")]
    NoRoomLargeEnough {
        subject: String,
        room_type: String,
        group: String,
        size: u32,
    },
}

/// Validates the structure of a catalog, collecting every problem found.
///
/// Checks:
/// 1. No duplicate ids within rooms, instructors, groups or subjects
/// 2. Every subject references an existing instructor and group
/// 3. Every subject lasts between one slot and a full day
/// 4. Some room has the subject's required type, and one of those fits its group
pub fn validate_catalog(catalog: &Catalog) -> Result<(), Vec<CatalogError>> {
    let mut errors = Vec::new();

    check_unique("room", catalog.rooms.iter().map(|r| r.id.as_str()), &mut errors);
    check_unique(
        "instructor",
        catalog.instructors.iter().map(|i| i.id.as_str()),
        &mut errors,
    );
    check_unique("group", catalog.groups.iter().map(|g| g.id.as_str()), &mut errors);
    check_unique(
        "subject",
        catalog.subjects.iter().map(|s| s.id.as_str()),
        &mut errors,
    );

    let index = catalog.index();
    for subject in &catalog.subjects {
        if index.instructor(&subject.instructor_id).is_none() {
            errors.push(CatalogError::UnknownInstructor {
                subject: subject.id.clone(),
                instructor: subject.instructor_id.clone(),
            });
        }

        if subject.duration == 0 {
            errors.push(CatalogError::ZeroDuration {
                subject: subject.id.clone(),
            });
        } else if subject.duration_slots() > SLOTS_PER_DAY {
            errors.push(CatalogError::DurationTooLong {
                subject: subject.id.clone(),
                duration: subject.duration,
                slots: SLOTS_PER_DAY,
            });
        }

        let typed_rooms: Vec<&Room> = catalog
            .rooms
            .iter()
            .filter(|r| r.room_type == subject.required_room_type)
            .collect();
        if typed_rooms.is_empty() {
            errors.push(CatalogError::NoRoomOfType {
                subject: subject.id.clone(),
                room_type: subject.required_room_type.to_string(),
            });
        }

        match index.group(&subject.group_id) {
            None => errors.push(CatalogError::UnknownGroup {
                subject: subject.id.clone(),
                group: subject.group_id.clone(),
            }),
            Some(group)
                if !typed_rooms.is_empty()
                    && typed_rooms.iter().all(|r| r.capacity < group.size) =>
            {
                errors.push(CatalogError::NoRoomLargeEnough {
                    subject: subject.id.clone(),
                    room_type: subject.required_room_type.to_string(),
                    group: group.id.clone(),
                    size: group.size,
                });
            }
            Some(_) => {}
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<CatalogError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}
