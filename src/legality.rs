use crate::data::{
    CatalogIndex, Day, DaySlot, Group, Instructor, Room, RoomId, RoomType, SLOTS_PER_DAY,
    Session, SessionId, Subject,
};
use thiserror::Error;

/// The first hard constraint a candidate placement breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("out of day bounds: slot {slot} + duration {duration} runs past the last slot")]
    OutOfBounds { slot: usize, duration: usize },

    #[error("room {room} is not a {required}")]
    RoomTypeMismatch { room: RoomId, required: RoomType },

    #[error("room {room} seats {capacity}, group needs {needed}")]
    InsufficientCapacity {
        room: RoomId,
        capacity: u32,
        needed: u32,
    },

    #[error("room already used by session {0}")]
    RoomBusy(SessionId),

    #[error("instructor already teaching session {0}")]
    InstructorBusy(SessionId),

    #[error("group already attending session {0}")]
    GroupBusy(SessionId),

    #[error("instructor unavailable at {0}")]
    InstructorUnavailable(DaySlot),
}

/// A proposed (day, slot, room) for one session of `subject`.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub day: Day,
    pub slot: usize,
    pub room: &'a Room,
    pub subject: &'a Subject,
    pub instructor: &'a Instructor,
    pub group: &'a Group,
}

impl Candidate<'_> {
    fn end(&self) -> usize {
        self.slot.saturating_add(self.subject.duration_slots())
    }
}

/// Strict half-open interval intersection of `[a_start, a_end)` and `[b_start, b_end)`.
#[inline]
pub fn overlaps(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> bool {
    a_start < b_end && a_end > b_start
}

/// Room type and capacity compatibility.
pub fn room_fits(room: &Room, subject: &Subject, group: &Group) -> Result<(), Violation> {
    if room.room_type != subject.required_room_type {
        return Err(Violation::RoomTypeMismatch {
            room: room.id.clone(),
            required: subject.required_room_type,
        });
    }
    if room.capacity < group.size {
        return Err(Violation::InsufficientCapacity {
            room: room.id.clone(),
            capacity: room.capacity,
            needed: group.size,
        });
    }
    Ok(())
}

/// Decides whether `candidate` can join `placed`.
///
/// Checks run cheapest first and stop at the first failure: day bounds, room
/// compatibility, clashes with overlapping sessions on the same day (room,
/// then instructor, then group), and finally instructor availability for every
/// slot the session would occupy.
pub fn check_placement(
    candidate: &Candidate<'_>,
    placed: &[Session],
    index: &CatalogIndex<'_>,
) -> Result<(), Violation> {
    let duration = candidate.subject.duration_slots();
    if candidate.end() > SLOTS_PER_DAY {
        return Err(Violation::OutOfBounds {
            slot: candidate.slot,
            duration,
        });
    }

    room_fits(candidate.room, candidate.subject, candidate.group)?;

    for existing in placed.iter().filter(|s| s.day == candidate.day) {
        // Sessions the catalog cannot resolve occupy nothing we can reason about.
        let Some(other) = index.subject(&existing.subject_id) else {
            continue;
        };
        let existing_end = existing.slot_index.saturating_add(other.duration_slots());
        if !overlaps(existing.slot_index, existing_end, candidate.slot, candidate.end()) {
            continue;
        }
        if existing.room_id == candidate.room.id {
            return Err(Violation::RoomBusy(existing.id.clone()));
        }
        if other.instructor_id == candidate.instructor.id {
            return Err(Violation::InstructorBusy(existing.id.clone()));
        }
        if other.group_id == candidate.group.id {
            return Err(Violation::GroupBusy(existing.id.clone()));
        }
    }

    if let Some(slot) = (candidate.slot..candidate.end())
        .find(|&slot| !candidate.instructor.is_available(candidate.day, slot))
    {
        return Err(Violation::InstructorUnavailable(DaySlot::new(
            candidate.day,
            slot,
        )));
    }

    Ok(())
}

/// Boolean form of [`check_placement`].
pub fn is_legal(candidate: &Candidate<'_>, placed: &[Session], index: &CatalogIndex<'_>) -> bool {
    check_placement(candidate, placed, index).is_ok()
}
