use crate::data::{Catalog, CatalogIndex, Conflict, ConflictKind, Session, Subject};
use crate::legality::{overlaps, room_fits};
use itertools::Itertools;
use log::warn;

/// Pairwise scan of a finished schedule for double bookings.
///
/// Each same-day pair with overlapping slot ranges yields one finding per
/// shared room, instructor and group (in that order), all pointing at the
/// earlier session of the pair. Bounds and room fit are not checked here; see
/// [`audit_schedule`].
pub fn detect_conflicts(sessions: &[Session], catalog: &Catalog) -> Vec<Conflict> {
    let index = catalog.index();
    let resolved: Vec<(&Session, &Subject)> = sessions
        .iter()
        .filter_map(|session| match index.subject(&session.subject_id) {
            Some(subject) => Some((session, subject)),
            None => {
                warn!(
                    "Session {} references unknown subject {}; skipping",
                    session.id, session.subject_id
                );
                None
            }
        })
        .collect();

    let mut conflicts = Vec::new();
    for ((s1, sub1), (s2, sub2)) in resolved.iter().tuple_combinations() {
        if s1.day != s2.day {
            continue;
        }
        let end1 = s1.slot_index.saturating_add(sub1.duration_slots());
        let end2 = s2.slot_index.saturating_add(sub2.duration_slots());
        if !overlaps(s1.slot_index, end1, s2.slot_index, end2) {
            continue;
        }

        if s1.room_id == s2.room_id {
            conflicts.push(Conflict {
                kind: ConflictKind::Room,
                description: format!("Room {} double booked", room_name(&index, &s1.room_id)),
                session_id: s1.id.clone(),
            });
        }
        if sub1.instructor_id == sub2.instructor_id {
            conflicts.push(Conflict {
                kind: ConflictKind::Instructor,
                description: format!(
                    "Instructor {} double booked",
                    index
                        .instructor(&sub1.instructor_id)
                        .map_or(sub1.instructor_id.as_str(), |i| i.name.as_str())
                ),
                session_id: s1.id.clone(),
            });
        }
        if sub1.group_id == sub2.group_id {
            conflicts.push(Conflict {
                kind: ConflictKind::Group,
                description: format!(
                    "Group {} double booked",
                    index
                        .group(&sub1.group_id)
                        .map_or(sub1.group_id.as_str(), |g| g.name.as_str())
                ),
                session_id: s1.id.clone(),
            });
        }
    }
    conflicts
}

/// [`detect_conflicts`] plus a `Capacity` finding for every session whose room
/// is missing, of the wrong type, or too small for its group.
pub fn audit_schedule(sessions: &[Session], catalog: &Catalog) -> Vec<Conflict> {
    let mut conflicts = detect_conflicts(sessions, catalog);
    let index = catalog.index();

    for session in sessions {
        let Some(subject) = index.subject(&session.subject_id) else {
            continue;
        };
        let Some(room) = index.room(&session.room_id) else {
            conflicts.push(Conflict {
                kind: ConflictKind::Capacity,
                description: format!("Room {} does not exist", session.room_id),
                session_id: session.id.clone(),
            });
            continue;
        };
        let Some(group) = index.group(&subject.group_id) else {
            continue;
        };
        if let Err(violation) = room_fits(room, subject, group) {
            conflicts.push(Conflict {
                kind: ConflictKind::Capacity,
                description: format!("{} for {}: {}", subject.name, group.name, violation),
                session_id: session.id.clone(),
            });
        }
    }
    conflicts
}

fn room_name<'a>(index: &CatalogIndex<'a>, id: &'a str) -> &'a str {
    index.room(id).map_or(id, |r| r.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Day, Group, Instructor, Room, RoomType};

    fn catalog() -> Catalog {
        Catalog {
            rooms: vec![
                Room { id: "r1".into(), name: "Room 101".into(), capacity: 30, room_type: RoomType::Classroom },
                Room { id: "r2".into(), name: "Room 102".into(), capacity: 30, room_type: RoomType::Classroom },
                Room { id: "lab".into(), name: "Comp Lab 1".into(), capacity: 10, room_type: RoomType::Lab },
            ],
            instructors: vec![
                Instructor { id: "i1".into(), name: "Dr. Lovelace".into(), specialty: "Math".into(), unavailable_slots: Default::default() },
                Instructor { id: "i2".into(), name: "Prof. Curie".into(), specialty: "Chemistry".into(), unavailable_slots: Default::default() },
            ],
            groups: vec![
                Group { id: "g1".into(), name: "CS - Year 1".into(), size: 25 },
                Group { id: "g2".into(), name: "Physics - Year 1".into(), size: 20 },
            ],
            subjects: vec![
                Subject {
                    id: "calc".into(),
                    name: "Calculus I".into(),
                    instructor_id: "i1".into(),
                    group_id: "g1".into(),
                    duration: 2,
                    required_room_type: RoomType::Classroom,
                    sessions_per_week: 1,
                },
                Subject {
                    id: "chem".into(),
                    name: "Organic Chem".into(),
                    instructor_id: "i2".into(),
                    group_id: "g2".into(),
                    duration: 1,
                    required_room_type: RoomType::Classroom,
                    sessions_per_week: 1,
                },
                Subject {
                    id: "stats".into(),
                    name: "Statistics".into(),
                    instructor_id: "i1".into(),
                    group_id: "g1".into(),
                    duration: 1,
                    required_room_type: RoomType::Classroom,
                    sessions_per_week: 1,
                },
            ],
        }
    }

    fn session(id: &str, subject: &str, room: &str, day: Day, slot: usize) -> Session {
        Session {
            id: id.into(),
            subject_id: subject.into(),
            room_id: room.into(),
            day,
            slot_index: slot,
        }
    }

    #[test]
    fn test_shared_room_yields_single_room_finding() {
        let sessions = [
            session("a", "calc", "r1", Day::Monday, 0),
            session("b", "chem", "r1", Day::Monday, 1),
        ];
        let conflicts = detect_conflicts(&sessions, &catalog());
        assert_eq!(
            conflicts,
            vec![Conflict {
                kind: ConflictKind::Room,
                description: "Room Room 101 double booked".into(),
                session_id: "a".into(),
            }]
        );
    }

    #[test]
    fn test_one_pair_can_clash_on_every_dimension() {
        let sessions = [
            session("a", "calc", "r1", Day::Tuesday, 3),
            session("b", "stats", "r1", Day::Tuesday, 4),
        ];
        let kinds: Vec<ConflictKind> = detect_conflicts(&sessions, &catalog())
            .into_iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(
            kinds,
            [ConflictKind::Room, ConflictKind::Instructor, ConflictKind::Group]
        );
    }

    #[test]
    fn test_touching_or_different_days_do_not_clash() {
        let sessions = [
            session("a", "calc", "r1", Day::Monday, 0),
            session("b", "stats", "r1", Day::Monday, 2),
            session("c", "stats", "r1", Day::Tuesday, 0),
        ];
        assert!(detect_conflicts(&sessions, &catalog()).is_empty());
    }

    #[test]
    fn test_unknown_subjects_are_skipped() {
        let sessions = [
            session("a", "calc", "r1", Day::Monday, 0),
            session("ghost", "nope", "r1", Day::Monday, 0),
        ];
        assert!(detect_conflicts(&sessions, &catalog()).is_empty());
    }

    #[test]
    fn test_far_out_of_range_slot_does_not_overflow() {
        let sessions = [
            session("a", "calc", "r1", Day::Monday, usize::MAX),
            session("b", "chem", "r1", Day::Monday, usize::MAX - 1),
            session("c", "chem", "r1", Day::Monday, 0),
        ];
        let conflicts = detect_conflicts(&sessions, &catalog());
        // a covers [MAX, MAX) after saturating and so overlaps nothing; b and c
        // do not touch either.
        assert!(conflicts.is_empty());
        assert!(audit_schedule(&sessions, &catalog()).is_empty());
    }

    #[test]
    fn test_audit_flags_room_fit_problems() {
        let sessions = [
            session("a", "calc", "lab", Day::Monday, 0),
            session("b", "chem", "r9", Day::Monday, 0),
            session("c", "stats", "r2", Day::Friday, 0),
        ];
        let conflicts = audit_schedule(&sessions, &catalog());
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.iter().all(|c| c.kind == ConflictKind::Capacity));
        assert_eq!(conflicts[0].session_id, "a");
        assert_eq!(conflicts[1].description, "Room r9 does not exist");
        // The plain detector ignores room fit entirely.
        assert!(detect_conflicts(&sessions, &catalog()).is_empty());
    }
}
