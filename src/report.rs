use crate::data::{Catalog, Session, TIME_SLOTS};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::fmt::Write as _;

/// Headline counts for a catalog and its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub instructors: usize,
    pub subjects: usize,
    pub rooms: usize,
    pub groups: usize,
    pub required_sessions: usize,
    pub scheduled_sessions: usize,
}

impl CatalogSummary {
    pub fn new(catalog: &Catalog, sessions: &[Session]) -> Self {
        Self {
            instructors: catalog.instructors.len(),
            subjects: catalog.subjects.len(),
            rooms: catalog.rooms.len(),
            groups: catalog.groups.len(),
            required_sessions: catalog.required_sessions(),
            scheduled_sessions: sessions.len(),
        }
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} instructors, {} subjects, {} rooms, {} groups; {}/{} sessions scheduled",
            self.instructors,
            self.subjects,
            self.rooms,
            self.groups,
            self.scheduled_sessions,
            self.required_sessions
        )
    }
}

/// Renders a schedule as plain text for downstream readers.
///
/// Lists instructors, then one line per session in day/slot order. Sessions
/// whose subject, room, instructor, group or slot cannot be resolved are left
/// out.
pub fn format_schedule(sessions: &[Session], catalog: &Catalog) -> String {
    let index = catalog.index();
    let mut text = String::from("Current Schedule Data:\n");

    text.push_str("Instructors:\n");
    for instructor in &catalog.instructors {
        let _ = writeln!(text, "- {} ({})", instructor.name, instructor.specialty);
    }

    text.push_str("\nTimetable Assignments:\n");
    for session in sessions.iter().sorted_by_key(|s| (s.day, s.slot_index)) {
        let Some(subject) = index.subject(&session.subject_id) else {
            continue;
        };
        let (Some(room), Some(instructor), Some(group), Some(time)) = (
            index.room(&session.room_id),
            index.instructor(&subject.instructor_id),
            index.group(&subject.group_id),
            TIME_SLOTS.get(session.slot_index),
        ) else {
            continue;
        };
        let _ = writeln!(
            text,
            "[{} {}] {} in {} with {} for {}",
            session.day, time.label, subject.name, room.name, instructor.name, group.name
        );
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Day;
    use crate::seed::demo_catalog;

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
    fn test_lists_sessions_in_grid_order() {
        let catalog = demo_catalog();
        let sessions = [
            session("b", "s2", "r2", Day::Tuesday, 4),
            session("a", "s1", "r1", Day::Monday, 1),
        ];
        let text = format_schedule(&sessions, &catalog);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Current Schedule Data:");
        assert_eq!(lines[2], "- Dr. Alan Turing (CS)");
        assert_eq!(
            &lines[lines.len() - 2..],
            [
                "[Monday 09:00 - 10:00] Intro to CS in Hall A with Dr. Alan Turing for CS - Year 1",
                "[Tuesday 13:00 - 14:00] Calculus I in Room 101 with Dr. Ada Lovelace for CS - Year 1",
            ]
        );
    }

    #[test]
    fn test_skips_dangling_sessions() {
        let catalog = demo_catalog();
        let sessions = [
            session("a", "s1", "r404", Day::Monday, 1),
            session("b", "s404", "r1", Day::Monday, 1),
            session("c", "s1", "r1", Day::Monday, 9),
        ];
        let text = format_schedule(&sessions, &catalog);
        assert!(text.ends_with("Timetable Assignments:\n"));
    }

    #[test]
    fn test_summary_counts() {
        let catalog = demo_catalog();
        let summary = CatalogSummary::new(&catalog, &[]);
        assert_eq!(summary.required_sessions, 13);
        assert_eq!(
            summary.to_string(),
            "4 instructors, 5 subjects, 4 rooms, 3 groups; 0/13 sessions scheduled"
        );
    }
}
