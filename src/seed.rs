use crate::data::{Catalog, Day, DaySlot, Group, Instructor, Room, RoomType, Subject};
use std::collections::BTreeSet;

fn room(id: &str, name: &str, capacity: u32, room_type: RoomType) -> Room {
    Room {
        id: id.into(),
        name: name.into(),
        capacity,
        room_type,
    }
}

fn instructor(id: &str, name: &str, specialty: &str, blocked: &[DaySlot]) -> Instructor {
    Instructor {
        id: id.into(),
        name: name.into(),
        specialty: specialty.into(),
        unavailable_slots: blocked.iter().copied().collect::<BTreeSet<_>>(),
    }
}

fn group(id: &str, name: &str, size: u32) -> Group {
    Group {
        id: id.into(),
        name: name.into(),
        size,
    }
}

fn subject(
    id: &str,
    name: &str,
    instructor_id: &str,
    group_id: &str,
    duration: u32,
    required_room_type: RoomType,
    sessions_per_week: u32,
) -> Subject {
    Subject {
        id: id.into(),
        name: name.into(),
        instructor_id: instructor_id.into(),
        group_id: group_id.into(),
        duration,
        required_room_type,
        sessions_per_week,
    }
}

/// A small faculty used for demos and as a known-solvable fixture.
pub fn demo_catalog() -> Catalog {
    Catalog {
        rooms: vec![
            room("r1", "Hall A", 100, RoomType::LectureHall),
            room("r2", "Room 101", 30, RoomType::Classroom),
            room("r3", "Room 102", 30, RoomType::Classroom),
            room("r4", "Comp Lab 1", 25, RoomType::Lab),
        ],
        instructors: vec![
            instructor("i1", "Dr. Alan Turing", "CS", &[DaySlot::new(Day::Monday, 0)]),
            instructor("i2", "Dr. Ada Lovelace", "Math", &[]),
            instructor("i3", "Prof. Einstein", "Physics", &[DaySlot::new(Day::Friday, 6)]),
            instructor("i4", "Prof. Curie", "Chemistry", &[]),
        ],
        groups: vec![
            group("g1", "CS - Year 1", 25),
            group("g2", "Physics - Year 1", 20),
            group("g3", "Math - Year 2", 30),
        ],
        subjects: vec![
            subject("s1", "Intro to CS", "i1", "g1", 1, RoomType::LectureHall, 3),
            subject("s2", "Calculus I", "i2", "g1", 1, RoomType::Classroom, 2),
            subject("s3", "Physics Lab", "i3", "g2", 2, RoomType::Lab, 1),
            subject("s4", "Organic Chem", "i4", "g2", 1, RoomType::Classroom, 3),
            subject("s5", "Advanced Math", "i2", "g3", 1, RoomType::Classroom, 4),
        ],
    }
}
