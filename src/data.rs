use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

// Type aliases for clarity
pub type RoomId = String;
pub type InstructorId = String;
pub type GroupId = String;
pub type SubjectId = String;
pub type SessionId = String;

/// A weekday of the teaching week, in scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// Days the solver tries, in order.
pub const DAYS: [Day; 5] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
];

impl Day {
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DAYS.iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown day '{s}'"))
    }
}

/// One hour-aligned unit of the daily grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub index: usize,
    pub label: &'static str,
}

pub const TIME_SLOTS: [TimeSlot; 7] = [
    TimeSlot { index: 0, label: "08:00 - 09:00" },
    TimeSlot { index: 1, label: "09:00 - 10:00" },
    TimeSlot { index: 2, label: "10:00 - 11:00" },
    TimeSlot { index: 3, label: "11:00 - 12:00" },
    TimeSlot { index: 4, label: "13:00 - 14:00" },
    TimeSlot { index: 5, label: "14:00 - 15:00" },
    TimeSlot { index: 6, label: "15:00 - 16:00" },
];

pub const SLOTS_PER_DAY: usize = TIME_SLOTS.len();

/// A (day, slot) pair, written as `Monday-0` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DaySlot {
    pub day: Day,
    pub slot: usize,
}

impl DaySlot {
    pub fn new(day: Day, slot: usize) -> Self {
        Self { day, slot }
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.slot)
    }
}

impl FromStr for DaySlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, slot) = s
            .rsplit_once('-')
            .ok_or_else(|| format!("expected 'Day-slot', got '{s}'"))?;
        let day = day.parse::<Day>()?;
        let slot = slot
            .parse::<usize>()
            .map_err(|e| format!("bad slot index in '{s}': {e}"))?;
        if slot >= SLOTS_PER_DAY {
            return Err(format!(
                "slot {slot} in '{s}' is outside the {SLOTS_PER_DAY}-slot day"
            ));
        }
        Ok(Self { day, slot })
    }
}

impl TryFrom<String> for DaySlot {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DaySlot> for String {
    fn from(value: DaySlot) -> Self {
        value.to_string()
    }
}

/// Category of teaching space a subject needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "Lecture Hall")]
    LectureHall,
    Lab,
    Classroom,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoomType::LectureHall => "Lecture Hall",
            RoomType::Lab => "Lab",
            RoomType::Classroom => "Classroom",
        })
    }
}

/// Represents a physical room with a given capacity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
}

/// An instructor and the slots they can never teach in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: InstructorId,
    pub name: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub unavailable_slots: BTreeSet<DaySlot>,
}

impl Instructor {
    pub fn is_available(&self, day: Day, slot: usize) -> bool {
        !self.unavailable_slots.contains(&DaySlot::new(day, slot))
    }
}

/// A student cohort attending subjects together.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub size: u32,
}

/// A subject taught by one instructor to one group, `sessions_per_week` times.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub instructor_id: InstructorId,
    pub group_id: GroupId,
    /// Length of one session in consecutive slots.
    pub duration: u32,
    pub required_room_type: RoomType,
    pub sessions_per_week: u32,
}

impl Subject {
    pub fn duration_slots(&self) -> usize {
        self.duration as usize
    }
}

/// One atomic unit of placement work, expanded from a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub subject_id: SubjectId,
    pub duration: usize,
}

/// A placed session. Its duration comes from the subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub subject_id: SubjectId,
    pub room_id: RoomId,
    pub day: Day,
    pub slot_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    Room,
    Instructor,
    Group,
    Capacity,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictKind::Room => "Room",
            ConflictKind::Instructor => "Instructor",
            ConflictKind::Group => "Group",
            ConflictKind::Capacity => "Capacity",
        })
    }
}

/// A constraint violation found in a finished schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub description: String,
    pub session_id: SessionId,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.kind, self.description, self.session_id)
    }
}

/// The four input collections of a scheduling problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Catalog {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Catalog {
    pub fn index(&self) -> CatalogIndex<'_> {
        CatalogIndex::new(self)
    }

    /// Sum of `sessions_per_week` over all subjects.
    pub fn required_sessions(&self) -> usize {
        self.subjects
            .iter()
            .map(|s| s.sessions_per_week as usize)
            .sum()
    }
}

/// Id lookups over a borrowed catalog. First record wins on duplicate ids.
#[derive(Debug)]
pub struct CatalogIndex<'a> {
    rooms: HashMap<&'a str, &'a Room>,
    instructors: HashMap<&'a str, &'a Instructor>,
    groups: HashMap<&'a str, &'a Group>,
    subjects: HashMap<&'a str, &'a Subject>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        fn by_id<'a, T>(items: &'a [T], id: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, &'a T> {
            let mut map = HashMap::with_capacity(items.len());
            for item in items {
                map.entry(id(item)).or_insert(item);
            }
            map
        }

        Self {
            rooms: by_id(&catalog.rooms, |r| r.id.as_str()),
            instructors: by_id(&catalog.instructors, |i| i.id.as_str()),
            groups: by_id(&catalog.groups, |g| g.id.as_str()),
            subjects: by_id(&catalog.subjects, |s| s.id.as_str()),
        }
    }

    pub fn room(&self, id: &str) -> Option<&'a Room> {
        self.rooms.get(id).copied()
    }

    pub fn instructor(&self, id: &str) -> Option<&'a Instructor> {
        self.instructors.get(id).copied()
    }

    pub fn group(&self, id: &str) -> Option<&'a Group> {
        self.groups.get(id).copied()
    }

    pub fn subject(&self, id: &str) -> Option<&'a Subject> {
        self.subjects.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_slot_round_trips_through_wire_form() {
        let slot: DaySlot = "Friday-6".parse().unwrap();
        assert_eq!(slot, DaySlot::new(Day::Friday, 6));
        assert_eq!(slot.to_string(), "Friday-6");
    }

    #[test]
    fn test_day_slot_rejects_unknown_day_and_out_of_range_slot() {
        assert!("Caturday-0".parse::<DaySlot>().is_err());
        assert!("Monday-7".parse::<DaySlot>().is_err());
        assert!("Monday".parse::<DaySlot>().is_err());
    }

    #[test]
    fn test_instructor_json_uses_compact_blocked_slots() {
        let json = r#"{
            "id": "i1",
            "name": "Dr. Alan Turing",
            "specialty": "CS",
            "unavailableSlots": ["Monday-0", "Tuesday-3"]
        }"#;
        let instructor: Instructor = serde_json::from_str(json).unwrap();
        assert!(!instructor.is_available(Day::Monday, 0));
        assert!(!instructor.is_available(Day::Tuesday, 3));
        assert!(instructor.is_available(Day::Monday, 1));

        let back = serde_json::to_value(&instructor).unwrap();
        assert_eq!(back["unavailableSlots"][0], "Monday-0");
    }

    #[test]
    fn test_room_type_uses_display_names_on_the_wire() {
        let room: Room = serde_json::from_str(
            r#"{"id": "r1", "name": "Hall A", "capacity": 100, "type": "Lecture Hall"}"#,
        )
        .unwrap();
        assert_eq!(room.room_type, RoomType::LectureHall);
    }

    #[test]
    fn test_index_keeps_first_record_for_duplicate_ids() {
        let catalog = Catalog {
            groups: vec![
                Group { id: "g1".into(), name: "first".into(), size: 10 },
                Group { id: "g1".into(), name: "second".into(), size: 20 },
            ],
            ..Catalog::default()
        };
        let index = catalog.index();
        assert_eq!(index.group("g1").map(|g| g.name.as_str()), Some("first"));
        assert!(index.group("g2").is_none());
    }
}
