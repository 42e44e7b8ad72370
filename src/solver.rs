use crate::data::{
    Catalog, CatalogIndex, DAYS, Group, Instructor, Room, SLOTS_PER_DAY, Session, Subject, Task,
};
use crate::legality::{Candidate, is_legal};
use crate::tasks::expand_tasks;
use log::{debug, info, trace, warn};
use serde::Serialize;
use std::time::{Duration, Instant};

/// How often (in candidates) the wall clock is consulted.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Limits on a single search. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveOptions {
    pub max_steps: Option<u64>,
    pub time_limit: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every task placed; the first complete assignment found.
    Solved(Vec<Session>),
    /// The search space was exhausted for the first task.
    Unsatisfiable,
    /// The step or time budget ran out before the search finished.
    Inconclusive,
}

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub tasks: usize,
    pub candidates_tried: u64,
    pub placements: u64,
    pub backtracks: u64,
    pub max_depth: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    pub outcome: SolveOutcome,
    pub stats: SearchStats,
}

/// Everything the search needs about one task, resolved once up front.
struct PreparedTask<'a> {
    subject: &'a Subject,
    instructor: &'a Instructor,
    group: &'a Group,
    /// Rooms of the right type and size, in catalog order.
    rooms: Vec<&'a Room>,
    /// Number of starting slots that keep the session inside the day.
    starts: usize,
}

impl<'a> PreparedTask<'a> {
    /// Size of the flattened day x slot x room candidate sequence.
    fn space(&self) -> usize {
        DAYS.len() * self.starts * self.rooms.len()
    }

    /// Decodes `position` days-major, then slots, then rooms.
    fn candidate_at(&self, position: usize) -> Candidate<'a> {
        let rooms = self.rooms.len();
        Candidate {
            day: DAYS[position / (self.starts * rooms)],
            slot: (position / rooms) % self.starts,
            room: self.rooms[position % rooms],
            subject: self.subject,
            instructor: self.instructor,
            group: self.group,
        }
    }
}

/// Finds a full schedule, returning an empty list when none exists.
///
/// Subjects must last at least one slot; a zero-duration subject makes the
/// catalog unsatisfiable.
///
/// Callers tell "no subjects" apart from "unsatisfiable" by checking whether
/// `catalog.subjects` required any sessions.
pub fn generate_schedule(catalog: &Catalog) -> Vec<Session> {
    match solve(catalog, &SolveOptions::default()).outcome {
        SolveOutcome::Solved(sessions) => sessions,
        SolveOutcome::Unsatisfiable | SolveOutcome::Inconclusive => {
            warn!("Could not find a valid schedule for all subjects.");
            Vec::new()
        }
    }
}

/// Chronological backtracking over the longest-first task order.
///
/// The search keeps an explicit stack of frames, one per placed task plus the
/// one being tried; each frame is the cursor into its task's candidate
/// sequence. A frame with no legal candidate left is popped together with the
/// session placed by the frame below it, which then resumes from its cursor.
pub fn solve(catalog: &Catalog, options: &SolveOptions) -> SolveReport {
    let start_time = Instant::now();
    let index = catalog.index();
    let tasks = expand_tasks(&catalog.subjects);
    let mut stats = SearchStats {
        tasks: tasks.len(),
        ..SearchStats::default()
    };

    info!(
        "Starting backtracking search with {} tasks, {} rooms, {} days and {} slots per day...",
        tasks.len(),
        catalog.rooms.len(),
        DAYS.len(),
        SLOTS_PER_DAY
    );

    let finish = |outcome: SolveOutcome, mut stats: SearchStats| {
        stats.elapsed_ms = start_time.elapsed().as_millis() as u64;
        SolveReport { outcome, stats }
    };

    let Some(prepared) = prepare(catalog, &index, &tasks) else {
        return finish(SolveOutcome::Unsatisfiable, stats);
    };
    if prepared.is_empty() {
        return finish(SolveOutcome::Solved(Vec::new()), stats);
    }

    let mut placed: Vec<Session> = Vec::with_capacity(prepared.len());
    let mut frames: Vec<usize> = Vec::with_capacity(prepared.len());
    frames.push(0);

    while !frames.is_empty() {
        let depth = frames.len() - 1;
        let task = &prepared[depth];
        let cursor = &mut frames[depth];
        let mut found = None;

        while *cursor < task.space() {
            if budget_exhausted(options, &stats, start_time) {
                info!(
                    "Search budget exhausted after {} candidates at depth {}",
                    stats.candidates_tried, depth
                );
                return finish(SolveOutcome::Inconclusive, stats);
            }
            let candidate = task.candidate_at(*cursor);
            *cursor += 1;
            stats.candidates_tried += 1;
            if is_legal(&candidate, &placed, &index) {
                found = Some(candidate);
                break;
            }
        }

        match found {
            Some(candidate) => {
                let session = place(&candidate);
                trace!(
                    "Placed {} ({}) in {} on {} slot {}",
                    tasks[depth].id, session.id, session.room_id, session.day, session.slot_index
                );
                placed.push(session);
                stats.placements += 1;
                stats.max_depth = stats.max_depth.max(placed.len());
                if placed.len() == prepared.len() {
                    info!(
                        "Solution found in {:.2?} ({} candidates, {} backtracks)",
                        start_time.elapsed(),
                        stats.candidates_tried,
                        stats.backtracks
                    );
                    return finish(SolveOutcome::Solved(placed), stats);
                }
                frames.push(0);
            }
            None => {
                frames.pop();
                if let Some(undone) = placed.pop() {
                    stats.backtracks += 1;
                    trace!("Backtracking from {} (undo {})", tasks[depth].id, undone.id);
                }
            }
        }
    }

    info!(
        "Search space exhausted after {} candidates; no valid schedule exists",
        stats.candidates_tried
    );
    finish(SolveOutcome::Unsatisfiable, stats)
}

/// Resolves each task's catalog records and candidate rooms.
///
/// Returns `None` when some task can never be placed (dangling reference,
/// no compatible room, or a duration of zero or longer than a day), which
/// makes the whole catalog unsatisfiable.
fn prepare<'a>(
    catalog: &'a Catalog,
    index: &CatalogIndex<'a>,
    tasks: &[Task],
) -> Option<Vec<PreparedTask<'a>>> {
    let mut prepared = Vec::with_capacity(tasks.len());
    for task in tasks {
        let subject = index.subject(&task.subject_id)?;
        let Some(instructor) = index.instructor(&subject.instructor_id) else {
            debug!("Subject {} references unknown instructor {}", subject.id, subject.instructor_id);
            return None;
        };
        let Some(group) = index.group(&subject.group_id) else {
            debug!("Subject {} references unknown group {}", subject.id, subject.group_id);
            return None;
        };
        let rooms: Vec<&Room> = catalog
            .rooms
            .iter()
            .filter(|room| room.room_type == subject.required_room_type && room.capacity >= group.size)
            .collect();
        // Zero-slot sessions would all land on the same slot and share an id.
        let starts = match task.duration {
            0 => 0,
            duration => (SLOTS_PER_DAY + 1).saturating_sub(duration),
        };
        if rooms.is_empty() || starts == 0 {
            debug!(
                "Task {} has no candidate placements ({} compatible rooms, {} start slots)",
                task.id,
                rooms.len(),
                starts
            );
            return None;
        }
        prepared.push(PreparedTask {
            subject,
            instructor,
            group,
            rooms,
            starts,
        });
    }
    Some(prepared)
}

fn budget_exhausted(options: &SolveOptions, stats: &SearchStats, start_time: Instant) -> bool {
    if options
        .max_steps
        .is_some_and(|max| stats.candidates_tried >= max)
    {
        return true;
    }
    match options.time_limit {
        Some(limit) if stats.candidates_tried % CLOCK_CHECK_INTERVAL == 0 => {
            start_time.elapsed() >= limit
        }
        _ => false,
    }
}

/// Session ids derive from (subject, day, slot), which is unique in any valid
/// schedule because a subject can never overlap itself.
fn place(candidate: &Candidate<'_>) -> Session {
    Session {
        id: format!("{}-{}-{}", candidate.subject.id, candidate.day, candidate.slot),
        subject_id: candidate.subject.id.clone(),
        room_id: candidate.room.id.clone(),
        day: candidate.day,
        slot_index: candidate.slot,
    }
}
