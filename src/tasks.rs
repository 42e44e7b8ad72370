use crate::data::{Subject, Task};

/// Flattens every subject into one task per weekly session.
///
/// Longer tasks come first so they are placed while the grid is emptiest.
/// The sort is stable, so equal durations keep subject/instance order and the
/// result is deterministic.
pub fn expand_tasks(subjects: &[Subject]) -> Vec<Task> {
    let mut tasks: Vec<Task> = subjects
        .iter()
        .flat_map(|subject| {
            (0..subject.sessions_per_week).map(move |i| Task {
                id: format!("{}_instance_{}", subject.id, i),
                subject_id: subject.id.clone(),
                duration: subject.duration_slots(),
            })
        })
        .collect();

    tasks.sort_by(|a, b| b.duration.cmp(&a.duration));
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RoomType;

    fn subject(id: &str, duration: u32, sessions: u32) -> Subject {
        Subject {
            id: id.into(),
            name: id.into(),
            instructor_id: "i1".into(),
            group_id: "g1".into(),
            duration,
            required_room_type: RoomType::Classroom,
            sessions_per_week: sessions,
        }
    }

    #[test]
    fn test_one_task_per_weekly_session() {
        let tasks = expand_tasks(&[subject("s1", 1, 3), subject("s2", 1, 0)]);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["s1_instance_0", "s1_instance_1", "s1_instance_2"]);
    }

    #[test]
    fn test_longest_first_with_stable_ties() {
        let tasks = expand_tasks(&[subject("a", 1, 2), subject("b", 2, 1), subject("c", 1, 1)]);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            ["b_instance_0", "a_instance_0", "a_instance_1", "c_instance_0"]
        );
        assert_eq!(tasks[0].duration, 2);
    }

    #[test]
    fn test_empty_catalog_has_no_tasks() {
        assert!(expand_tasks(&[]).is_empty());
    }
}
