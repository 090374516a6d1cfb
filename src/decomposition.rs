/*! The critical-interval decomposition driver

This module hosts the outer loop of the scheduler: repeatedly detect
the critical group of the remaining tasks, verify that it fits its
interval, dispatch it to the speed-scaled EDF simulator, and clip the
windows of the remaining tasks so that later iterations never
reconsider the consumed interval.

## Citation

The decomposition follows the classic offline construction of:

- F. Yao, A. Demers, and S. Shenker, “[A Scheduling Model for Reduced CPU Energy](https://doi.org/10.1109/SFCS.1995.492478)”, *Proceedings of the 36th Annual Symposium on Foundations of Computer Science (FOCS 1995)*, pp.&nbsp;374–382, October 1995.

Please cite the paper when using functionality from this module for academic work.
*/

use auto_impl::auto_impl;
use itertools::Itertools;
use thiserror::Error;

use crate::analysis;
use crate::edf::{self, ExecutionBlock};
use crate::speed::Speed;
use crate::task::Task;
use crate::time::Instant;

/// Callback interface for observing the driver's progress.
///
/// The driver stays silent by default; callers that want a trace of
/// the intermediate critical groups supply an implementation to
/// [schedule_with_observer].
#[auto_impl(&mut, Box)]
pub trait Observer {
    /// Invoked once per driver iteration, after a critical group has
    /// been identified and before it is checked and dispatched.
    fn critical_group(&mut self, density: Speed, window: (Instant, Instant), members: &[Task]);
}

/// The default observer, which ignores every event.
impl Observer for () {
    fn critical_group(&mut self, _: Speed, _: (Instant, Instant), _: &[Task]) {}
}

/// Error type returned when a critical group's aggregate demand
/// exceeds its interval, so no valid schedule exists for the input
/// as a whole.
///
/// Carries the offending group for diagnostics. The member records
/// reflect any window revisions applied in earlier iterations; that
/// revised state is what is actually infeasible.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "task(s) {} unschedulable: demand exceeds the interval [{}, {}] (density {density})",
    .members.iter().join(", "),
    .window.0,
    .window.1
)]
pub struct Unschedulable {
    pub density: Speed,
    pub window: (Instant, Instant),
    pub members: Vec<Task>,
}

pub type ScheduleResult = Result<Vec<ExecutionBlock>, Unschedulable>;

/// Compute an energy-minimizing, speed-scaled execution schedule for
/// the given tasks by critical-interval decomposition.
///
/// Each iteration extracts the critical group of the remaining
/// tasks, runs it at its own density under EDF dispatch, and clips
/// the windows of the tasks left behind so that the consumed
/// interval is never revisited. The returned blocks are concatenated
/// in group-discovery order; within one group they are ordered by
/// start time. Callers that want a single timeline should sort by
/// start (and possibly [edf::coalesce] first).
///
/// An empty task set yields an empty schedule. If any critical group
/// fails its schedulability check, the whole run aborts with
/// [Unschedulable]; no partial schedule is returned. The only
/// recovery is to adjust the input task set and call again.
pub fn schedule(tasks: Vec<Task>) -> ScheduleResult {
    schedule_with_observer(tasks, ())
}

/// Same as [schedule], but reports each critical group to `observer`
/// before it is checked and dispatched.
pub fn schedule_with_observer(tasks: Vec<Task>, mut observer: impl Observer) -> ScheduleResult {
    let mut live = tasks;
    let mut blocks = Vec::new();

    while let Some((density, member_idxs)) = analysis::find_critical_group(&live) {
        // split the live set into the group and the rest
        let mut group = Vec::with_capacity(member_idxs.len());
        let mut rest = Vec::with_capacity(live.len() - member_idxs.len());
        for (i, task) in live.drain(..).enumerate() {
            if member_idxs.binary_search(&i).is_ok() {
                group.push(task);
            } else {
                rest.push(task);
            }
        }
        live = rest;

        let window = analysis::task_set_window(&group);
        observer.critical_group(density, window, &group);

        if !analysis::is_schedulable(&group, window) {
            return Err(Unschedulable {
                density,
                window,
                members: group,
            });
        }

        blocks.extend(edf::run_edf(group, density));
        revise_windows(&mut live, window);
    }

    Ok(blocks)
}

/// Clip the windows of the remaining tasks so that they no longer
/// overlap the consumed interval `[a, b]`.
///
/// A task whose deadline falls inside the interval must now finish
/// before the interval starts; a task released inside the interval
/// cannot start until it ends. A task that straddles the interval on
/// both sides keeps whichever side of its window has more room, the
/// later side on ties — a policy choice, not an optimality result.
fn revise_windows(tasks: &mut [Task], consumed: (Instant, Instant)) {
    let (a, b) = consumed;
    for task in tasks.iter_mut() {
        if task.deadline > a && task.deadline <= b {
            task.deadline = a;
        } else if task.release >= a && task.release < b {
            task.release = b;
        } else if task.release < a && task.deadline > b {
            let before = a - task.release;
            let after = task.deadline - b;
            if before <= after {
                task.release = b;
            } else {
                task.deadline = a;
            }
        }
        // clipping can never empty a window: a task contained in
        // [a, b] would have been a member of the dispatched group
        debug_assert!(task.release < task.deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::{revise_windows, schedule, schedule_with_observer, Observer};
    use crate::speed::Speed;
    use crate::task::Task;
    use crate::tests::{t, ub};
    use crate::time::Instant;

    #[test]
    fn deadline_inside_consumed_interval_moves_before() {
        let mut tasks = vec![t("T1", 0, 5, 1), t("T2", 0, 8, 1)];
        revise_windows(&mut tasks, (4, 8));
        assert_eq!(tasks[0].window(), (0, 4));
        assert_eq!(tasks[1].window(), (0, 4));
    }

    #[test]
    fn release_inside_consumed_interval_moves_after() {
        let mut tasks = vec![t("T1", 4, 12, 1), t("T2", 7, 12, 1)];
        revise_windows(&mut tasks, (4, 8));
        assert_eq!(tasks[0].window(), (8, 12));
        assert_eq!(tasks[1].window(), (8, 12));
    }

    #[test]
    fn straddling_task_keeps_the_roomier_side() {
        // equal room on both sides: the later side wins
        let mut tasks = vec![t("X", 0, 10, 1)];
        revise_windows(&mut tasks, (4, 6));
        assert_eq!(tasks[0].window(), (6, 10));
        // more room before than after
        let mut tasks = vec![t("Y", 0, 9, 1)];
        revise_windows(&mut tasks, (4, 6));
        assert_eq!(tasks[0].window(), (0, 4));
    }

    #[test]
    fn disjoint_windows_are_untouched() {
        let mut tasks = vec![t("T1", 0, 4, 1), t("T2", 8, 12, 1)];
        revise_windows(&mut tasks, (4, 8));
        assert_eq!(tasks[0].window(), (0, 4));
        assert_eq!(tasks[1].window(), (8, 12));
    }

    #[test]
    fn empty_input_yields_empty_schedule() {
        assert_eq!(schedule(vec![]), Ok(vec![]));
    }

    #[test]
    fn unschedulable_group_aborts_the_run() {
        let tasks = vec![t("A", 0, 5, 6), t("B", 0, 5, 6)];
        let err = schedule(tasks).unwrap_err();
        assert_eq!(err.window, (0, 5));
        assert_eq!(err.density, Speed::new(12, 5));
        let names: Vec<&str> = err.members.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn decomposes_into_successive_critical_groups() {
        // [0, 2] is fully loaded and goes first at full speed; J2 is
        // then pushed after the consumed interval and runs at 3/8
        let tasks = vec![t("J1", 0, 2, 2), t("J2", 0, 10, 3)];
        let blocks = schedule(tasks).unwrap();
        let full = Speed::full();
        let slow = Speed::new(3, 8);
        let mut expected = vec![ub("J1", 0, full), ub("J1", 1, full)];
        expected.extend((2..10).map(|start| ub("J2", start, slow)));
        assert_eq!(blocks, expected);
    }

    struct Trace {
        groups: Vec<(Speed, (Instant, Instant), Vec<String>)>,
    }

    impl Observer for Trace {
        fn critical_group(&mut self, density: Speed, window: (Instant, Instant), members: &[Task]) {
            let names = members.iter().map(|t| t.name.clone()).collect();
            self.groups.push((density, window, names));
        }
    }

    #[test]
    fn observer_sees_each_iteration() {
        let tasks = vec![t("J1", 0, 2, 2), t("J2", 0, 10, 3)];
        let mut trace = Trace { groups: Vec::new() };
        schedule_with_observer(tasks, &mut trace).unwrap();
        assert_eq!(
            trace.groups,
            vec![
                (Speed::full(), (0, 2), vec!["J1".to_string()]),
                (Speed::new(3, 8), (2, 10), vec!["J2".to_string()]),
            ]
        );
    }

    #[test]
    fn observer_sees_the_offending_group_before_the_abort() {
        let tasks = vec![t("A", 0, 5, 6), t("B", 0, 5, 6)];
        let mut trace = Trace { groups: Vec::new() };
        let err = schedule_with_observer(tasks, &mut trace).unwrap_err();
        assert_eq!(trace.groups.len(), 1);
        assert_eq!(trace.groups[0].0, err.density);
    }
}
