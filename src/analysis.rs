/*! Critical-group detection and schedulability verification

This module locates the *critical interval* of a task set: the
sub-interval of time whose confined tasks exhibit the highest
feasible computation density. The density of the critical interval is
the minimal uniform processor speed at which those tasks can all meet
their deadlines, which is what makes it the natural starting point
for an energy-minimizing schedule.
*/

use itertools::Itertools;

use crate::speed::Speed;
use crate::task::Task;
use crate::time::{Instant, Service};

/// The tight window around a set of tasks: the earliest release and
/// the latest deadline among them.
///
/// Meaningless for an empty set; callers must guarantee at least one
/// task.
pub fn task_set_window<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> (Instant, Instant) {
    tasks
        .into_iter()
        .fold((Instant::MAX, 0), |(a, b), task| {
            (a.min(task.release), b.max(task.deadline))
        })
}

/// Check that a group's aggregate demand fits into the given window.
///
/// The driver consults this before dispatching a critical group; a
/// `false` answer means no schedule exists for the input as a whole.
pub fn is_schedulable<'a>(
    group: impl IntoIterator<Item = &'a Task>,
    window: (Instant, Instant),
) -> bool {
    let (a, b) = window;
    let demand: Service = group.into_iter().map(|task| task.remaining).sum();
    demand <= b - a
}

/// Find the critical group of a task set: across all candidate
/// intervals `[a, b]` spanned by a release and a later deadline, the
/// group of fully contained tasks with the maximum feasible (at most
/// one) computation density.
///
/// Returns the winning density together with the indices of the
/// group's members in `tasks`, in ascending order, or `None` if
/// `tasks` is empty.
///
/// Candidate boundaries are enumerated in ascending numeric order,
/// and a candidate whose density *equals* the incumbent's replaces
/// it, so ties go to the latest interval in that order. Both halves
/// of this rule are part of the contract: they make the result
/// deterministic and reproducible.
///
/// If no candidate is feasible, the first candidate enumerated is
/// returned so that the infeasibility surfaces through
/// [is_schedulable] with the offending tasks attached.
///
/// The sweep examines every boundary pair against every task, i.e.,
/// O(|releases| · |deadlines| · |tasks|). This is an offline
/// analysis over small task sets; the brute force is deliberate.
pub fn find_critical_group(tasks: &[Task]) -> Option<(Speed, Vec<usize>)> {
    let releases: Vec<Instant> = tasks.iter().map(|task| task.release).sorted().dedup().collect();
    let deadlines: Vec<Instant> = tasks.iter().map(|task| task.deadline).sorted().dedup().collect();

    let mut best: Option<(Speed, Vec<usize>)> = None;
    for &a in &releases {
        for &b in deadlines.iter().filter(|&&b| b > a) {
            let members: Vec<usize> = tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| a <= task.release && task.deadline <= b)
                .map(|(i, _)| i)
                .collect();
            if members.is_empty() {
                continue;
            }
            let demand: Service = members.iter().map(|&i| tasks[i].remaining).sum();
            let density = Speed::new(demand, b - a);
            let replace = match &best {
                // the first candidate doubles as the infeasible fallback
                None => true,
                Some((incumbent, _)) => {
                    density.is_feasible() && (!incumbent.is_feasible() || density >= *incumbent)
                }
            };
            if replace {
                best = Some((density, members));
            }
        }
    }
    best
}
