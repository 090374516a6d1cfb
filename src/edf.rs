/*! Speed-scaled *earliest-deadline-first* (**EDF**) simulation

This module turns one critical group into concrete execution blocks
by simulating EDF dispatch at the group's uniform speed, one discrete
time unit at a time.
*/

use std::fmt;

use crate::speed::Speed;
use crate::task::Task;
use crate::time::{Duration, Instant};

/// One committed slice of the output schedule: the named task runs
/// from `start` for `duration` time units at relative speed `speed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionBlock {
    /// Identifier of the task being executed.
    pub task: String,
    /// The time at which the slice begins.
    pub start: Instant,
    /// The length of the slice: always one unit as produced by
    /// [run_edf], possibly longer after [coalesce].
    pub duration: Duration,
    /// The processor speed during the slice, as a fraction of full
    /// capacity.
    pub speed: Speed,
}

impl fmt::Display for ExecutionBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "schedule task {} at time {} for {} time units with {:.2}% processing speed",
            self.task,
            self.start,
            self.duration,
            self.speed.as_fraction() * 100.0
        )
    }
}

/// Simulate the execution of one critical group at the uniform
/// relative speed `g`, dispatching ready tasks in EDF order.
///
/// The simulation assumes that:
///
/// 1. the group runs alone on a single processor slowed to speed `g`,
/// 2. each task's remaining computation therefore takes
///    `floor(remaining / g)` whole time units, and
/// 3. deadline ties are broken by task identifier, so the resulting
///    schedule is deterministic.
///
/// Execution proceeds in unit steps starting at time zero: each step
/// either emits one single-unit [ExecutionBlock] for the ready task
/// with the earliest deadline, or, if no task has been released yet,
/// lets the clock advance silently. A task is retired the instant
/// its scaled computation is exhausted; a task whose scaled
/// computation is zero to begin with retires before the clock starts
/// and contributes no blocks.
///
/// Blocks are not merged across consecutive steps; see [coalesce]
/// for the presentation-side post-processing.
pub fn run_edf(mut group: Vec<Task>, g: Speed) -> Vec<ExecutionBlock> {
    for task in &mut group {
        task.remaining = g.time_needed(task.remaining);
    }
    group.retain(|task| task.remaining > 0);

    let mut schedule = Vec::new();
    let mut now: Instant = 0;
    while !group.is_empty() {
        let next = group
            .iter()
            .enumerate()
            .filter(|(_, task)| task.release <= now)
            .min_by(|(_, x), (_, y)| {
                x.deadline
                    .cmp(&y.deadline)
                    .then_with(|| x.name.cmp(&y.name))
            })
            .map(|(i, _)| i);
        if let Some(i) = next {
            group[i].remaining -= 1;
            schedule.push(ExecutionBlock {
                task: group[i].name.clone(),
                start: now,
                duration: 1,
                speed: g,
            });
            if group[i].remaining == 0 {
                group.swap_remove(i);
            }
        }
        now += 1;
    }
    schedule
}

/// Merge runs of adjacent blocks that execute the same task at the
/// same speed and are contiguous in time, summing their durations.
///
/// This is the post-processing step consumers apply when they want
/// coalesced intervals instead of the simulator's unit-granularity
/// output. Non-adjacent or different-speed blocks are never merged.
pub fn coalesce(blocks: impl IntoIterator<Item = ExecutionBlock>) -> Vec<ExecutionBlock> {
    let mut merged: Vec<ExecutionBlock> = Vec::new();
    for block in blocks {
        match merged.last_mut() {
            Some(prev)
                if prev.task == block.task
                    && prev.speed == block.speed
                    && prev.start + prev.duration == block.start =>
            {
                prev.duration += block.duration
            }
            _ => merged.push(block),
        }
    }
    merged
}
