/*! The task model: one schedulable unit of work with a release time,
a deadline, and a remaining computation requirement */

use derive_more::Display;
use thiserror::Error;

use crate::time::{Duration, Instant, Service};

/// Error type returned when a task's window is degenerate, i.e.,
/// when its deadline does not lie strictly after its release.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("task {name} has an empty window [{release}, {deadline}]")]
pub struct InvalidTaskWindow {
    pub name: String,
    pub release: Instant,
    pub deadline: Instant,
}

/// One schedulable unit of work: `remaining` units of computation
/// (measured at full processor speed) that must be performed within
/// the window `[release, deadline]`.
///
/// The window is not fixed for all time: the decomposition driver
/// clips the windows of not-yet-dispatched tasks around each
/// consumed critical interval, and the EDF simulator draws down
/// `remaining` while the task's group executes.
///
/// Rendered as `NAME (release, deadline, remaining)`, the same shape
/// the task-set text format uses (see [crate::input]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{} ({}, {}, {})", name, release, deadline, remaining)]
pub struct Task {
    /// The task's identifier, unique within one task set.
    pub name: String,
    /// The earliest time at which the task may begin executing.
    pub release: Instant,
    /// The time by which the task's execution must be complete.
    pub deadline: Instant,
    /// The computation still required.
    pub remaining: Service,
}

impl Task {
    /// Construct a task, rejecting windows in which no work could
    /// possibly be done.
    pub fn new(
        name: impl Into<String>,
        release: Instant,
        deadline: Instant,
        computation: Service,
    ) -> Result<Self, InvalidTaskWindow> {
        let name = name.into();
        if deadline <= release {
            Err(InvalidTaskWindow {
                name,
                release,
                deadline,
            })
        } else {
            Ok(Task {
                name,
                release,
                deadline,
                remaining: computation,
            })
        }
    }

    /// The task's current window.
    pub fn window(&self) -> (Instant, Instant) {
        (self.release, self.deadline)
    }

    /// The length of the task's current window.
    pub fn window_length(&self) -> Duration {
        self.deadline - self.release
    }
}
