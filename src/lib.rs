/*! Energy-minimizing speed scaling for real-time task sets

This crate computes offline, speed-scaled execution schedules for
sets of real-time tasks, each described by a release time, a
deadline, and a required amount of computation. Scheduling proceeds
by *critical-interval decomposition*: repeatedly isolate the
sub-interval of time with the highest computation density, dispatch
the tasks confined to it at the minimal feasible uniform processor
speed under *earliest-deadline-first* (**EDF**) order, clip the
windows of the remaining tasks around the consumed interval, and
iterate until no tasks remain.

The entry point is [decomposition::schedule]; task sets can be
constructed directly from [task::Task] values or parsed from the
text format understood by [input::parse_task_set].

## Citation

The decomposition method is due to:

- F. Yao, A. Demers, and S. Shenker, “[A Scheduling Model for Reduced CPU Energy](https://doi.org/10.1109/SFCS.1995.492478)”, *Proceedings of the 36th Annual Symposium on Foundations of Computer Science (FOCS 1995)*, pp.&nbsp;374–382, October 1995.
*/

pub mod analysis;
pub mod decomposition;
pub mod edf;
pub mod input;
pub mod speed;
pub mod task;
pub mod time;
