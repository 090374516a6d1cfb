/*! An exact representation of processor speeds and computation densities */

use std::cmp::Ordering;

use derive_more::Display;

use crate::time::{Duration, Service, Time};

/// A processor speed (equivalently, a computation density): the
/// ratio of an amount of required service to an interval length,
/// kept in lowest terms.
///
/// Speeds are expressed relative to full processor capacity, so a
/// feasible speed lies in `[0, 1]`. The ratio is held as a pair of
/// integers rather than as a float because the critical-group search
/// compares densities for exact equality when resolving ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}/{}", service, length)]
pub struct Speed {
    service: Service,
    length: Duration,
}

impl Speed {
    /// Construct the minimal speed at which `service` units of
    /// computation fit into an interval of positive `length`.
    pub fn new(service: Service, length: Duration) -> Self {
        assert!(length > 0);
        let common = gcd(service, length);
        Speed {
            service: service / common,
            length: length / common,
        }
    }

    /// Full processor capacity.
    pub fn full() -> Self {
        Speed {
            service: 1,
            length: 1,
        }
    }

    /// Can a single processor sustain this speed, i.e., is the
    /// ratio at most one?
    pub fn is_feasible(self) -> bool {
        self.service <= self.length
    }

    /// Does this speed demand no service at all?
    pub fn is_zero(self) -> bool {
        self.service == 0
    }

    /// The number of whole time units needed to complete `work`
    /// units of computation at this speed, i.e., `floor(work / g)`.
    ///
    /// Zero work completes instantly at any speed, including the
    /// zero speed of an all-idle group. Nonzero work at zero speed
    /// is a precondition violation.
    pub fn time_needed(self, work: Service) -> Duration {
        if work == 0 {
            return 0;
        }
        debug_assert!(!self.is_zero());
        // widen to avoid overflow in the intermediate product
        (work as u128 * self.length as u128 / self.service as u128) as Duration
    }

    /// The ratio as a floating-point fraction of full capacity.
    /// Intended for rendering only; no scheduling decision is ever
    /// based on this value.
    pub fn as_fraction(self) -> f64 {
        self.service as f64 / self.length as f64
    }
}

impl PartialOrd for Speed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Speed {
    fn cmp(&self, other: &Self) -> Ordering {
        // cross-multiply; lengths are always positive
        let lhs = self.service as u128 * other.length as u128;
        let rhs = other.service as u128 * self.length as u128;
        lhs.cmp(&rhs)
    }
}

fn gcd(a: Service, b: Duration) -> Time {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let rest = a % b;
        a = b;
        b = rest;
    }
    a
}
