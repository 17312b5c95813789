//! Core trait and result types shared by all propagators.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::csp::{Csp, Value, VarId};

/// A single removed (variable, value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Prune {
    pub variable: VarId,
    pub value: Value,
}

impl fmt::Display for Prune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} != {}", self.variable, self.value)
    }
}

/// The undo list of one propagation call.
///
/// Every domain change a propagator makes goes through [`PruneLog::prune`],
/// so the log is always exactly the set of prunes in effect. Propagators use
/// [`checkpoint`](PruneLog::checkpoint) and
/// [`rollback_to`](PruneLog::rollback_to) to revoke the prunes of a single
/// step; a search driver calls [`undo`](PruneLog::undo) on backtrack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PruneLog {
    entries: Vec<Prune>,
}

impl PruneLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prune> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Prune] {
        &self.entries
    }

    /// Whether `value` of `variable` was pruned.
    pub fn contains(&self, variable: VarId, value: Value) -> bool {
        self.entries
            .iter()
            .any(|p| p.variable == variable && p.value == value)
    }

    /// Values pruned from `variable`, in pruning order.
    pub fn values_of(&self, variable: VarId) -> Vec<Value> {
        self.entries
            .iter()
            .filter(|p| p.variable == variable)
            .map(|p| p.value)
            .collect()
    }

    /// Prunes `value` from `variable` and records it.
    ///
    /// A value that is not currently active is neither changed nor recorded.
    pub(crate) fn prune(&mut self, csp: &mut Csp, variable: VarId, value: Value) {
        let changed = csp.prune(variable, value);
        debug_assert!(changed, "{variable} = {value} is not active");
        if changed {
            self.entries.push(Prune { variable, value });
        }
    }

    /// Position to roll back to.
    pub(crate) fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    /// Restores, newest first, every prune recorded after `checkpoint`.
    pub(crate) fn rollback_to(&mut self, csp: &mut Csp, checkpoint: usize) {
        for prune in self.entries.drain(checkpoint..).rev() {
            let _ = csp.unprune(prune.variable, prune.value);
        }
    }

    /// Restores every recorded prune, newest first.
    pub fn undo(mut self, csp: &mut Csp) {
        self.rollback_to(csp, 0);
    }
}

impl<'a> IntoIterator for &'a PruneLog {
    type Item = &'a Prune;
    type IntoIter = std::slice::Iter<'a, Prune>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for PruneLog {
    type Item = Prune;
    type IntoIter = std::vec::IntoIter<Prune>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Outcome of one [`Propagator::propagate`] call.
///
/// `pruned` lists the prunes still in effect after the call, whether or not
/// it succeeded. Undoing it restores the domains as they were before the
/// call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationResult {
    /// `false` when a dead end was detected.
    pub consistent: bool,
    /// Prunes to revoke on backtrack.
    pub pruned: PruneLog,
}

impl PropagationResult {
    pub fn consistent(pruned: PruneLog) -> Self {
        Self {
            consistent: true,
            pruned,
        }
    }

    pub fn inconsistent(pruned: PruneLog) -> Self {
        Self {
            consistent: false,
            pruned,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.consistent
    }
}

/// Counters accumulated by a propagator over its calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropagationStats {
    /// Number of `propagate` calls.
    pub calls: usize,
    /// Calls that reported a dead end.
    pub failures: usize,
    /// Support and full-tuple checks performed.
    pub support_checks: usize,
    /// Arcs taken off the queue (GAC only).
    pub arcs_revised: usize,
    /// Prunes returned to the caller.
    pub values_pruned: usize,
}

impl PropagationStats {
    pub(crate) fn record(&mut self, result: &PropagationResult) {
        self.calls += 1;
        if !result.consistent {
            self.failures += 1;
        }
        self.values_pruned += result.pruned.len();
    }
}

/// A propagation strategy invoked by a backtracking search driver.
///
/// The driver calls `propagate(csp, None)` once before search and
/// `propagate(csp, Some(var))` right after each tentative assignment of
/// `var`. On backtrack it undoes the returned [`PruneLog`].
///
/// # Examples
///
/// ```
/// use u_propagate::csp::{Csp, Variable};
/// use u_propagate::propagation::{ForwardChecking, Propagator};
///
/// let mut csp = Csp::new("pair");
/// let x = csp.add_variable(Variable::range("x", 1, 3));
/// let y = csp.add_variable(Variable::range("y", 1, 3));
/// csp.add_all_different("x != y", vec![x, y]).unwrap();
///
/// let mut fc = ForwardChecking::new();
/// csp.assign(x, 1).unwrap();
/// let result = fc.propagate(&mut csp, Some(x));
/// assert!(result.is_consistent());
/// assert!(result.pruned.contains(y, 1));
///
/// result.pruned.undo(&mut csp);
/// csp.unassign(x);
/// assert_eq!(csp.variable(y).current_domain(), vec![1, 2, 3]);
/// ```
pub trait Propagator {
    /// Short identifier of the strategy.
    fn name(&self) -> &'static str;

    /// Propagates the consequences of assigning `new_var`, or establishes
    /// initial consistency when `new_var` is `None`.
    fn propagate(&mut self, csp: &mut Csp, new_var: Option<VarId>) -> PropagationResult;

    fn stats(&self) -> &PropagationStats;

    fn reset_stats(&mut self);
}
