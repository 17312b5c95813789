//! Generalized arc consistency.
//!
//! # Algorithm
//!
//! 1. Check the newly assigned value against every constraint containing it
//! 2. Seed the queue with one arc per (scope variable, constraint) for the
//!    constraints containing the new variable, or for all constraints on
//!    the initial call
//! 3. Pop an arc `(X, C)` and prune each value of `X` without support in `C`
//! 4. If anything was pruned, enqueue `(Y, C')` for every constraint `C'`
//!    containing `X` and every other `Y` in its scope
//! 5. Fail on the first wipeout, restoring only that revision's prunes
//! 6. Stop when the queue is empty
//!
//! Each re-enqueue follows an actual removal from a finite domain, so the
//! loop terminates.
//!
//! # Reference
//!
//! Mackworth, A. K. (1977). "Consistency in Networks of Relations",
//! *Artificial Intelligence* 8(1), 99-118.
//! Bessière, C. (2006). "Constraint Propagation", in *Handbook of
//! Constraint Programming*, ch. 3.

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use super::config::ArcOrder;
use super::targets;
use super::types::{PropagationResult, PropagationStats, Propagator, PruneLog};
use crate::csp::{ConstraintId, Csp, VarId};

/// Does every value of `target` have support in `constraint`?
///
/// The other variables of the arc are the rest of the constraint's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ConstraintArc {
    target: VarId,
    constraint: ConstraintId,
}

/// Arc work list that never holds the same arc twice.
#[derive(Debug)]
struct ArcQueue {
    order: ArcOrder,
    arcs: VecDeque<ConstraintArc>,
    present: HashSet<ConstraintArc>,
}

impl ArcQueue {
    fn new(order: ArcOrder) -> Self {
        Self {
            order,
            arcs: VecDeque::new(),
            present: HashSet::new(),
        }
    }

    fn push(&mut self, arc: ConstraintArc) {
        if self.present.insert(arc) {
            self.arcs.push_back(arc);
        }
    }

    /// Enqueues one arc per variable of `constraint`'s scope except `skip`.
    fn push_constraint(&mut self, csp: &Csp, constraint: ConstraintId, skip: Option<VarId>) {
        for &target in csp.scope(constraint) {
            if Some(target) != skip {
                self.push(ConstraintArc { target, constraint });
            }
        }
    }

    fn pop(&mut self) -> Option<ConstraintArc> {
        let arc = match self.order {
            ArcOrder::Fifo => self.arcs.pop_front(),
            ArcOrder::Lifo => self.arcs.pop_back(),
        }?;
        self.present.remove(&arc);
        Some(arc)
    }

    fn len(&self) -> usize {
        self.arcs.len()
    }
}

/// Generalized arc consistency propagator.
#[derive(Debug, Clone, Default)]
pub struct GacPropagator {
    order: ArcOrder,
    stats: PropagationStats,
}

impl GacPropagator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the order arcs are taken off the queue.
    pub fn with_arc_order(mut self, order: ArcOrder) -> Self {
        self.order = order;
        self
    }

    pub fn arc_order(&self) -> ArcOrder {
        self.order
    }

    /// Checks `var`'s assigned value against every constraint containing it.
    fn assignment_supported(&mut self, csp: &Csp, var: VarId) -> bool {
        let Some(value) = csp.variable(var).assigned_value() else {
            debug!(target: targets::GAC, "{var} is not assigned");
            return true;
        };
        for &c in csp.constraints_containing(var) {
            self.stats.support_checks += 1;
            if !csp.has_support(c, var, value) {
                debug!(
                    target: targets::GAC,
                    "{} = {value} has no support in {}",
                    csp.variable(var).name(),
                    csp.constraint(c).name()
                );
                return false;
            }
        }
        true
    }

    /// Runs the queue to a fixpoint. Returns `false` on the first wipeout.
    fn enforce(&mut self, csp: &mut Csp, queue: &mut ArcQueue, pruned: &mut PruneLog) -> bool {
        while let Some(arc) = queue.pop() {
            self.stats.arcs_revised += 1;
            let ConstraintArc { target, constraint } = arc;

            let checkpoint = pruned.checkpoint();
            for value in csp.variable(target).current_domain() {
                self.stats.support_checks += 1;
                if !csp.has_support(constraint, target, value) {
                    trace!(
                        target: targets::GAC,
                        "prune {} = {value} ({})",
                        csp.variable(target).name(),
                        csp.constraint(constraint).name()
                    );
                    pruned.prune(csp, target, value);
                }
            }

            if csp.variable(target).current_domain_size() == 0 {
                pruned.rollback_to(csp, checkpoint);
                debug!(
                    target: targets::GAC,
                    "domain of {} wiped out by {} ({} arcs left)",
                    csp.variable(target).name(),
                    csp.constraint(constraint).name(),
                    queue.len()
                );
                return false;
            }

            if pruned.checkpoint() > checkpoint {
                for &c in csp.constraints_containing(target) {
                    queue.push_constraint(csp, c, Some(target));
                }
            }
        }
        true
    }
}

impl Propagator for GacPropagator {
    fn name(&self) -> &'static str {
        "gac"
    }

    fn propagate(&mut self, csp: &mut Csp, new_var: Option<VarId>) -> PropagationResult {
        let mut pruned = PruneLog::new();
        let mut queue = ArcQueue::new(self.order);

        let consistent = match new_var {
            Some(var) if !self.assignment_supported(csp, var) => false,
            Some(var) => {
                for &c in csp.constraints_containing(var) {
                    queue.push_constraint(csp, c, None);
                }
                self.enforce(csp, &mut queue, &mut pruned)
            }
            None => {
                for c in csp.all_constraints() {
                    queue.push_constraint(csp, c, None);
                }
                self.enforce(csp, &mut queue, &mut pruned)
            }
        };

        let result = if consistent {
            PropagationResult::consistent(pruned)
        } else {
            PropagationResult::inconsistent(pruned)
        };
        self.stats.record(&result);
        result
    }

    fn stats(&self) -> &PropagationStats {
        &self.stats
    }

    fn reset_stats(&mut self) {
        self.stats = PropagationStats::default();
    }
}
