//! Forward checking.
//!
//! After an assignment, every constraint touching the assigned variable is
//! checked for support of the assigned value, and constraints left with a
//! single unassigned variable have that variable's unsupported values
//! pruned.
//!
//! Before any assignment, variables carrying a unary constraint lose every
//! value that has no support in some constraint containing them.

use log::{debug, trace};

use super::targets;
use super::types::{PropagationResult, PropagationStats, Propagator, PruneLog};
use crate::csp::{ConstraintId, Csp, Value, VarId};

/// Forward checking propagator.
#[derive(Debug, Clone, Default)]
pub struct ForwardChecking {
    stats: PropagationStats,
}

impl ForwardChecking {
    pub fn new() -> Self {
        Self::default()
    }

    fn propagate_assignment(&mut self, csp: &mut Csp, var: VarId, pruned: &mut PruneLog) -> bool {
        let assigned = csp.variable(var).assigned_value();
        if assigned.is_none() {
            debug!(target: targets::FORWARD_CHECKING, "{var} is not assigned");
        }

        let constraints = csp.constraints_containing(var).to_vec();
        for c in constraints {
            if let Some(value) = assigned {
                self.stats.support_checks += 1;
                if !csp.has_support(c, var, value) {
                    debug!(
                        target: targets::FORWARD_CHECKING,
                        "{} = {value} has no support in {}",
                        csp.variable(var).name(),
                        csp.constraint(c).name()
                    );
                    return false;
                }
            }

            if csp.unassigned_count(c) != 1 {
                continue;
            }
            let last = csp
                .scope(c)
                .iter()
                .copied()
                .find(|&v| !csp.variable(v).is_assigned());
            if let Some(last) = last {
                if !self.revise(csp, c, last, pruned) {
                    return false;
                }
            }
        }
        true
    }

    /// Prunes the values of `var` without support in `constraint`. On
    /// wipeout, restores exactly those values and returns `false`.
    fn revise(
        &mut self,
        csp: &mut Csp,
        constraint: ConstraintId,
        var: VarId,
        pruned: &mut PruneLog,
    ) -> bool {
        let checkpoint = pruned.checkpoint();
        for value in csp.variable(var).current_domain() {
            self.stats.support_checks += 1;
            if !csp.has_support(constraint, var, value) {
                trace!(
                    target: targets::FORWARD_CHECKING,
                    "prune {} = {value} ({})",
                    csp.variable(var).name(),
                    csp.constraint(constraint).name()
                );
                pruned.prune(csp, var, value);
            }
        }

        if csp.variable(var).current_domain_size() == 0 {
            pruned.rollback_to(csp, checkpoint);
            debug!(
                target: targets::FORWARD_CHECKING,
                "domain of {} wiped out by {}",
                csp.variable(var).name(),
                csp.constraint(constraint).name()
            );
            return false;
        }
        true
    }

    fn propagate_unary(&mut self, csp: &mut Csp, pruned: &mut PruneLog) -> bool {
        let mut visited: Vec<VarId> = Vec::new();
        for c in csp.constraints_of_arity(1) {
            let &[var] = csp.scope(c) else {
                continue;
            };
            if visited.contains(&var) {
                continue;
            }
            visited.push(var);

            let checkpoint = pruned.checkpoint();
            for value in csp.variable(var).current_domain() {
                if !self.value_supported(csp, var, value) {
                    trace!(
                        target: targets::FORWARD_CHECKING,
                        "prune {} = {value} before search",
                        csp.variable(var).name()
                    );
                    pruned.prune(csp, var, value);
                }
            }

            if csp.variable(var).current_domain_size() == 0 {
                pruned.rollback_to(csp, checkpoint);
                debug!(
                    target: targets::FORWARD_CHECKING,
                    "no value of {} satisfies its constraints",
                    csp.variable(var).name()
                );
                return false;
            }
        }
        true
    }

    /// Whether `var = value` keeps every constraint on `var` supported, i.e.
    /// assigning it would not fail immediately.
    fn value_supported(&mut self, csp: &Csp, var: VarId, value: Value) -> bool {
        csp.constraints_containing(var).iter().all(|&c| {
            self.stats.support_checks += 1;
            csp.has_support(c, var, value)
        })
    }
}

impl Propagator for ForwardChecking {
    fn name(&self) -> &'static str {
        "fc"
    }

    fn propagate(&mut self, csp: &mut Csp, new_var: Option<VarId>) -> PropagationResult {
        let mut pruned = PruneLog::new();
        let consistent = match new_var {
            Some(var) => self.propagate_assignment(csp, var, &mut pruned),
            None => self.propagate_unary(csp, &mut pruned),
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
