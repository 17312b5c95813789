//! Plain backtracking checks.

use log::debug;

use super::targets;
use super::types::{PropagationResult, PropagationStats, Propagator, PruneLog};
use crate::csp::{Csp, VarId};

/// Checks the constraints made fully assigned by the latest assignment.
///
/// Never prunes. The initial call (`new_var == None`) does nothing.
#[derive(Debug, Clone, Default)]
pub struct PlainPropagator {
    stats: PropagationStats,
}

impl PlainPropagator {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&mut self, csp: &Csp, var: VarId) -> bool {
        for &c in csp.constraints_containing(var) {
            let Some(tuple) = csp.assigned_tuple(c) else {
                continue;
            };
            self.stats.support_checks += 1;
            if !csp.satisfies(c, &tuple) {
                debug!(
                    target: targets::PLAIN,
                    "{} violated by {:?} after assigning {}",
                    csp.constraint(c).name(),
                    tuple,
                    csp.variable(var).name()
                );
                return false;
            }
        }
        true
    }
}

impl Propagator for PlainPropagator {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn propagate(&mut self, csp: &mut Csp, new_var: Option<VarId>) -> PropagationResult {
        let consistent = match new_var {
            Some(var) => self.check(csp, var),
            None => true,
        };
        let result = if consistent {
            PropagationResult::consistent(PruneLog::new())
        } else {
            PropagationResult::inconsistent(PruneLog::new())
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
