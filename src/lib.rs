//! Constraint propagation for backtracking constraint satisfaction search.
//!
//! Provides the propagation step a backtracking solver runs after each
//! assignment:
//!
//! - **CSP model**: finite-domain variables with revocable pruning,
//!   constraints with full-tuple and support checks, and a container that
//!   indexes constraints by variable.
//! - **Plain checking**: verifies constraints that just became fully
//!   assigned.
//! - **Forward checking (FC)**: prunes values of the last unassigned
//!   variable of each touched constraint.
//! - **Generalized arc consistency (GAC)**: prunes every value without
//!   support, propagating removals through an arc queue until a fixpoint.
//!
//! # Architecture
//!
//! The crate does not choose variables or values and does not own the
//! search tree. A driver assigns a variable, calls
//! [`Propagator::propagate`](propagation::Propagator::propagate), and on
//! backtrack undoes the returned [`PruneLog`](propagation::PruneLog) and
//! unassigns.
//!
//! # Examples
//!
//! ```
//! use u_propagate::csp::{Csp, Variable};
//! use u_propagate::propagation::{PropagatorConfig, Strategy};
//!
//! let mut csp = Csp::new("triangle");
//! let vars: Vec<_> = ["a", "b", "c"]
//!     .iter()
//!     .map(|name| csp.add_variable(Variable::range(*name, 1, 3)))
//!     .collect();
//! csp.add_all_different("alldiff", vars.clone()).unwrap();
//! csp.add_predicate("a = 1", vec![vars[0]], |t| t[0] == 1).unwrap();
//!
//! let mut gac = PropagatorConfig::default()
//!     .with_strategy(Strategy::GeneralizedArcConsistency)
//!     .build();
//!
//! let initial = gac.propagate(&mut csp, None);
//! assert!(initial.is_consistent());
//! assert_eq!(csp.variable(vars[0]).current_domain(), vec![1]);
//! assert_eq!(csp.variable(vars[1]).current_domain(), vec![2, 3]);
//! ```

pub mod csp;
pub mod propagation;
