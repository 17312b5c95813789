//! Constraint satisfaction problem model.
//!
//! Provides the collaborator layer the propagators work against: finite
//! domain variables with revocable pruning, constraints with full-tuple and
//! support checks, and a container indexing constraints by variable.
//!
//! # Key Components
//!
//! - **Variables**: [`Variable`] (original domain, current domain, assignment)
//! - **Constraints**: [`Constraint`] trait, [`AllDifferent`], [`PredicateConstraint`]
//! - **Model**: [`Csp`] (variables, constraints, variable-to-constraint index)
//! - **Instances**: [`RandomCspConfig`] (seeded random binary CSPs)
//!
//! # Design
//!
//! Variables and constraints live in arenas and are referred to by
//! [`VarId`] and [`ConstraintId`]. Support is computed on demand from
//! current domains; no allowed-tuple tables are stored.
//!
//! # References
//!
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

mod constraints;
mod error;
mod model;
mod random;
mod variables;

pub use constraints::{AllDifferent, Constraint, ConstraintId, PredicateConstraint};
pub use error::CspError;
pub use model::Csp;
pub use random::RandomCspConfig;
pub use variables::{Value, VarId, Variable};
