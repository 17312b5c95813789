//! Constraint propagation.
//!
//! Three interchangeable strategies for filtering domains inside a
//! backtracking search. Each is called once before search with no variable
//! and then after every tentative assignment; each returns whether the
//! current state may still lead to a solution together with the exact list
//! of prunes it left in effect.
//!
//! - **Plain** ([`PlainPropagator`]): checks constraints whose scope just
//!   became fully assigned. Never prunes.
//! - **Forward checking** ([`ForwardChecking`]): prunes the last unassigned
//!   variable of each constraint touched by the assignment.
//! - **GAC** ([`GacPropagator`]): maintains generalized arc consistency
//!   with an arc work queue, propagating each pruning to its neighbours.
//!
//! On every instance GAC prunes at least as much as forward checking, which
//! prunes at least as much as plain checking.
//!
//! # Undo discipline
//!
//! Every prune is recorded in a [`PruneLog`]. When a propagator detects a
//! wipeout it restores the prunes of the failing step only; prunes made
//! earlier in the same call stay in effect and in the returned log, which
//! the driver undoes on backtrack.
//!
//! # Logging
//!
//! Propagators log through the `log` facade under the targets in
//! [`targets`]: `debug` for dead ends, `trace` for individual prunes.

mod config;
mod forward_checking;
mod gac;
mod plain;
mod types;

pub use config::{ArcOrder, PropagatorConfig, Strategy};
pub use forward_checking::ForwardChecking;
pub use gac::GacPropagator;
pub use plain::PlainPropagator;
pub use types::{PropagationResult, PropagationStats, Propagator, Prune, PruneLog};

/// Log targets.
pub mod targets {
    pub const PLAIN: &str = "propagation::plain";
    pub const FORWARD_CHECKING: &str = "propagation::fc";
    pub const GAC: &str = "propagation::gac";
}
