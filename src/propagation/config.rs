//! Propagator selection.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::forward_checking::ForwardChecking;
use super::gac::GacPropagator;
use super::plain::PlainPropagator;
use super::types::Propagator;

/// Which propagation strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Check fully assigned constraints only.
    Plain,
    /// Prune the last unassigned variable of each touched constraint.
    ForwardChecking,
    /// Maintain generalized arc consistency.
    #[default]
    GeneralizedArcConsistency,
}

/// Order in which GAC takes arcs off its queue.
///
/// The fixpoint reached does not depend on the order, only the amount of
/// work spent reaching it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArcOrder {
    /// Oldest arc first.
    #[default]
    Fifo,
    /// Newest arc first.
    Lifo,
}

/// Configuration for building a [`Propagator`].
///
/// # Examples
///
/// ```
/// use u_propagate::propagation::{ArcOrder, PropagatorConfig, Strategy};
///
/// let config = PropagatorConfig::default()
///     .with_strategy(Strategy::ForwardChecking)
///     .with_arc_order(ArcOrder::Lifo);
/// assert_eq!(config.strategy, Strategy::ForwardChecking);
///
/// let propagator = config.build();
/// assert_eq!(propagator.name(), "fc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropagatorConfig {
    /// Propagation strategy.
    pub strategy: Strategy,
    /// Arc queue order, used by GAC.
    pub arc_order: ArcOrder,
}

impl PropagatorConfig {
    /// Sets the propagation strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the GAC arc queue order.
    pub fn with_arc_order(mut self, order: ArcOrder) -> Self {
        self.arc_order = order;
        self
    }

    /// Creates the configured propagator.
    pub fn build(&self) -> Box<dyn Propagator> {
        match self.strategy {
            Strategy::Plain => Box::new(PlainPropagator::new()),
            Strategy::ForwardChecking => Box::new(ForwardChecking::new()),
            Strategy::GeneralizedArcConsistency => {
                Box::new(GacPropagator::new().with_arc_order(self.arc_order))
            }
        }
    }
}
