//! Constraint types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::variables::{Value, VarId, Variable};

/// Identifier of a constraint within a [`Csp`](super::Csp).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintId(pub(crate) usize);

impl ConstraintId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A constraint over an ordered scope of variables.
///
/// Implementors provide the scope and a full-tuple check. Support queries
/// come for free through a depth-first search over the current domains of
/// the other scope variables; constraints with a cheaper dedicated
/// algorithm can override [`has_support`](Constraint::has_support).
pub trait Constraint: fmt::Debug {
    /// Human-readable name, used in errors and logs.
    fn name(&self) -> &str;

    /// The ordered scope.
    fn scope(&self) -> &[VarId];

    /// Whether a full tuple, aligned with [`scope`](Constraint::scope),
    /// satisfies the constraint.
    fn satisfies(&self, tuple: &[Value]) -> bool;

    /// Whether `var = value` extends to a satisfying tuple using only the
    /// current domains of the other scope variables.
    ///
    /// `variables` is indexed by [`VarId::index`]. Returns `false` when `var`
    /// is not in the scope.
    fn has_support(&self, variables: &[Variable], var: VarId, value: Value) -> bool {
        let scope = self.scope();
        let Some(position) = scope.iter().position(|&v| v == var) else {
            return false;
        };

        let domains: Vec<Vec<Value>> = scope
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if i == position {
                    vec![value]
                } else {
                    variables[v.index()].current_domain()
                }
            })
            .collect();

        let mut tuple = Vec::with_capacity(scope.len());
        extend_support(self, &domains, &mut tuple)
    }
}

/// Tries every value of the next scope position, one at a time, until the
/// tuple is complete and satisfying.
fn extend_support<C: Constraint + ?Sized>(
    constraint: &C,
    domains: &[Vec<Value>],
    tuple: &mut Vec<Value>,
) -> bool {
    let depth = tuple.len();
    if depth == domains.len() {
        return constraint.satisfies(tuple);
    }

    for &value in &domains[depth] {
        tuple.push(value);
        let found = extend_support(constraint, domains, tuple);
        tuple.pop();
        if found {
            return true;
        }
    }
    false
}

/// All variables in the scope take pairwise distinct values.
///
/// A two-variable instance is the usual `x != y`.
#[derive(Debug, Clone)]
pub struct AllDifferent {
    name: String,
    scope: Vec<VarId>,
}

impl AllDifferent {
    pub fn new(name: impl Into<String>, scope: Vec<VarId>) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }
}

impl Constraint for AllDifferent {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> &[VarId] {
        &self.scope
    }

    fn satisfies(&self, tuple: &[Value]) -> bool {
        tuple
            .iter()
            .enumerate()
            .all(|(i, a)| tuple[i + 1..].iter().all(|b| a != b))
    }
}

type Predicate = Box<dyn Fn(&[Value]) -> bool + Send + Sync>;

/// A constraint defined by an arbitrary predicate over full tuples.
///
/// # Examples
///
/// ```
/// use u_propagate::csp::{Constraint, PredicateConstraint, Csp, Variable};
///
/// let mut csp = Csp::new("sum");
/// let x = csp.add_variable(Variable::range("x", 0, 3));
/// let y = csp.add_variable(Variable::range("y", 0, 3));
///
/// let sum = PredicateConstraint::new("x + y = 3", vec![x, y], |t| t[0] + t[1] == 3);
/// assert!(sum.satisfies(&[1, 2]));
/// assert!(!sum.satisfies(&[2, 2]));
/// assert!(sum.has_support(csp.variables(), x, 0));
/// ```
pub struct PredicateConstraint {
    name: String,
    scope: Vec<VarId>,
    predicate: Predicate,
}

impl PredicateConstraint {
    pub fn new<F>(name: impl Into<String>, scope: Vec<VarId>, predicate: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            scope,
            predicate: Box::new(predicate),
        }
    }
}

impl fmt::Debug for PredicateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateConstraint")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl Constraint for PredicateConstraint {
    fn name(&self) -> &str {
        &self.name
    }

    fn scope(&self) -> &[VarId] {
        &self.scope
    }

    fn satisfies(&self, tuple: &[Value]) -> bool {
        (self.predicate)(tuple)
    }
}
