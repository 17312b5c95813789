//! CSP variable types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::CspError;

/// A domain value.
pub type Value = i64;

/// Identifier of a variable within a [`Csp`](super::Csp).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position of the variable in its model.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A finite-domain variable.
///
/// The original domain is fixed at construction. The current domain is the
/// subset of original values that have not been pruned; it only changes
/// through [`prune`](Self::prune) and [`unprune`](Self::unprune).
///
/// While assigned, the current domain is the assigned value alone, or empty
/// if that value has been pruned.
///
/// # Examples
///
/// ```
/// use u_propagate::csp::Variable;
///
/// let mut v = Variable::new("x", [3, 1, 2, 3]);
/// assert_eq!(v.domain(), &[1, 2, 3]);
///
/// assert!(v.prune(2));
/// assert_eq!(v.current_domain(), vec![1, 3]);
///
/// v.assign(3).unwrap();
/// assert_eq!(v.current_domain(), vec![3]);
/// assert_eq!(v.current_domain_size(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    domain: Vec<Value>,
    active: Vec<bool>,
    active_count: usize,
    assigned: Option<Value>,
}

impl Variable {
    /// Creates a variable over the given values (sorted, duplicates dropped).
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        let mut domain: Vec<Value> = values.into_iter().collect();
        domain.sort_unstable();
        domain.dedup();
        let active = vec![true; domain.len()];
        Self {
            name: name.into(),
            active_count: domain.len(),
            domain,
            active,
            assigned: None,
        }
    }

    /// Creates a variable over the inclusive range `[min, max]`.
    pub fn range(name: impl Into<String>, min: Value, max: Value) -> Self {
        Self::new(name, min..=max)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original domain, in ascending order.
    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    /// Values still available, in ascending order.
    pub fn current_domain(&self) -> Vec<Value> {
        match self.assigned {
            Some(value) if self.is_active(value) => vec![value],
            Some(_) => Vec::new(),
            None => self
                .domain
                .iter()
                .zip(&self.active)
                .filter(|&(_, &active)| active)
                .map(|(&value, _)| value)
                .collect(),
        }
    }

    pub fn current_domain_size(&self) -> usize {
        match self.assigned {
            Some(value) => usize::from(self.is_active(value)),
            None => self.active_count,
        }
    }

    /// Whether `value` is in the current domain.
    pub fn in_current_domain(&self, value: Value) -> bool {
        match self.assigned {
            Some(assigned) => assigned == value && self.is_active(value),
            None => self.is_active(value),
        }
    }

    /// Whether `value` is in the original domain and not pruned, regardless
    /// of any assignment.
    pub fn is_active(&self, value: Value) -> bool {
        self.position(value).is_some_and(|i| self.active[i])
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    pub fn assigned_value(&self) -> Option<Value> {
        self.assigned
    }

    /// Removes `value` from the current domain.
    ///
    /// Returns `false` if the value is unknown or already pruned.
    pub fn prune(&mut self, value: Value) -> bool {
        match self.position(value) {
            Some(i) if self.active[i] => {
                self.active[i] = false;
                self.active_count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Restores a previously pruned `value`.
    ///
    /// Returns `false` if the value is unknown or not pruned.
    pub fn unprune(&mut self, value: Value) -> bool {
        match self.position(value) {
            Some(i) if !self.active[i] => {
                self.active[i] = true;
                self.active_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Assigns `value`, which must be in the current domain.
    pub fn assign(&mut self, value: Value) -> Result<(), CspError> {
        if !self.in_current_domain(value) {
            return Err(CspError::ValueNotInDomain {
                variable: self.name.clone(),
                value,
            });
        }
        self.assigned = Some(value);
        Ok(())
    }

    pub fn unassign(&mut self) {
        self.assigned = None;
    }

    fn position(&self, value: Value) -> Option<usize> {
        self.domain.binary_search(&value).ok()
    }
}
