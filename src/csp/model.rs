//! CSP model definition.

use super::constraints::{AllDifferent, Constraint, ConstraintId, PredicateConstraint};
use super::error::CspError;
use super::variables::{Value, VarId, Variable};

/// A constraint satisfaction problem.
///
/// Owns the variables and constraints and keeps, for every variable, the
/// list of constraints whose scope contains it. Propagators read and prune
/// domains through this type; a search driver assigns and unassigns through
/// it.
///
/// # Examples
///
/// ```
/// use u_propagate::csp::{Csp, Variable};
///
/// let mut csp = Csp::new("example");
/// let x = csp.add_variable(Variable::range("x", 1, 3));
/// let y = csp.add_variable(Variable::range("y", 1, 3));
/// let c = csp.add_all_different("x != y", vec![x, y]).unwrap();
///
/// assert_eq!(csp.constraints_containing(x), &[c]);
/// assert_eq!(csp.unassigned_count(c), 2);
///
/// csp.assign(x, 1).unwrap();
/// assert_eq!(csp.unassigned_count(c), 1);
/// assert!(!csp.has_support(c, y, 1));
/// ```
#[derive(Debug)]
pub struct Csp {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Box<dyn Constraint>>,
    by_variable: Vec<Vec<ConstraintId>>,
}

impl Csp {
    /// Creates an empty problem.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            by_variable: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a variable and returns its identifier.
    pub fn add_variable(&mut self, variable: Variable) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(variable);
        self.by_variable.push(Vec::new());
        id
    }

    /// Adds a constraint and indexes it under each scope variable.
    ///
    /// The scope must be non-empty, refer to known variables, and mention
    /// each variable once.
    pub fn add_constraint(
        &mut self,
        constraint: impl Constraint + 'static,
    ) -> Result<ConstraintId, CspError> {
        let scope = constraint.scope();
        if scope.is_empty() {
            return Err(CspError::EmptyScope {
                constraint: constraint.name().to_string(),
            });
        }
        for (i, &var) in scope.iter().enumerate() {
            if var.index() >= self.variables.len() {
                return Err(CspError::UnknownVariable(var));
            }
            if scope[..i].contains(&var) {
                return Err(CspError::DuplicateInScope {
                    constraint: constraint.name().to_string(),
                    variable: var,
                });
            }
        }

        let id = ConstraintId(self.constraints.len());
        for &var in scope {
            self.by_variable[var.index()].push(id);
        }
        self.constraints.push(Box::new(constraint));
        Ok(id)
    }

    /// Convenience: add an all-different constraint.
    pub fn add_all_different(
        &mut self,
        name: impl Into<String>,
        scope: Vec<VarId>,
    ) -> Result<ConstraintId, CspError> {
        self.add_constraint(AllDifferent::new(name, scope))
    }

    /// Convenience: add a predicate constraint.
    pub fn add_predicate<F>(
        &mut self,
        name: impl Into<String>,
        scope: Vec<VarId>,
        predicate: F,
    ) -> Result<ConstraintId, CspError>
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.add_constraint(PredicateConstraint::new(name, scope, predicate))
    }

    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.index()]
    }

    /// All variables, indexed by [`VarId::index`].
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_ids(&self) -> impl Iterator<Item = VarId> {
        (0..self.variables.len()).map(VarId)
    }

    /// Looks a variable up by name.
    pub fn find_variable(&self, name: &str) -> Option<VarId> {
        self.variables
            .iter()
            .position(|v| v.name() == name)
            .map(VarId)
    }

    pub fn constraint(&self, id: ConstraintId) -> &dyn Constraint {
        self.constraints[id.index()].as_ref()
    }

    /// Constraints whose scope contains `var`, in insertion order.
    pub fn constraints_containing(&self, var: VarId) -> &[ConstraintId] {
        &self.by_variable[var.index()]
    }

    /// Constraints whose scope has exactly `arity` variables.
    pub fn constraints_of_arity(&self, arity: usize) -> Vec<ConstraintId> {
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| c.scope().len() == arity)
            .map(|(i, _)| ConstraintId(i))
            .collect()
    }

    pub fn all_constraints(&self) -> impl Iterator<Item = ConstraintId> {
        (0..self.constraints.len()).map(ConstraintId)
    }

    pub fn scope(&self, id: ConstraintId) -> &[VarId] {
        self.constraints[id.index()].scope()
    }

    /// Number of scope variables of `id` that are not assigned.
    pub fn unassigned_count(&self, id: ConstraintId) -> usize {
        self.scope(id)
            .iter()
            .filter(|v| !self.variable(**v).is_assigned())
            .count()
    }

    pub fn satisfies(&self, id: ConstraintId, tuple: &[Value]) -> bool {
        self.constraints[id.index()].satisfies(tuple)
    }

    /// Whether `var = value` has a support in constraint `id` given the
    /// current domains of the other scope variables.
    pub fn has_support(&self, id: ConstraintId, var: VarId, value: Value) -> bool {
        self.constraints[id.index()].has_support(&self.variables, var, value)
    }

    /// The assigned values of the scope of `id`, in scope order, or `None`
    /// if some scope variable is unassigned.
    pub fn assigned_tuple(&self, id: ConstraintId) -> Option<Vec<Value>> {
        self.scope(id)
            .iter()
            .map(|&v| self.variable(v).assigned_value())
            .collect()
    }

    /// Assigns `value` to `var`.
    pub fn assign(&mut self, var: VarId, value: Value) -> Result<(), CspError> {
        self.variables
            .get_mut(var.index())
            .ok_or(CspError::UnknownVariable(var))?
            .assign(value)
    }

    pub fn unassign(&mut self, var: VarId) {
        self.variables[var.index()].unassign();
    }

    /// Removes `value` from the current domain of `var`.
    pub fn prune(&mut self, var: VarId, value: Value) -> bool {
        self.variables[var.index()].prune(value)
    }

    /// Restores a pruned `value` of `var`.
    pub fn unprune(&mut self, var: VarId, value: Value) -> bool {
        self.variables[var.index()].unprune(value)
    }

    /// Current domains of all variables, in variable order.
    pub fn current_domains(&self) -> Vec<Vec<Value>> {
        self.variables.iter().map(Variable::current_domain).collect()
    }

    /// Returns the number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
