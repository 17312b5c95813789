use super::variables::{VarId, Value};

/// Errors raised while building a [`Csp`](super::Csp) or assigning a value.
///
/// Propagation itself never fails with an error; inconsistency is reported
/// through [`PropagationResult`](crate::propagation::PropagationResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CspError {
    #[error("unknown variable {0}")]
    UnknownVariable(VarId),

    #[error("constraint '{constraint}' has an empty scope")]
    EmptyScope { constraint: String },

    #[error("variable {variable} appears more than once in the scope of '{constraint}'")]
    DuplicateInScope { constraint: String, variable: VarId },

    #[error("value {value} is not in the current domain of '{variable}'")]
    ValueNotInDomain { variable: String, value: Value },
}
