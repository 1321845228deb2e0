//! Two-way result of a dispatched operation

/// Either a computed value or an abstention
///
/// `Unsupported` is not an error. It tells the host that this accelerator
/// declines the call (for example because the operand kind has no kernel) and
/// that a reference implementation should run instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation ran
    Value(T),
    /// The accelerator abstains
    Unsupported,
}

impl<T> Outcome<T> {
    /// Returns `true` for an abstention
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Outcome::Unsupported)
    }

    /// The computed value, if any
    pub fn value(self) -> Option<T> {
        match self {
            Outcome::Value(value) => Some(value),
            Outcome::Unsupported => None,
        }
    }

    /// Borrow the computed value, if any
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Outcome::Value(value) => Some(value),
            Outcome::Unsupported => None,
        }
    }

    /// Transform the computed value, keeping abstentions
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Value(value) => Outcome::Value(f(value)),
            Outcome::Unsupported => Outcome::Unsupported,
        }
    }
}

impl<T> From<Outcome<T>> for Option<T> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.value()
    }
}
