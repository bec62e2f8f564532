//! Success/failure container that aggregates validation errors.
//!
//! Factories run every field check to completion and report all violations
//! together instead of stopping at the first one. Callers either branch on
//! the outcome or collapse it into a `Result` carrying the first error.

use crate::validation::ValidationError;


/// Outcome of a validated operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T, E = ValidationError> {
    /// The operation produced a value.
    Success(T),
    /// The operation failed; never empty.
    Failure(Vec<E>),
}

impl<T, E> Outcome<T, E> {
    /// Creates a successful outcome.
    #[must_use]
    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Creates a failed outcome from one or more errors.
    ///
    /// # Panics
    /// Panics if `errors` is empty. An empty failure is a programming error,
    /// not a domain failure.
    #[must_use]
    pub fn failure(errors: Vec<E>) -> Self {
        assert!(
            !errors.is_empty(),
            "a failed outcome requires at least one error"
        );
        Self::Failure(errors)
    }

    /// Runs every check, then either fails with all collected errors or
    /// builds the value.
    pub fn from_checks<I, F>(checks: I, build: F) -> Self
    where
        I: IntoIterator<Item = Option<E>>,
        F: FnOnce() -> T,
    {
        let errors: Vec<E> = checks.into_iter().flatten().collect();
        if errors.is_empty() {
            Self::Success(build())
        } else {
            Self::Failure(errors)
        }
    }

    /// Returns true when the outcome holds a value.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the value of a successful outcome.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the errors of a failed outcome, empty on success.
    #[must_use]
    pub fn errors(&self) -> &[E] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(errors) => errors,
        }
    }

    /// Maps the success value.
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(errors) => Outcome::Failure(errors),
        }
    }

    /// Returns the value, or the first error on failure.
    ///
    /// # Errors
    /// Returns the first recorded error when the outcome failed.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(errors) => match errors.into_iter().next() {
                Some(first) => Err(first),
                // Failure is never constructed empty
                None => unreachable!("failed outcome without errors"),
            },
        }
    }
}

impl<E> Outcome<(), E> {
    /// Turns a single optional error into an outcome.
    #[must_use]
    pub fn determine(error: Option<E>) -> Self {
        match error {
            Some(error) => Self::Failure(vec![error]),
            None => Self::Success(()),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}
