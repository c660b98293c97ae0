//! Aggregate errors for batch operations.
//!
//! Batch operations (catalog scans, release resolution, fetch runs) never stop
//! at the first failure. Each one collects every failure into an
//! [`ErrorCollector`] and resolves it into an [`AggregateError`] once all
//! sibling work has finished.

use std::error::Error;
use std::fmt;

/// A named collection of every failure produced by one batch operation.
///
/// The display form names the batch, the number of failures, and then lists
/// each failure on its own line so a single message is enough to diagnose
/// the whole batch.
#[derive(Debug)]
pub struct AggregateError<E> {
    context: String,
    errors: Vec<E>,
}

impl<E> AggregateError<E> {
    /// Creates an aggregate from an already collected list of errors.
    pub fn new(context: impl Into<String>, errors: Vec<E>) -> Self {
        Self {
            context: context.into(),
            errors,
        }
    }

    /// Returns the batch description.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns every collected failure in the order it was recorded.
    #[must_use]
    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    /// Returns the number of collected failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true when no failure was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the aggregate, returning the collected failures.
    #[must_use]
    pub fn into_errors(self) -> Vec<E> {
        self.errors
    }
}

impl<E: fmt::Display> fmt::Display for AggregateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} errors)", self.context, self.errors.len())?;
        for (index, error) in self.errors.iter().enumerate() {
            write!(f, "\n  {}. {error}", index + 1)?;
        }
        Ok(())
    }
}

impl<E: Error + 'static> Error for AggregateError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.errors.first().map(|error| error as &(dyn Error + 'static))
    }
}

/// Accumulates failures during a batch.
#[derive(Debug)]
pub struct ErrorCollector<E> {
    errors: Vec<E>,
}

impl<E> Default for ErrorCollector<E> {
    fn default() -> Self {
        Self { errors: Vec::new() }
    }
}

impl<E> ErrorCollector<E> {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failure.
    pub fn add(&mut self, error: E) {
        self.errors.push(error);
    }

    /// Records the error of `result`, if any.
    pub fn check<T>(&mut self, result: Result<T, E>) {
        if let Err(error) = result {
            self.errors.push(error);
        }
    }

    /// Records every failure from `errors`.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = E>) {
        self.errors.extend(errors);
    }

    /// Returns the number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true when at least one failure was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `Ok(())` when nothing was recorded, otherwise an aggregate
    /// carrying every recorded failure.
    pub fn resolve(self, context: impl Into<String>) -> Result<(), AggregateError<E>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateError::new(context, self.errors))
        }
    }
}
