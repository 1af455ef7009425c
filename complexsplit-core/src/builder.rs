//! Builder utilities for configuring [`Splitter`] runs.
//!
//! Validates the requested split fractions once, before any union or
//! allocation work starts.

use crate::{
    Result,
    allocator::{SplitFractions, ValidationTarget},
    splitter::Splitter,
    union_find::EngineStrategy,
};

/// Configures and constructs [`Splitter`] instances.
///
/// # Examples
/// ```
/// use complexsplit_core::{EngineStrategy, SplitterBuilder};
///
/// let splitter = SplitterBuilder::new()
///     .with_train_fraction(0.7)
///     .with_valid_fraction(0.15)
///     .with_engine(EngineStrategy::PathCompression)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(splitter.fractions().train(), 0.7);
/// assert_eq!(splitter.engine(), EngineStrategy::PathCompression);
/// ```
#[derive(Debug, Clone)]
pub struct SplitterBuilder {
    train_fraction: f64,
    valid_fraction: f64,
    engine: EngineStrategy,
    validation_target: ValidationTarget,
}

impl Default for SplitterBuilder {
    fn default() -> Self {
        let fractions = SplitFractions::default();
        Self {
            train_fraction: fractions.train(),
            valid_fraction: fractions.valid(),
            engine: EngineStrategy::default(),
            validation_target: ValidationTarget::default(),
        }
    }
}

impl SplitterBuilder {
    /// Creates a builder with the 80/10/10 default split.
    ///
    /// # Examples
    /// ```
    /// use complexsplit_core::{EngineStrategy, SplitterBuilder, ValidationTarget};
    ///
    /// let builder = SplitterBuilder::new();
    /// assert_eq!(builder.train_fraction(), 0.8);
    /// assert_eq!(builder.valid_fraction(), 0.1);
    /// assert_eq!(builder.engine(), EngineStrategy::FlatRelabel);
    /// assert_eq!(builder.validation_target(), ValidationTarget::RemainderShare);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the training fraction.
    #[must_use]
    pub fn with_train_fraction(mut self, fraction: f64) -> Self {
        self.train_fraction = fraction;
        self
    }

    /// Returns the configured training fraction.
    #[must_use]
    pub fn train_fraction(&self) -> f64 {
        self.train_fraction
    }

    /// Overrides the validation fraction.
    #[must_use]
    pub fn with_valid_fraction(mut self, fraction: f64) -> Self {
        self.valid_fraction = fraction;
        self
    }

    /// Returns the configured validation fraction.
    #[must_use]
    pub fn valid_fraction(&self) -> f64 {
        self.valid_fraction
    }

    /// Selects the disjoint-set engine.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineStrategy) -> Self {
        self.engine = engine;
        self
    }

    /// Returns the configured engine.
    #[must_use]
    pub fn engine(&self) -> EngineStrategy {
        self.engine
    }

    /// Selects how the validation target is derived.
    #[must_use]
    pub fn with_validation_target(mut self, target: ValidationTarget) -> Self {
        self.validation_target = target;
        self
    }

    /// Returns the configured validation target rule.
    #[must_use]
    pub fn validation_target(&self) -> ValidationTarget {
        self.validation_target
    }

    /// Validates the configuration and constructs a [`Splitter`].
    ///
    /// # Errors
    /// Returns [`crate::SplitError::InvalidConfig`] when the fractions are
    /// rejected by [`SplitFractions::new`].
    ///
    /// # Examples
    /// ```
    /// use complexsplit_core::{SplitError, SplitterBuilder};
    ///
    /// let err = SplitterBuilder::new()
    ///     .with_valid_fraction(-0.1)
    ///     .build()
    ///     .unwrap_err();
    /// assert!(matches!(err, SplitError::InvalidConfig { .. }));
    /// ```
    pub fn build(self) -> Result<Splitter> {
        let fractions = SplitFractions::new(self.train_fraction, self.valid_fraction)?;
        Ok(Splitter::new(fractions, self.engine, self.validation_target))
    }
}
