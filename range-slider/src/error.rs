//! Errors raised while mounting or updating a slider.

use thiserror::Error;

/// Everything that can go wrong with a slider.
///
/// Construction errors are raised by [`crate::RangeSlider::mount`] before
/// any element is built. [`SliderError::ModeMismatch`] is the only error a
/// mounted slider can report, from [`crate::RangeSlider::set_values`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderError {
    /// The mount selector is empty or matches nothing.
    #[error("no element matches the mount selector `{0}`")]
    MissingContainer(String),
    /// The default value does not hold one or two numbers.
    #[error("default value must hold 1 or 2 numbers, got {0}")]
    InvalidDefaultValue(usize),
    /// `min` is not strictly below `max`, or a bound is not finite.
    #[error("min ({min}) must be less than max ({max})")]
    InvalidBounds {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// The step is zero, negative or not finite.
    #[error("step must be a positive finite number, got {0}")]
    InvalidStep(f64),
    /// Fewer than two segment boundaries were requested.
    #[error("segments count must be at least 2, got {0}")]
    TooFewSegments(usize),
    /// An update supplied a different number of values than the slider
    /// holds.
    #[error("slider holds {expected} value(s), got {actual}")]
    ModeMismatch {
        /// Number of values the slider holds.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
}
