use derive_setters::Setters;

use crate::{SliderError, prop::CallbackWith};

/// Whether a slider has one handle or two. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderMode {
    /// One handle selecting a single value.
    Single,
    /// Two handles selecting an interval.
    Range,
}

impl SliderMode {
    /// Mode implied by a default value of `len` numbers.
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            1 => Some(SliderMode::Single),
            2 => Some(SliderMode::Range),
            _ => None,
        }
    }

    /// Number of values (and handles) in this mode.
    pub fn handle_count(self) -> usize {
        match self {
            SliderMode::Single => 1,
            SliderMode::Range => 2,
        }
    }

    /// Value slots in this mode, lower first.
    pub fn slots(self) -> &'static [HandleSlot] {
        match self {
            SliderMode::Single => &[HandleSlot::Lower],
            SliderMode::Range => &[HandleSlot::Lower, HandleSlot::Upper],
        }
    }
}

/// A value slot. In single mode only [`HandleSlot::Lower`] exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleSlot {
    /// Slot 0, the lower (or only) handle.
    Lower,
    /// Slot 1, the upper handle.
    Upper,
}

impl HandleSlot {
    /// Index into the value array.
    pub fn index(self) -> usize {
        match self {
            HandleSlot::Lower => 0,
            HandleSlot::Upper => 1,
        }
    }

    /// Modifier suffix used in class names.
    pub(crate) fn name(self) -> &'static str {
        match self {
            HandleSlot::Lower => "lower",
            HandleSlot::Upper => "upper",
        }
    }
}

/// Arguments for [`crate::RangeSlider::mount`].
///
/// With the `serde` feature this also deserializes from the host's
/// configuration object, `{ "min", "max", "step", "segmentsCount",
/// "defaultValue" }`, with missing keys taking the defaults.
#[derive(Debug, PartialEq, Clone, Setters)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct RangeSliderArgs {
    /// Lower bound of the range.
    pub min: f64,
    /// Upper bound of the range. Must be greater than `min`.
    pub max: f64,
    /// Quantization unit for stored values.
    pub step: f64,
    /// Number of clickable boundaries dividing the range into
    /// `segments_count - 1` equal intervals.
    #[setters(strip_option)]
    pub segments_count: Option<usize>,
    /// Initial values. One number makes a single slider, two a range slider.
    #[setters(into)]
    pub default_value: Vec<f64>,
    /// Called with the raw percentage of the dragged handle after each drag
    /// update.
    #[setters(skip)]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_drag: Option<CallbackWith<f64>>,
}

impl RangeSliderArgs {
    /// Sets the drag handler.
    pub fn on_drag<F>(mut self, on_drag: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.on_drag = Some(CallbackWith::new(on_drag));
        self
    }

    /// Sets the drag handler using a shared callback.
    pub fn on_drag_shared(mut self, on_drag: impl Into<CallbackWith<f64>>) -> Self {
        self.on_drag = Some(on_drag.into());
        self
    }

    /// Mode implied by `default_value`, if its length is valid.
    pub fn mode(&self) -> Option<SliderMode> {
        SliderMode::from_len(self.default_value.len())
    }

    /// Checks the configuration and returns the slider mode.
    pub fn validate(&self) -> Result<SliderMode, SliderError> {
        let mode = self
            .mode()
            .ok_or(SliderError::InvalidDefaultValue(self.default_value.len()))?;
        // Written negated so NaN bounds are rejected too.
        if !(self.min < self.max && self.min.is_finite() && self.max.is_finite()) {
            return Err(SliderError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(SliderError::InvalidStep(self.step));
        }
        if let Some(count) = self.segments_count
            && count < 2
        {
            return Err(SliderError::TooFewSegments(count));
        }
        Ok(mode)
    }
}

impl Default for RangeSliderArgs {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            segments_count: None,
            default_value: vec![0.0],
            on_drag: None,
        }
    }
}
