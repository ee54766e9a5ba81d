//! The value engine: every input channel ends up in [`ValueEngine::submit`],
//! which clamps, step-aligns and orders the stored values.

use smallvec::SmallVec;

use super::{
    args::{HandleSlot, RangeSliderArgs, SliderMode},
    segments::route_segment,
};
use crate::SliderError;

/// Direction of a keyboard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Arrow down or left.
    Decrement,
    /// Arrow up or right.
    Increment,
}

/// Normalized value state of one slider.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEngine {
    min: f64,
    max: f64,
    step: f64,
    mode: SliderMode,
    values: SmallVec<[f64; 2]>,
}

impl ValueEngine {
    /// Validates `args` and normalizes its default values.
    pub fn new(args: &RangeSliderArgs) -> Result<Self, SliderError> {
        let mode = args.validate()?;
        let mut engine = Self {
            min: args.min,
            max: args.max,
            step: args.step,
            mode,
            values: SmallVec::new(),
        };
        engine.values = args
            .default_value
            .iter()
            .map(|v| engine.normalize(*v))
            .collect();
        engine.enforce_order();
        Ok(engine)
    }

    /// Single or range.
    pub fn mode(&self) -> SliderMode {
        self.mode
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Quantization unit.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Stored values, lower first.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Stored value of `slot`. In single mode every slot reads the only
    /// value.
    pub fn value(&self, slot: HandleSlot) -> f64 {
        self.values[self.index(slot)]
    }

    fn index(&self, slot: HandleSlot) -> usize {
        slot.index().min(self.values.len() - 1)
    }

    /// Clamps `value` into `[min, max]` and aligns it to the step grid.
    ///
    /// The grid is anchored at zero, not at `min`. When rounding to the grid
    /// lands past a bound that is not itself on the grid, the nearest grid
    /// point inside the range is used instead; if the range holds no grid
    /// point at all the clamped value is kept. An overshoot within float
    /// error of a bound snaps to the bound. NaN is treated as `min`.
    pub fn normalize(&self, value: f64) -> f64 {
        let value = if value.is_nan() { self.min } else { value };
        let clamped = value.clamp(self.min, self.max);
        let index = round_half_up(clamped / self.step);
        let aligned = index * self.step;
        let tolerance = self.step * GRID_TOLERANCE;
        let aligned = if aligned > self.max {
            if aligned - self.max <= tolerance {
                self.max
            } else {
                (index - 1.0) * self.step
            }
        } else if aligned < self.min {
            if self.min - aligned <= tolerance {
                self.min
            } else {
                (index + 1.0) * self.step
            }
        } else {
            aligned
        };
        if (self.min..=self.max).contains(&aligned) {
            // Adding zero turns -0.0 into 0.0.
            aligned + 0.0
        } else {
            clamped
        }
    }

    /// Stores `value` for `slot` after normalization, then restores
    /// ordering by swapping the pair if needed.
    pub fn submit(&mut self, slot: HandleSlot, value: f64) -> &[f64] {
        let index = self.index(slot);
        let stored = self.normalize(value);
        self.values[index] = stored;
        let swapped = self.enforce_order();
        tracing::debug!(
            ?slot,
            raw = value,
            stored,
            swapped,
            values = ?self.values,
            "value submitted"
        );
        &self.values
    }

    /// Maps a handle percentage onto the range, rounds it to the nearest
    /// integer (halves upward) and submits it.
    pub fn submit_percentage(&mut self, slot: HandleSlot, percentage: f64) -> &[f64] {
        let raw = round_half_up(self.value_at(percentage));
        self.submit(slot, raw)
    }

    /// Moves `slot` by exactly one step.
    pub fn step_by(&mut self, slot: HandleSlot, direction: StepDirection) -> &[f64] {
        let current = self.value(slot);
        let next = match direction {
            StepDirection::Decrement => current - self.step,
            StepDirection::Increment => current + self.step,
        };
        self.submit(slot, next)
    }

    /// Submits free-form text for `slot`. Everything but ASCII digits is
    /// dropped; nothing left reads as `0`.
    pub fn submit_text(&mut self, slot: HandleSlot, text: &str) -> &[f64] {
        let value = parse_digits(text);
        self.submit(slot, value)
    }

    /// Submits a segment boundary to the handle it belongs to and returns
    /// that handle.
    pub fn submit_segment(&mut self, boundary: f64) -> HandleSlot {
        let slot = route_segment(self.mode, &self.values, boundary);
        self.submit(slot, boundary);
        slot
    }

    /// Replaces every value at once.
    ///
    /// The number of values must match the mode.
    pub fn replace(&mut self, values: &[f64]) -> Result<&[f64], SliderError> {
        if values.len() != self.values.len() {
            return Err(SliderError::ModeMismatch {
                expected: self.values.len(),
                actual: values.len(),
            });
        }
        self.values = values.iter().map(|v| self.normalize(*v)).collect();
        self.enforce_order();
        tracing::debug!(values = ?self.values, "values replaced");
        Ok(&self.values)
    }

    /// Position of `value` on the track, in percent.
    pub fn percentage_of(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min) * 100.0
    }

    /// Value at `percentage` along the track, without clamping or rounding.
    pub fn value_at(&self, percentage: f64) -> f64 {
        self.min + percentage / 100.0 * (self.max - self.min)
    }

    /// Track position of every stored value, lower first.
    pub fn percentages(&self) -> SmallVec<[f64; 2]> {
        self.values.iter().map(|v| self.percentage_of(*v)).collect()
    }

    /// Start and end of the filled part of the track, in percent.
    ///
    /// A single slider fills from the track start to its handle; a range
    /// slider fills between its handles.
    pub fn fill(&self) -> (f64, f64) {
        let percentages = self.percentages();
        match self.mode {
            SliderMode::Single => (0.0, percentages[0]),
            SliderMode::Range => (percentages[0], percentages[1]),
        }
    }

    fn enforce_order(&mut self) -> bool {
        if self.mode == SliderMode::Range && self.values[0] > self.values[1] {
            self.values.swap(0, 1);
            return true;
        }
        false
    }
}

/// Overshoot past a bound, in steps, that still counts as landing on it.
const GRID_TOLERANCE: f64 = 1e-9;

/// Rounds `value` to the nearest grid point. The grid is anchored at zero
/// and halves round upward, so `-7.5` on a grid of 5 becomes `-5`.
pub fn align_to_step(value: f64, step: f64) -> f64 {
    round_half_up(value / step) * step
}

/// Nearest integer, with halves rounded toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Parses the ASCII digits of `text` as a number, ignoring everything else.
pub fn parse_digits(text: &str) -> f64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0.0;
    }
    digits.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn engine(args: RangeSliderArgs) -> ValueEngine {
        ValueEngine::new(&args).expect("valid args")
    }

    #[test]
    fn test_drag_value_snaps_to_step() {
        let mut slider = engine(
            RangeSliderArgs::default()
                .min(0.0)
                .max(100.0)
                .step(5.0)
                .default_value([50.0]),
        );
        assert_eq!(slider.submit(HandleSlot::Lower, 52.0), &[50.0]);
        assert_eq!(slider.submit(HandleSlot::Lower, 53.0), &[55.0]);
    }

    #[test]
    fn test_lower_past_upper_swaps_pair() {
        let mut slider = engine(
            RangeSliderArgs::default()
                .min(0.0)
                .max(250.0)
                .default_value([50.0, 80.0]),
        );
        assert_eq!(slider.submit(HandleSlot::Lower, 90.0), &[80.0, 90.0]);
        assert_eq!(slider.submit(HandleSlot::Upper, 10.0), &[10.0, 80.0]);
    }

    #[test]
    fn test_decrement_at_floor_stays() {
        let mut slider = engine(RangeSliderArgs::default().default_value([0.0, 40.0]));
        assert_eq!(
            slider.step_by(HandleSlot::Lower, StepDirection::Decrement),
            &[0.0, 40.0]
        );
        assert_eq!(
            slider.step_by(HandleSlot::Upper, StepDirection::Increment),
            &[0.0, 41.0]
        );
    }

    #[test]
    fn test_keyboard_moves_exactly_one_step() {
        let mut slider = engine(
            RangeSliderArgs::default()
                .step(10.0)
                .default_value([30.0]),
        );
        slider.step_by(HandleSlot::Lower, StepDirection::Increment);
        assert_eq!(slider.value(HandleSlot::Lower), 40.0);
        slider.step_by(HandleSlot::Lower, StepDirection::Decrement);
        slider.step_by(HandleSlot::Lower, StepDirection::Decrement);
        assert_eq!(slider.value(HandleSlot::Lower), 20.0);
    }

    #[test]
    fn test_segment_routes_below_upper_to_lower() {
        let mut slider = engine(
            RangeSliderArgs::default()
                .min(0.0)
                .max(300.0)
                .segments_count(10)
                .default_value([20.0, 270.0]),
        );
        assert_eq!(slider.submit_segment(150.0), HandleSlot::Lower);
        assert_eq!(slider.values(), &[150.0, 270.0]);
        assert_eq!(slider.submit_segment(280.0), HandleSlot::Upper);
        assert_eq!(slider.values(), &[150.0, 280.0]);
    }

    #[test]
    fn test_segment_in_single_mode_moves_only_handle() {
        let mut slider = engine(RangeSliderArgs::default().default_value([20.0]));
        assert_eq!(slider.submit_segment(75.0), HandleSlot::Lower);
        assert_eq!(slider.values(), &[75.0]);
    }

    #[test]
    fn test_text_keeps_digits_only() {
        let mut slider = engine(RangeSliderArgs::default().max(1000.0).default_value([5.0]));
        assert_eq!(slider.submit_text(HandleSlot::Lower, "1a2b3"), &[123.0]);
        assert_eq!(slider.submit_text(HandleSlot::Lower, "$4,00"), &[400.0]);
        assert_eq!(slider.submit_text(HandleSlot::Lower, "abc"), &[0.0]);
        assert_eq!(slider.submit_text(HandleSlot::Lower, "99999"), &[1000.0]);
    }

    #[test]
    fn test_text_cannot_go_negative() {
        assert_eq!(parse_digits("-15"), 15.0);
        assert_eq!(parse_digits("12.5"), 125.0);
        assert_eq!(parse_digits(""), 0.0);
    }

    #[test]
    fn test_defaults_are_normalized_and_ordered() {
        let slider = engine(
            RangeSliderArgs::default()
                .step(5.0)
                .default_value([120.0, 12.0]),
        );
        assert_eq!(slider.values(), &[10.0, 100.0]);
    }

    #[test]
    fn test_percentages() {
        let slider = engine(
            RangeSliderArgs::default()
                .min(100.0)
                .max(300.0)
                .default_value([150.0, 250.0]),
        );
        assert_eq!(slider.percentages().as_slice(), &[25.0, 75.0]);
        assert_eq!(slider.fill(), (25.0, 75.0));
        assert_eq!(slider.value_at(50.0), 200.0);

        let single = engine(RangeSliderArgs::default().default_value([30.0]));
        assert_eq!(single.fill(), (0.0, 30.0));
    }

    #[test]
    fn test_percentage_submission_rounds_to_integer() {
        let mut slider = engine(
            RangeSliderArgs::default()
                .max(10.0)
                .step(0.5)
                .default_value([0.0]),
        );
        assert_eq!(slider.submit_percentage(HandleSlot::Lower, 43.0), &[4.0]);
        assert_eq!(slider.submit_percentage(HandleSlot::Lower, 180.0), &[10.0]);
        assert_eq!(slider.submit_percentage(HandleSlot::Lower, -20.0), &[0.0]);
    }

    #[test]
    fn test_step_grid_is_anchored_at_zero() {
        let slider = engine(
            RangeSliderArgs::default()
                .min(3.0)
                .max(23.0)
                .step(5.0)
                .default_value([3.0]),
        );
        // 3 is not on the grid; the nearest grid point inside the range is 5.
        assert_eq!(slider.values(), &[5.0]);
        assert_eq!(slider.normalize(12.0), 10.0);
        assert_eq!(slider.normalize(23.0), 20.0);
    }

    #[test]
    fn test_step_wider_than_range_keeps_clamped_value() {
        let slider = engine(
            RangeSliderArgs::default()
                .min(1.0)
                .max(4.0)
                .step(10.0)
                .default_value([2.0]),
        );
        assert_eq!(slider.normalize(2.0), 2.0);
        assert_eq!(slider.normalize(9.0), 4.0);
    }

    #[test]
    fn test_no_negative_zero() {
        let slider = engine(
            RangeSliderArgs::default()
                .min(-10.0)
                .max(10.0)
                .default_value([0.0]),
        );
        let value = slider.normalize(-0.2);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_decimal_step_reaches_max() {
        let mut slider = engine(
            RangeSliderArgs::default()
                .min(0.0)
                .max(0.7)
                .step(0.1)
                .default_value([0.6]),
        );
        assert_eq!(slider.normalize(0.7), 0.7);
        slider.step_by(HandleSlot::Lower, StepDirection::Increment);
        assert_eq!(slider.values(), &[0.7]);
        slider.step_by(HandleSlot::Lower, StepDirection::Increment);
        assert_eq!(slider.values(), &[0.7]);
        slider.step_by(HandleSlot::Lower, StepDirection::Decrement);
        assert!((slider.value(HandleSlot::Lower) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_decimal_step_reaches_min() {
        let slider = engine(
            RangeSliderArgs::default()
                .min(0.3)
                .max(1.0)
                .step(0.1)
                .default_value([0.3]),
        );
        let lowest = slider.normalize(0.0);
        assert!((lowest - 0.3).abs() < 1e-12);
        assert!(lowest >= slider.min());
    }

    #[test]
    fn test_negative_halves_round_upward() {
        let slider = engine(
            RangeSliderArgs::default()
                .min(-10.0)
                .max(10.0)
                .step(5.0)
                .default_value([0.0]),
        );
        assert_eq!(slider.normalize(-7.5), -5.0);
        assert_eq!(slider.normalize(7.5), 10.0);
        let zero = slider.normalize(-2.5);
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_positive());
        assert_eq!(align_to_step(-1.5, 1.0), -1.0);
    }

    #[test]
    fn test_negative_half_drag_rounds_upward() {
        let mut slider = engine(
            RangeSliderArgs::default()
                .min(-10.0)
                .max(10.0)
                .default_value([0.0]),
        );
        // 22.5% of [-10, 10] is -5.5.
        assert_eq!(slider.submit_percentage(HandleSlot::Lower, 22.5), &[-5.0]);
        // 72.5% is 4.5.
        assert_eq!(slider.submit_percentage(HandleSlot::Lower, 72.5), &[5.0]);
    }

    #[test]
    fn test_nan_reads_as_min() {
        let slider = engine(RangeSliderArgs::default().min(10.0).default_value([10.0]));
        assert_eq!(slider.normalize(f64::NAN), 10.0);
    }

    #[test]
    fn test_replace_checks_length() {
        let mut slider = engine(RangeSliderArgs::default().default_value([10.0, 20.0]));
        assert_eq!(
            slider.replace(&[5.0]),
            Err(SliderError::ModeMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(slider.replace(&[90.0, 30.0]), Ok(&[30.0, 90.0][..]));
    }

    fn grid_args() -> impl Strategy<Value = RangeSliderArgs> {
        (
            -500i32..500,
            1i32..1000,
            prop::sample::select(vec![0.1, 0.2, 0.25, 0.3, 0.5, 1.0, 2.0, 5.0, 10.0]),
        )
            .prop_map(|(min, span, step)| {
                let min = f64::from(min);
                RangeSliderArgs::default()
                    .min(min)
                    .max(min + f64::from(span))
                    .step(step)
                    .default_value([min, min])
            })
    }

    proptest! {
        #[test]
        fn test_normalized_values_stay_in_bounds(args in grid_args(), v in -2000.0f64..2000.0) {
            let slider = engine(args);
            let n = slider.normalize(v);
            prop_assert!(n >= slider.min() && n <= slider.max());
        }

        #[test]
        fn test_normalized_values_are_step_aligned(args in grid_args(), v in -2000.0f64..2000.0) {
            let slider = engine(args);
            let n = slider.normalize(v);
            let index = n / slider.step();
            let on_grid = (index - index.round()).abs() < 1e-6;
            let first_grid_point = (slider.min() / slider.step()).ceil() * slider.step();
            let grid_misses_range = first_grid_point > slider.max();
            prop_assert!(on_grid || grid_misses_range);
        }

        #[test]
        fn test_normalize_is_idempotent(args in grid_args(), v in -2000.0f64..2000.0) {
            let slider = engine(args);
            let once = slider.normalize(v);
            prop_assert_eq!(slider.normalize(once), once);
        }

        #[test]
        fn test_range_values_never_cross(
            args in grid_args(),
            moves in prop::collection::vec((any::<bool>(), -2000.0f64..2000.0), 1..40),
        ) {
            let mut slider = engine(args);
            for (upper, value) in moves {
                let slot = if upper { HandleSlot::Upper } else { HandleSlot::Lower };
                let values = slider.submit(slot, value);
                prop_assert!(values[0] <= values[1]);
            }
        }

        #[test]
        fn test_crossing_swaps_the_pair(
            lower in 0.0f64..100.0,
            upper in 0.0f64..100.0,
            proposal in 0.0f64..100.0,
        ) {
            let mut slider = engine(RangeSliderArgs::default().default_value([lower, upper]));
            let before = slider.values().to_vec();
            slider.submit(HandleSlot::Lower, proposal);
            let stored = slider.normalize(proposal);
            let mut expected = vec![stored, before[1]];
            expected.sort_by(f64::total_cmp);
            prop_assert_eq!(slider.values(), expected.as_slice());
        }

        #[test]
        fn test_percentages_match_values(args in grid_args(), v in -2000.0f64..2000.0) {
            let mut slider = engine(args);
            slider.submit(HandleSlot::Upper, v);
            let (min, max) = (slider.min(), slider.max());
            for (value, percentage) in slider.values().iter().zip(slider.percentages()) {
                prop_assert_eq!(percentage, (value - min) / (max - min) * 100.0);
            }
        }
    }
}
