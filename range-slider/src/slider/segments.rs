use super::args::{HandleSlot, SliderMode};

/// Evenly spaced boundary values from `min` to `max` inclusive.
///
/// `count` boundaries split the range into `count - 1` intervals. Fewer than
/// two boundaries produce nothing; arguments are validated before this is
/// called.
pub fn segment_boundaries(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return Vec::new();
    }
    let intervals = (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                max
            } else {
                min + (max - min) * i as f64 / intervals
            }
        })
        .collect()
}

/// Which handle a clicked boundary moves.
///
/// In range mode a boundary strictly below the current upper value moves the
/// lower handle, anything else moves the upper one.
pub fn route_segment(mode: SliderMode, values: &[f64], boundary: f64) -> HandleSlot {
    match (mode, values.get(HandleSlot::Upper.index())) {
        (SliderMode::Range, Some(upper)) if boundary < *upper => HandleSlot::Lower,
        (SliderMode::Range, Some(_)) => HandleSlot::Upper,
        _ => HandleSlot::Lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_cover_range() {
        assert_eq!(
            segment_boundaries(0.0, 300.0, 4),
            vec![0.0, 100.0, 200.0, 300.0]
        );
        assert_eq!(segment_boundaries(-10.0, 10.0, 2), vec![-10.0, 10.0]);
        assert!(segment_boundaries(0.0, 1.0, 1).is_empty());
    }

    #[test]
    fn test_last_boundary_is_exact_max() {
        let boundaries = segment_boundaries(0.0, 1.0, 10);
        assert_eq!(boundaries.len(), 10);
        assert_eq!(boundaries.first(), Some(&0.0));
        assert_eq!(boundaries.last(), Some(&1.0));
    }

    #[test]
    fn test_routing() {
        let values = [20.0, 270.0];
        assert_eq!(
            route_segment(SliderMode::Range, &values, 150.0),
            HandleSlot::Lower
        );
        assert_eq!(
            route_segment(SliderMode::Range, &values, 270.0),
            HandleSlot::Upper
        );
        assert_eq!(
            route_segment(SliderMode::Range, &values, 290.0),
            HandleSlot::Upper
        );
        assert_eq!(
            route_segment(SliderMode::Single, &[20.0], 290.0),
            HandleSlot::Lower
        );
    }
}
