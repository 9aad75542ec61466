use std::collections::TryReserveError;
use std::fmt;
use std::ops::Range;

use sprig_support::index_error;

/// An index that fell outside its allowed range after negative-index normalization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: i64,
    pub min: i64,
    pub max: i64,
}

impl fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", index_error(self.index, self.min, self.max))
    }
}

impl std::error::Error for IndexOutOfRange {}

fn check_range(index: i64, min: i64, max: i64) -> Result<usize, IndexOutOfRange> {
    if index < min || index > max {
        return Err(IndexOutOfRange { index, min, max });
    }
    Ok(index as usize)
}

/// True when `-len <= index < len`
pub fn has_index(len: usize, index: i64) -> bool {
    let len = len as i64;
    index >= -len && index < len
}

/// Position for an insertion; negative indexes count from one past the end
pub fn insert_position(len: usize, index: i64) -> Result<usize, IndexOutOfRange> {
    let len = len as i64;
    let index = if index < 0 { index + len + 1 } else { index };
    check_range(index, 0, len)
}

/// Position of an existing element; negative indexes count from the end
pub fn element_position(len: usize, index: i64) -> Result<usize, IndexOutOfRange> {
    let len = len as i64;
    let index = if index < 0 { index + len } else { index };
    check_range(index, 0, len - 1)
}

/// Element at a possibly negative index, if [`has_index`] accepts it
pub fn lookup_position(len: usize, index: i64) -> Option<usize> {
    let len = len as i64;
    if index >= -len && index < len {
        Some(if index < 0 { index + len } else { index } as usize)
    } else {
        None
    }
}

/// Clamped bounds for `slice(seq, from, to)`; `to = None` means "to the end"
pub fn slice_bounds(len: usize, from: i64, to: Option<i64>) -> Range<usize> {
    let count = len as i64;
    let mut from = if from < 0 { from + count } else { from };
    if from < 0 {
        from = 0;
    }
    let mut to = match to {
        None => count,
        Some(to) if to < 0 => to + count,
        Some(to) => to,
    };
    if to > count {
        to = count;
    }
    if from >= count || to <= from {
        return 0..0;
    }
    from as usize..to as usize
}

/// Starting point for a search that begins after `after`, or `None` when no
/// element lies after it
pub fn search_start(len: usize, after: Option<i64>) -> Option<usize> {
    let count = len as i64;
    let Some(mut after) = after else {
        return Some(0);
    };
    if after < -1 {
        after += count;
    }
    if after < -1 || after >= count - 1 {
        return None;
    }
    Some((after + 1) as usize)
}

/// Default step for `range(from, to)`
pub fn default_step(from: f64, to: f64) -> f64 {
    if to >= from {
        1.0
    } else {
        -1.0
    }
}

/// Number of elements `range(from, to, step)` will produce, computed up front
pub fn range_count(from: f64, to: f64, step: f64) -> i64 {
    (((to - from) / step) as i64).saturating_add(1)
}

/// Generates the values of `range(from, to, step)`; `step` must be non-zero.
///
/// Storage for `expected` elements is reserved before population, so an
/// impossible request fails here instead of aborting the process.
pub fn range_values(
    from: f64,
    to: f64,
    step: f64,
    expected: usize,
) -> Result<Vec<f64>, TryReserveError> {
    let mut values = Vec::new();
    values.try_reserve_exact(expected)?;
    let mut current = from;
    while if step > 0.0 { current <= to } else { current >= to } {
        if values.len() == values.capacity() {
            values.try_reserve(1)?;
        }
        values.push(current);
        let next = current + step;
        // A step below the precision of `current` would never advance.
        if next == current {
            break;
        }
        current = next;
    }
    Ok(values)
}

/// Fisher–Yates shuffle from the last index down to 1.
///
/// `pick(i)` must return a uniformly chosen index in `0..=i`.
pub fn shuffle<T>(items: &mut [T], mut pick: impl FnMut(usize) -> usize) {
    for i in (1..items.len()).rev() {
        let j = pick(i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn slice_bounds_stay_inside(
            len in 0usize..50,
            from in -60i64..60,
            to in proptest::option::of(-60i64..60),
        ) {
            let bounds = slice_bounds(len, from, to);
            prop_assert!(bounds.start <= bounds.end && bounds.end <= len);
        }

        #[test]
        fn element_position_agrees_with_has_index(len in 0usize..50, index in -60i64..60) {
            match element_position(len, index) {
                Ok(position) => prop_assert!(position < len && has_index(len, index)),
                Err(_) => prop_assert!(!has_index(len, index)),
            }
        }

        #[test]
        fn lookup_position_agrees_with_has_index(len in 0usize..50, index in -60i64..60) {
            prop_assert_eq!(lookup_position(len, index).is_some(), has_index(len, index));
        }
    }

    #[test]
    fn insert_positions_allow_the_end() {
        assert_eq!(insert_position(3, 3), Ok(3));
        assert_eq!(insert_position(3, -1), Ok(3));
        assert_eq!(insert_position(3, -4), Ok(0));
        assert_eq!(
            insert_position(3, 4),
            Err(IndexOutOfRange { index: 4, min: 0, max: 3 })
        );
    }

    #[test]
    fn lookup_positions_include_minus_len() {
        assert_eq!(lookup_position(2, -2), Some(0));
        assert_eq!(lookup_position(2, -3), None);
        assert_eq!(lookup_position(0, 0), None);
    }

    #[test]
    fn element_positions_exclude_the_end() {
        assert_eq!(element_position(3, -1), Ok(2));
        assert!(element_position(3, 3).is_err());
        assert!(element_position(0, 0).is_err());
    }

    #[test]
    fn slice_bounds_clamp() {
        assert_eq!(slice_bounds(5, 0, None), 0..5);
        assert_eq!(slice_bounds(5, -2, None), 3..5);
        assert_eq!(slice_bounds(5, 1, Some(-1)), 1..4);
        assert_eq!(slice_bounds(5, -10, Some(10)), 0..5);
        assert_eq!(slice_bounds(5, 4, Some(2)), 0..0);
        assert_eq!(slice_bounds(5, 7, None), 0..0);
    }

    #[test]
    fn search_start_after_index() {
        assert_eq!(search_start(4, None), Some(0));
        assert_eq!(search_start(4, Some(1)), Some(2));
        assert_eq!(search_start(4, Some(-1)), Some(0));
        assert_eq!(search_start(4, Some(-2)), Some(3));
        assert_eq!(search_start(4, Some(3)), None);
    }

    #[test]
    fn ranges_include_both_ends() {
        assert_eq!(range_values(0.0, 5.0, 1.0, 6), Ok(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(range_values(5.0, 0.0, -2.0, 3), Ok(vec![5.0, 3.0, 1.0]));
        assert_eq!(range_count(5.0, 0.0, -2.0), 3);
        assert_eq!(range_count(0.0, 5.0, -1.0), -4);
    }

    #[test]
    fn range_stops_when_step_cannot_advance() {
        let values = range_values(1e17, 1e17 + 64.0, 1.0, 65).unwrap();
        assert_eq!(values, vec![1e17]);
    }

    #[test]
    fn shuffle_with_fixed_picks() {
        let mut items = vec![1, 2, 3, 4];
        shuffle(&mut items, |_| 0);
        assert_eq!(items, vec![2, 3, 4, 1]);
    }
}
