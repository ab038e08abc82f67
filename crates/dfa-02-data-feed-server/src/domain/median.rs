//! # Median
//!
//! Deterministic median used to aggregate Beacon values and timestamps.
//! Odd lengths take the middle element; even lengths take the mean of the two
//! middle elements, truncated toward zero.

use shared_types::FeedValue;

/// Types whose median of an even-length set is the mean of the middle pair.
pub trait Midpoint: Ord + Copy {
    /// Mean of `self` and `other`, truncated toward zero. Must not overflow.
    fn midpoint(self, other: Self) -> Self;
}

impl Midpoint for FeedValue {
    fn midpoint(self, other: Self) -> Self {
        FeedValue::midpoint(self, other)
    }
}

impl Midpoint for u32 {
    fn midpoint(self, other: Self) -> Self {
        ((u64::from(self) + u64::from(other)) / 2) as u32
    }
}

/// Median of `values`, sorting the slice in place. `None` when empty.
pub fn median<T: Midpoint>(values: &mut [T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some(values[mid - 1].midpoint(values[mid]))
    }
}
