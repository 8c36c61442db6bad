//! Elapsed-time statistics for one group of solver runs
//!
//! Computed from primitives: mean, median and max over integer samples.

/// Summary statistics over a non-empty sample set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub max: i64,
}

/// Reduce a non-empty sample set to mean, median and max
///
/// # Panics
///
/// Panics if `samples` is empty. A group is only finalized after it has
/// received at least one sample, so an empty slice is a caller bug.
pub fn summarize(samples: &[i64]) -> Summary {
    assert!(
        !samples.is_empty(),
        "summarize called with no samples; a finalized group always has at least one"
    );

    Summary {
        mean: mean(samples),
        median: median(samples),
        max: samples.iter().copied().max().unwrap_or_default(),
    }
}

/// Arithmetic mean, not rounded
fn mean(samples: &[i64]) -> f64 {
    let sum: i128 = samples.iter().map(|&s| i128::from(s)).sum();
    sum as f64 / samples.len() as f64
}

/// Middle value of a sorted copy, or the average of the two middles
fn median(samples: &[i64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}
