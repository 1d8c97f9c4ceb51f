//! Reduction of terminal prices into summary statistics.
//!
//! Summing millions of prices of similar magnitude in plain `f64` loses the
//! low-order bits of every term once the running total is large. The sum here
//! is carried with a Neumaier compensation term, which bounds the error
//! independently of the number of terms.

/// Compensated (Neumaier) accumulator.
///
/// # Examples
///
/// ```rust
/// use mc_kernel::mc::CompensatedSum;
///
/// let mut sum = CompensatedSum::new();
/// sum.add(1e16);
/// sum.add(1.0);
/// sum.add(-1e16);
/// assert_eq!(sum.value(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
    count: usize,
}

impl CompensatedSum {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one term.
    #[inline]
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
        self.count += 1;
    }

    /// Returns the compensated total.
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }

    /// Returns the number of terms added.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the mean of the added terms, or NaN if none were added.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.value() / self.count as f64
        }
    }
}

impl Extend<f64> for CompensatedSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = Self::new();
        sum.extend(iter);
        sum
    }
}

/// Returns the compensated mean of `values` (NaN for an empty slice).
#[inline]
pub fn compensated_mean(values: &[f64]) -> f64 {
    values.iter().copied().collect::<CompensatedSum>().mean()
}
