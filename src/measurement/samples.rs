//! The ordered sequence of per-iteration durations.

use std::time::Duration;

/// Durations recorded by one run, in measurement order.
///
/// A `Samples` value is produced once by the runner and never modified
/// afterwards; the caller that requested the run owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Samples {
    durations: Vec<Duration>,
}

impl Samples {
    pub(crate) fn from_durations(durations: Vec<Duration>) -> Self {
        Self { durations }
    }

    /// Number of samples (equal to the iteration count of the run).
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// True when the run had zero iterations.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Samples as durations, in measurement order.
    pub fn as_slice(&self) -> &[Duration] {
        &self.durations
    }

    /// Iterate over samples as durations.
    pub fn iter(&self) -> std::slice::Iter<'_, Duration> {
        self.durations.iter()
    }

    /// Iterate over samples as floating-point seconds.
    pub fn seconds(&self) -> impl Iterator<Item = f64> + '_ {
        self.durations.iter().map(Duration::as_secs_f64)
    }

    /// Sum of all samples.
    pub fn total(&self) -> Duration {
        self.durations.iter().sum()
    }
}

impl<'a> IntoIterator for &'a Samples {
    type Item = &'a Duration;
    type IntoIter = std::slice::Iter<'a, Duration>;

    fn into_iter(self) -> Self::IntoIter {
        self.durations.iter()
    }
}
