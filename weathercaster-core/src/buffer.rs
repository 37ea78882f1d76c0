//! Fixed-Size Circular Buffer for Sensor History
//!
//! ## Overview
//!
//! The forecast methods need two kinds of history: a reading from six hours
//! ago (for the pressure and wind trends) and every reading from the last ten
//! minutes (for the wind vector average). Both are answered from a ring of
//! timestamped samples whose capacity is fixed at compile time.
//!
//! ## Sizing
//!
//! At the default 10 minute engine cadence a 6 h lookback needs 37 samples.
//! Sensors that push faster than the engine polls need more; the in-memory
//! data source uses 512 slots, which covers a sample every 45 s.
//!
//! ```text
//! CircularBuffer<5> after 7 pushes (s0..s6):
//! ┌────┬────┬────┬────┬────┐
//! │ s5 │ s6 │ s2 │ s3 │ s4 │  ← physical slots
//! └────┴────┴────┴────┴────┘
//!            ↑
//!            └── write_pos = 2, oldest sample
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use weathercaster_core::buffer::CircularBuffer;
//! use weathercaster_core::traits::Sample;
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
//! let mut history: CircularBuffer<64> = CircularBuffer::new();
//! history.push(Sample { value: 1016.0, timestamp: t0 });
//! history.push(Sample { value: 1013.0, timestamp: t0 + Duration::hours(6) });
//!
//! let six_hours_ago = history.at_or_before(t0 + Duration::minutes(5)).map(|s| s.value);
//! assert_eq!(six_hours_ago, Some(1016.0));
//! ```

use chrono::{DateTime, Utc};

use crate::traits::Sample;

/// Fixed-size circular buffer of timestamped samples
///
/// Overwrites the oldest sample when full. Samples are expected in
/// chronological order; lookups scan from the newest end.
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - Iteration yields samples oldest first
#[derive(Clone)]
pub struct CircularBuffer<const N: usize> {
    data: [Option<Sample>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid samples
    len: usize,
}

impl<const N: usize> CircularBuffer<N> {
    /// Creates a new empty circular buffer
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds a sample, overwriting the oldest one when full
    pub fn push(&mut self, sample: Sample) {
        self.data[self.write_pos] = Some(sample);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Get number of stored samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Get the most recent sample
    pub fn last(&self) -> Option<&Sample> {
        if self.is_empty() {
            return None;
        }
        self.get(self.len - 1)
    }

    /// Most recent sample taken at or before `instant`
    ///
    /// This is the history-query primitive: "what did the sensor say six
    /// hours ago" is `at_or_before(now - 6h)`.
    pub fn at_or_before(&self, instant: DateTime<Utc>) -> Option<&Sample> {
        (0..self.len)
            .rev()
            .filter_map(|i| self.get(i))
            .find(|s| s.timestamp <= instant)
    }

    /// Samples with `since <= timestamp <= until`, oldest first
    pub fn window(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> impl Iterator<Item = &Sample> + '_ {
        self.iter()
            .filter(move |s| s.timestamp >= since && s.timestamp <= until)
    }

    /// Iterate over samples from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Clear all samples
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }

    /// Gets a sample by logical index (0 = oldest, len-1 = newest)
    ///
    /// When full, the oldest element sits at `write_pos`:
    ///
    /// ```text
    /// Physical: [D, E, A, B, C]  (write_pos = 2)
    /// Logical:  [A, B, C, D, E]
    /// ```
    fn get(&self, index: usize) -> Option<&Sample> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over circular buffer contents
pub struct CircularBufferIter<'a, const N: usize> {
    buffer: &'a CircularBuffer<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for CircularBufferIter<'a, N> {
    type Item = &'a Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }
}

impl<const N: usize> Default for CircularBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn sample(value: f64, minutes: i64) -> Sample {
        Sample { value, timestamp: t(minutes) }
    }

    #[test]
    fn empty_buffer() {
        let buffer: CircularBuffer<5> = CircularBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert!(buffer.last().is_none());
        assert!(buffer.at_or_before(t(100)).is_none());
    }

    #[test]
    fn circular_overwrite() {
        let mut buffer = CircularBuffer::<3>::new();
        for i in 0..5 {
            buffer.push(sample(i as f64, i));
        }

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());
        let values: Vec<f64> = buffer.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
        assert_eq!(buffer.last().unwrap().value, 4.0);
    }

    #[test]
    fn at_or_before_picks_latest_eligible() {
        let mut buffer = CircularBuffer::<8>::new();
        buffer.push(sample(1.0, 0));
        buffer.push(sample(2.0, 10));
        buffer.push(sample(3.0, 20));

        assert_eq!(buffer.at_or_before(t(15)).unwrap().value, 2.0);
        assert_eq!(buffer.at_or_before(t(10)).unwrap().value, 2.0);
        assert_eq!(buffer.at_or_before(t(60)).unwrap().value, 3.0);
        assert!(buffer.at_or_before(t(-1)).is_none());
    }

    #[test]
    fn at_or_before_after_wraparound() {
        let mut buffer = CircularBuffer::<4>::new();
        for i in 0..10 {
            buffer.push(sample(i as f64, i * 10));
        }
        // Oldest retained sample is at 60 minutes
        assert!(buffer.at_or_before(t(55)).is_none());
        assert_eq!(buffer.at_or_before(t(75)).unwrap().value, 7.0);
    }

    #[test]
    fn window_is_inclusive() {
        let mut buffer = CircularBuffer::<8>::new();
        for i in 0..6 {
            buffer.push(sample(i as f64, i * 5));
        }
        let values: Vec<f64> = buffer.window(t(10), t(20)).map(|s| s.value).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }
}
