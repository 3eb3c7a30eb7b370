//! Pending backward intervals
//!
//! When a row scan extends past the interval it was asked to scan, the
//! extra columns on that row still need their neighbor row in the other
//! direction examined. Those spans are parked here as backward intervals
//! until the fill swaps direction. In the meantime, any forward interval
//! landing on the same columns of the same row means the two fronts have
//! met: [`FillIntervalMap::crop_interval`] removes the shared columns from
//! both sides so neither gets scanned twice.

use crate::interval::{Direction, FillInterval};
use crate::sanity::SanityChecks;
use std::collections::BTreeMap;

type LineMap = BTreeMap<i32, FillInterval>;

/// Backward intervals keyed by `(row, direction)`, then by start column
///
/// Intervals stored under one key never overlap or touch.
#[derive(Debug, Clone, Default)]
pub struct FillIntervalMap {
    lines: BTreeMap<(i32, Direction), LineMap>,
    sanity: SanityChecks,
}

impl FillIntervalMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with the given check mode
    pub fn with_sanity_checks(sanity: SanityChecks) -> Self {
        Self {
            lines: BTreeMap::new(),
            sanity,
        }
    }

    pub(crate) fn set_sanity_checks(&mut self, sanity: SanityChecks) {
        self.sanity = sanity;
    }

    /// Insert an interval, merging it with overlapping or adjacent ones
    ///
    /// Invalid intervals are rejected through the sanity checks.
    ///
    /// # Examples
    ///
    /// ```
    /// use scanfill_flood::{FillInterval, FillIntervalMap};
    ///
    /// let mut map = FillIntervalMap::new();
    /// map.insert_interval(FillInterval::up(0, 3, 5));
    /// map.insert_interval(FillInterval::up(4, 9, 5));
    /// assert_eq!(map.intervals(), vec![FillInterval::up(0, 9, 5)]);
    /// ```
    pub fn insert_interval(&mut self, interval: FillInterval) {
        if !interval.is_valid() {
            self.sanity
                .violation(format_args!("inserting invalid interval {interval}"));
            return;
        }

        let line = self
            .lines
            .entry((interval.row, interval.direction))
            .or_default();

        let mut merged = interval;
        let reach = (interval.end as i64 + 1).min(i32::MAX as i64) as i32;
        let touching: Vec<i32> = line
            .range(..=reach)
            .rev()
            .take_while(|(_, b)| b.end as i64 + 1 >= interval.start as i64)
            .map(|(start, _)| *start)
            .collect();

        for start in touching {
            if let Some(b) = line.remove(&start) {
                merged.start = merged.start.min(b.start);
                merged.end = merged.end.max(b.end);
            }
        }
        line.insert(merged.start, merged);
    }

    /// Remove from `interval` and from the stored backward intervals the
    /// columns they share
    ///
    /// Only intervals stored under `(interval.row, interval.direction.opposite())`
    /// are considered. A backward interval lying strictly inside `interval`
    /// is an invariant violation.
    pub fn crop_interval(&mut self, interval: &mut FillInterval) {
        let key = (interval.row, interval.direction.opposite());
        let Some(line) = self.lines.get_mut(&key) else {
            return;
        };

        let candidates: Vec<i32> = line.range(..=interval.end).map(|(s, _)| *s).collect();

        for start in candidates {
            if !interval.is_valid() {
                break;
            }
            let Some(mut b) = line.get(&start).copied() else {
                continue;
            };
            if b.end < interval.start {
                continue;
            }

            if b.start <= interval.start && interval.start <= b.end {
                line.remove(&start);
                let consumed_to = b.end;
                if b.end > interval.end {
                    let tail =
                        FillInterval::new_unchecked(interval.end + 1, b.end, b.row, b.direction);
                    line.insert(tail.start, tail);
                }
                if b.start < interval.start {
                    b.end = interval.start - 1;
                    line.insert(b.start, b);
                }
                match consumed_to.checked_add(1) {
                    Some(next) => interval.start = next,
                    None => interval.invalidate(),
                }
            } else if b.start <= interval.end && interval.end <= b.end {
                line.remove(&start);
                let saved_end = interval.end;
                interval.end = b.start - 1;
                if saved_end < b.end {
                    b.start = saved_end + 1;
                    line.insert(b.start, b);
                }
            } else if b.start > interval.end {
                break;
            } else {
                self.sanity.violation(format_args!(
                    "backward interval {b} lies inside processed interval {interval}"
                ));
            }
        }

        if line.is_empty() {
            self.lines.remove(&key);
        }
    }

    /// Drain every interval, moving each one `row_correction` rows
    ///
    /// Intervals whose corrected row would overflow are dropped.
    pub fn take_all(&mut self, row_correction: i32) -> Vec<FillInterval> {
        let lines = std::mem::take(&mut self.lines);
        lines
            .into_values()
            .flat_map(BTreeMap::into_values)
            .filter_map(|mut interval| {
                interval.row = interval.row.checked_add(row_correction)?;
                Some(interval)
            })
            .collect()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of stored intervals
    pub fn len(&self) -> usize {
        self.lines.values().map(BTreeMap::len).sum()
    }

    /// Whether the map holds no intervals
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether exactly this interval is stored
    pub fn contains(&self, interval: &FillInterval) -> bool {
        self.lines
            .get(&(interval.row, interval.direction))
            .and_then(|line| line.get(&interval.start))
            .is_some_and(|b| b == interval)
    }

    /// All stored intervals ordered by row, direction and start column
    pub fn intervals(&self) -> Vec<FillInterval> {
        self.lines
            .values()
            .flat_map(|line| line.values().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked() -> FillIntervalMap {
        FillIntervalMap::with_sanity_checks(SanityChecks::new(true))
    }

    #[test]
    fn test_insert_merges_overlapping_and_adjacent() {
        let mut map = checked();
        map.insert_interval(FillInterval::up(0, 2, 0));
        map.insert_interval(FillInterval::up(10, 12, 0));
        map.insert_interval(FillInterval::up(5, 6, 0));
        assert_eq!(map.len(), 3);

        map.insert_interval(FillInterval::up(3, 4, 0));
        assert_eq!(
            map.intervals(),
            vec![FillInterval::up(0, 6, 0), FillInterval::up(10, 12, 0)]
        );

        map.insert_interval(FillInterval::up(-5, 11, 0));
        assert_eq!(map.intervals(), vec![FillInterval::up(-5, 12, 0)]);
    }

    #[test]
    fn test_insert_keeps_keys_apart() {
        let mut map = checked();
        map.insert_interval(FillInterval::up(0, 2, 0));
        map.insert_interval(FillInterval::down(0, 2, 0));
        map.insert_interval(FillInterval::up(0, 2, 1));
        assert_eq!(map.len(), 3);
        assert!(map.contains(&FillInterval::down(0, 2, 0)));
        assert!(!map.contains(&FillInterval::down(0, 1, 0)));
    }

    #[test]
    fn test_insert_twice_is_idempotent() {
        let mut map = checked();
        map.insert_interval(FillInterval::up(3, 8, 2));
        let once = map.intervals();
        map.insert_interval(FillInterval::up(3, 8, 2));
        assert_eq!(map.intervals(), once);
    }

    #[test]
    #[should_panic(expected = "invalid interval")]
    fn test_insert_invalid_panics_when_checked() {
        checked().insert_interval(FillInterval::up(3, 2, 0));
    }

    #[test]
    fn test_insert_invalid_ignored_when_unchecked() {
        let mut map = FillIntervalMap::with_sanity_checks(SanityChecks::new(false));
        map.insert_interval(FillInterval::up(3, 2, 0));
        assert!(map.is_empty());
    }

    #[test]
    fn test_crop_full_collision_splits_backward() {
        let mut map = checked();
        map.insert_interval(FillInterval::up(-10, 20, 0));
        let mut iv = FillInterval::down(0, 10, 0);
        map.crop_interval(&mut iv);
        assert!(!iv.is_valid());
        assert_eq!(
            map.intervals(),
            vec![FillInterval::up(-10, -1, 0), FillInterval::up(11, 20, 0)]
        );
    }

    #[test]
    fn test_crop_left_and_right_collisions() {
        let mut map = checked();
        map.insert_interval(FillInterval::up(-10, 2, 0));
        map.insert_interval(FillInterval::up(8, 15, 0));
        let mut iv = FillInterval::down(0, 10, 0);
        map.crop_interval(&mut iv);
        assert_eq!(iv, FillInterval::down(3, 7, 0));
        assert_eq!(
            map.intervals(),
            vec![FillInterval::up(-10, -1, 0), FillInterval::up(11, 15, 0)]
        );
    }

    #[test]
    fn test_crop_consumes_exact_match() {
        let mut map = checked();
        map.insert_interval(FillInterval::up(0, 10, 4));
        let mut iv = FillInterval::down(0, 10, 4);
        map.crop_interval(&mut iv);
        assert!(!iv.is_valid());
        assert!(map.is_empty());
    }

    #[test]
    fn test_crop_ignores_same_direction_and_other_rows() {
        let mut map = checked();
        map.insert_interval(FillInterval::down(0, 10, 0));
        map.insert_interval(FillInterval::up(0, 10, 1));
        let mut iv = FillInterval::down(0, 10, 0);
        map.crop_interval(&mut iv);
        assert_eq!(iv, FillInterval::down(0, 10, 0));
        assert_eq!(map.len(), 2);
    }

    #[test]
    #[should_panic(expected = "lies inside")]
    fn test_crop_backward_inside_panics_when_checked() {
        let mut map = checked();
        map.insert_interval(FillInterval::up(2, 3, 0));
        let mut iv = FillInterval::down(0, 10, 0);
        map.crop_interval(&mut iv);
    }

    #[test]
    fn test_take_all_applies_correction() {
        let mut map = checked();
        map.insert_interval(FillInterval::up(0, 1, 5));
        map.insert_interval(FillInterval::up(4, 6, 7));
        map.insert_interval(FillInterval::up(0, 0, i32::MIN));
        let taken = map.take_all(-1);
        assert!(map.is_empty());
        assert_eq!(
            taken,
            vec![FillInterval::up(0, 1, 4), FillInterval::up(4, 6, 6)]
        );
    }
}
