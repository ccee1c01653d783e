//! Sub-second timestamp interpolation
//!
//! The logger samples at a nominal 4 Hz but its clock only resolves whole
//! seconds, so up to four fixes arrive with identical timestamps. Fixes are
//! grouped by their truncated-to-the-second timestamp; when a group reaches
//! exactly four members the last three are spread to +250/+500/+750 ms.
//! A second that ended with only three samples is caught up once the stream
//! moves on: its members get +500/+750 ms, provided nothing in the group was
//! interpolated before. Groups of any other size keep zero offsets for all
//! members, which can leave duplicate timestamps within a second.

use std::collections::HashMap;

use chrono::{Duration, Timelike};

use crate::types::Fix;

const GROUP_KEY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Per-decode-pass grouping of fixes by coarse second.
///
/// Holds indices into the caller's fix vector rather than the fixes
/// themselves; timestamps are patched in place. Groups are never evicted
/// because the previous-second lookback depends on them surviving the
/// whole pass.
#[derive(Debug, Default)]
pub struct MsInterpolator {
    groups: HashMap<String, Vec<usize>>,
}

impl MsInterpolator {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    /// Record the fix at `index`, freshly appended to `fixes`, and apply
    /// any interpolation its arrival triggers.
    pub fn record(&mut self, fixes: &mut [Fix], index: usize) {
        let key = fixes[index].timestamp.format(GROUP_KEY_FORMAT).to_string();
        let group = self.groups.entry(key).or_default();
        group.push(index);

        if group.len() == 4 {
            let slots = [group[1], group[2], group[3]];
            for (slot, offset_ms) in slots.into_iter().zip([250i64, 500, 750]) {
                fixes[slot].timestamp += Duration::milliseconds(offset_ms);
            }
        }

        self.patch_previous_second(fixes, index);
    }

    /// Catch-up pass for the second before the current fix: a group that
    /// ended with exactly three members and was never interpolated gets
    /// +500/+750 ms on its second and third members.
    fn patch_previous_second(&self, fixes: &mut [Fix], index: usize) {
        let prev_key = (fixes[index].timestamp - Duration::seconds(1))
            .format(GROUP_KEY_FORMAT)
            .to_string();
        let prev_group = match self.groups.get(&prev_key) {
            Some(group) => group,
            None => return,
        };

        // A non-zero sub-second offset anywhere means this group was
        // already interpolated
        if prev_group
            .iter()
            .any(|&i| fixes[i].timestamp.nanosecond() != 0)
        {
            return;
        }

        if prev_group.len() == 3 {
            fixes[prev_group[1]].timestamp += Duration::milliseconds(500);
            fixes[prev_group[2]].timestamp += Duration::milliseconds(750);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FixType;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn make_fix(timestamp: NaiveDateTime) -> Fix {
        Fix {
            timestamp,
            latitude: 34.76,
            longitude: -118.12,
            altitude_ft: 150.0,
            max_altitude_ft: 150.0,
            horizontal_accuracy: 500,
            vertical_accuracy: 800,
            north_vel: 0,
            east_vel: 0,
            down_vel: 0,
            position_dop: 150,
            vertical_dop: 120,
            northing_dop: 100,
            easting_dop: 100,
            satellite_count: 8,
            fix_type: FixType::Lock3D,
            sequence: 0,
        }
    }

    fn run_interpolation(timestamps: &[NaiveDateTime]) -> Vec<Fix> {
        let mut fixes = Vec::new();
        let mut interp = MsInterpolator::new();
        for &timestamp in timestamps {
            fixes.push(make_fix(timestamp));
            let index = fixes.len() - 1;
            interp.record(&mut fixes, index);
        }
        fixes
    }

    fn millis(fix: &Fix) -> u32 {
        fix.timestamp.nanosecond() / 1_000_000
    }

    #[test]
    fn test_four_samples_spread_across_second() {
        let fixes = run_interpolation(&[ts(10, 0, 0); 4]);
        let offsets: Vec<u32> = fixes.iter().map(millis).collect();
        assert_eq!(offsets, vec![0, 250, 500, 750]);
    }

    #[test]
    fn test_three_samples_back_patched_by_next_second() {
        let fixes = run_interpolation(&[ts(10, 0, 0), ts(10, 0, 0), ts(10, 0, 0), ts(10, 0, 1)]);
        let offsets: Vec<u32> = fixes.iter().map(millis).collect();
        assert_eq!(offsets, vec![0, 500, 750, 0]);
    }

    #[test]
    fn test_completed_group_not_back_patched() {
        let mut timestamps = vec![ts(10, 0, 0); 4];
        timestamps.push(ts(10, 0, 1));
        timestamps.push(ts(10, 0, 1));
        let fixes = run_interpolation(&timestamps);
        // The 10:00:00 group keeps its one-time 250/500/750 interpolation
        let offsets: Vec<u32> = fixes[..4].iter().map(millis).collect();
        assert_eq!(offsets, vec![0, 250, 500, 750]);
    }

    #[test]
    fn test_back_patch_applied_once() {
        let fixes = run_interpolation(&[
            ts(10, 0, 0),
            ts(10, 0, 0),
            ts(10, 0, 0),
            ts(10, 0, 1),
            ts(10, 0, 1),
        ]);
        let offsets: Vec<u32> = fixes.iter().map(millis).collect();
        // The second 10:00:01 arrival sees a non-zero offset in the
        // previous group and leaves it alone
        assert_eq!(offsets, vec![0, 500, 750, 0, 0]);
    }

    #[test]
    fn test_two_member_group_left_untouched() {
        let fixes = run_interpolation(&[ts(10, 0, 0), ts(10, 0, 0), ts(10, 0, 1)]);
        let offsets: Vec<u32> = fixes.iter().map(millis).collect();
        assert_eq!(offsets, vec![0, 0, 0]);
    }

    #[test]
    fn test_fifth_sample_keeps_zero_offset() {
        let fixes = run_interpolation(&[ts(10, 0, 0); 5]);
        let offsets: Vec<u32> = fixes.iter().map(millis).collect();
        // Excess members beyond the 4 Hz assumption are left alone, even
        // though that duplicates the first member's timestamp
        assert_eq!(offsets, vec![0, 250, 500, 750, 0]);
    }

    #[test]
    fn test_unrelated_seconds_do_not_interact() {
        let fixes = run_interpolation(&[ts(10, 0, 0), ts(10, 0, 5), ts(10, 0, 9)]);
        let offsets: Vec<u32> = fixes.iter().map(millis).collect();
        assert_eq!(offsets, vec![0, 0, 0]);
    }
}
