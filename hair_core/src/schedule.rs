//! Wash-day distribution across the week.
//!
//! Maps a wash frequency to a fixed Monday-first pattern of activities.
//! The pattern only depends on the frequency and the refresh flag, never on
//! the treatment cycle.

use crate::Activity;
use crate::Activity::{Refresh, Rest, Wash};

/// Most wash days the weekly pattern places; higher frequencies share the 4-day pattern
pub const MAX_WASH_DAYS: usize = 4;

/// Build the seven activities of a week, Monday first
///
/// | wash days | pattern (Mon..Sun)                                      |
/// |-----------|---------------------------------------------------------|
/// | 1         | wash Mon, every other day refresh (or rest)             |
/// | 2         | wash Mon/Thu, Tue/Fri refresh (or rest), rest otherwise |
/// | 3         | wash Mon/Wed/Fri, Tue/Thu refresh (or rest), rest weekend |
/// | 4+        | wash Mon/Tue/Thu/Sat, rest otherwise (refresh ignored)  |
///
/// Anything below 1 yields an all-rest week instead of failing.
pub fn distribute_week(wash_days_per_week: i32, needs_refresh: bool) -> [Activity; 7] {
    let between = if needs_refresh { Refresh } else { Rest };

    let week = match wash_days_per_week {
        1 => [Wash, between, between, between, between, between, between],
        2 => [Wash, between, Rest, Wash, between, Rest, Rest],
        3 => [Wash, between, Wash, between, Wash, Rest, Rest],
        n if n >= MAX_WASH_DAYS as i32 => [Wash, Wash, Rest, Wash, Rest, Wash, Rest],
        other => {
            tracing::warn!(
                "Wash frequency {} has no weekly pattern, scheduling a rest week",
                other
            );
            [Rest; 7]
        }
    };

    tracing::debug!(
        "Distributed {} wash days (refresh={}): {:?}",
        wash_days_per_week,
        needs_refresh,
        week
    );

    week
}

/// Number of wash days a pattern actually contains
pub fn count_wash_days(week: &[Activity]) -> usize {
    week.iter().filter(|a| **a == Wash).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_wash_day_without_refresh() {
        let week = distribute_week(1, false);
        assert_eq!(week, [Wash, Rest, Rest, Rest, Rest, Rest, Rest]);
    }

    #[test]
    fn test_one_wash_day_with_refresh() {
        let week = distribute_week(1, true);
        assert_eq!(
            week,
            [Wash, Refresh, Refresh, Refresh, Refresh, Refresh, Refresh]
        );
    }

    #[test]
    fn test_two_wash_days() {
        assert_eq!(
            distribute_week(2, true),
            [Wash, Refresh, Rest, Wash, Refresh, Rest, Rest]
        );
        assert_eq!(
            distribute_week(2, false),
            [Wash, Rest, Rest, Wash, Rest, Rest, Rest]
        );
    }

    #[test]
    fn test_three_wash_days() {
        assert_eq!(
            distribute_week(3, true),
            [Wash, Refresh, Wash, Refresh, Wash, Rest, Rest]
        );
        assert_eq!(
            distribute_week(3, false),
            [Wash, Rest, Wash, Rest, Wash, Rest, Rest]
        );
    }

    #[test]
    fn test_four_or_more_ignores_refresh() {
        let expected = [Wash, Wash, Rest, Wash, Rest, Wash, Rest];
        for n in 4..=7 {
            assert_eq!(distribute_week(n, true), expected);
            assert_eq!(distribute_week(n, false), expected);
        }
    }

    #[test]
    fn test_malformed_counts_rest_all_week() {
        for n in [0, -1, i32::MIN] {
            assert_eq!(distribute_week(n, true), [Rest; 7]);
            assert_eq!(distribute_week(n, false), [Rest; 7]);
        }
    }

    #[test]
    fn test_wash_count_matches_frequency_up_to_four() {
        for n in 1..=4 {
            for refresh in [false, true] {
                assert_eq!(count_wash_days(&distribute_week(n, refresh)), n as usize);
            }
        }
    }
}
