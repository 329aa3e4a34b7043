//! Weekly care calendar generation.
//!
//! Combines a profile's treatment cycle with the wash-day pattern:
//! 1. Take the treatments for the requested cycle week
//! 2. Lay out the seven activities with [`distribute_week`]
//! 3. Hand each wash day the next treatment in order
//! 4. Render every day with [`build_details`]
//!
//! Days are always Monday first.

use crate::details::build_details;
use crate::schedule::distribute_week;
use crate::{
    Activity, CalendarWarning, CycleWeek, DayRoutine, HairProfile, Treatment, WeeklyCalendar,
};
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Generate the calendar for one cycle week
///
/// `start_date` is moved back to the Monday of its week; `None` means the
/// current week. A week that would run past the last representable date is
/// replaced by the week before it. If the profile defines fewer treatments
/// than there are wash days, the extra wash days get no treatment and a
/// warning is recorded.
pub fn generate_weekly_calendar(
    profile: &HairProfile,
    cycle_week: CycleWeek,
    start_date: Option<NaiveDate>,
) -> WeeklyCalendar {
    let mut monday = week_start(start_date.unwrap_or_else(today));
    if monday.checked_add_days(Days::new(6)).is_none() {
        monday = monday - Days::new(7);
    }
    let schedule = profile.cycle.week(cycle_week);
    let activities = distribute_week(profile.wash_days_per_week, profile.needs_refresh);

    let mut wash_cursor = 0;
    let mut warnings = Vec::new();

    let days: [DayRoutine; 7] = std::array::from_fn(|i| {
        let date = monday + Days::new(i as u64);
        let activity = activities[i];

        let treatment = if activity == Activity::Wash {
            let treatment = schedule.get(wash_cursor).copied();
            wash_cursor += 1;
            if treatment.is_none() {
                tracing::warn!(
                    "Profile {} week {}: no treatment left for wash day {} ({} defined)",
                    profile.id,
                    cycle_week,
                    wash_cursor,
                    schedule.len()
                );
                warnings.push(CalendarWarning::MissingTreatment {
                    weekday: date.weekday(),
                });
            }
            treatment
        } else {
            None
        };

        day_routine(date, activity, treatment, profile)
    });

    tracing::debug!(
        "Generated week {} for {} starting {}",
        cycle_week,
        profile.id,
        monday
    );

    WeeklyCalendar {
        profile_id: profile.id.clone(),
        cycle_week,
        start_date: monday,
        days,
        warnings,
    }
}

fn day_routine(
    date: NaiveDate,
    activity: Activity,
    treatment: Option<Treatment>,
    profile: &HairProfile,
) -> DayRoutine {
    let details = build_details(activity, treatment, profile);
    DayRoutine {
        weekday: date.weekday(),
        date,
        activity,
        treatment,
        title: details.title,
        description: details.description,
        duration_label: details.duration_label,
        icon: details.icon,
        products: details.products,
        steps: details.steps,
    }
}

/// Convert a Sunday-based weekday index (Sunday = 0) to a Monday-first one
pub fn monday_first_index(sunday_based: u32) -> usize {
    ((sunday_based + 6) % 7) as usize
}

/// The routine the calendar assigns to the weekday of `date`
pub fn routine_for_date(calendar: &WeeklyCalendar, date: NaiveDate) -> &DayRoutine {
    routine_for_weekday(calendar, date.weekday())
}

/// The routine the calendar assigns to a weekday
pub fn routine_for_weekday(calendar: &WeeklyCalendar, weekday: Weekday) -> &DayRoutine {
    &calendar.days[monday_first_index(weekday.num_days_from_sunday())]
}

/// Today's routine, by local weekday
pub fn get_today_routine(calendar: &WeeklyCalendar) -> &DayRoutine {
    routine_for_date(calendar, today())
}

/// Advance to the next cycle week (3 wraps to 1)
pub fn next_cycle_week(current: CycleWeek) -> CycleWeek {
    current.next()
}

/// Cycle week for `date` when week 1 started in the week of `cycle_start`
///
/// Dates before the cycle started map to week 1.
pub fn cycle_week_for_date(cycle_start: NaiveDate, date: NaiveDate) -> CycleWeek {
    let elapsed_weeks = (week_start(date) - week_start(cycle_start)).num_days() / 7;
    if elapsed_weeks <= 0 {
        return CycleWeek::One;
    }

    (0..elapsed_weeks % 3).fold(CycleWeek::One, |week, _| next_cycle_week(week))
}

/// Monday of the week containing `date`
///
/// For the first representable week, which has no Monday, the following
/// Monday.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .unwrap_or_else(|| date + Days::new(7 - offset))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
