use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Months, Utc};

use crate::models::{Event, Heatmap, HeatmapDay, MonthLabel};
use crate::palette::ACTIVITY_LEVEL_COLORS;

/// Calendar months covered by the heat-map window.
const WINDOW_MONTHS: u32 = 6;

/// Daily contribution heat-map for the trailing six months, ending at the
/// calendar date of `now`.
///
/// Days are keyed by UTC calendar date, never by timestamp, so a commit at
/// 23:59 lands on the same cell regardless of the renderer's locale. The
/// grid is extended backwards to the nearest Sunday so every week column
/// starts on a Sunday; the padding days sit outside the counting window and
/// always carry zero.
pub fn contribution_heatmap(events: &[Event], now: DateTime<Utc>) -> Heatmap {
    let today = now.date_naive();
    let window_start = super::activity::month_start(today)
        .checked_sub_months(Months::new(WINDOW_MONTHS - 1))
        .unwrap_or_else(|| super::activity::month_start(today));

    let mut counts: BTreeMap<_, u32> = BTreeMap::new();
    let mut day = window_start;
    while day <= today {
        counts.insert(day, 0);
        day = day.succ_opt().expect("date in range");
    }

    for event in events.iter().filter(|e| e.kind.is_contribution()) {
        if let Some(count) = counts.get_mut(&event.created_at.date_naive()) {
            *count += 1;
        }
    }

    // Floored at 1 so an all-zero window still divides cleanly.
    let max_count = counts.values().copied().max().unwrap_or(0).max(1);

    let padding = i64::from(window_start.weekday().num_days_from_sunday());
    let grid_start = window_start - Duration::days(padding);

    let mut weeks: Vec<Vec<HeatmapDay>> = Vec::new();
    let mut week: Vec<HeatmapDay> = Vec::with_capacity(7);
    let mut day = grid_start;
    while day <= today {
        let count = counts.get(&day).copied().unwrap_or(0);
        week.push(HeatmapDay {
            date: day,
            count,
            level: activity_level(count, max_count),
        });
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
        day = day.succ_opt().expect("date in range");
    }
    if !week.is_empty() {
        weeks.push(week);
    }

    let mut month_labels: Vec<MonthLabel> = Vec::new();
    let mut last_month = None;
    for (index, week) in weeks.iter().enumerate() {
        let first = week[0].date;
        if last_month != Some(first.month()) {
            month_labels.push(MonthLabel {
                week: index,
                label: first.format("%b").to_string(),
            });
            last_month = Some(first.month());
        }
    }

    Heatmap {
        weeks,
        month_labels,
        palette: ACTIVITY_LEVEL_COLORS,
    }
}

/// 0 for an idle day, otherwise `ceil(count / max_count * 4)` clamped to 4.
fn activity_level(count: u32, max_count: u32) -> u8 {
    if count == 0 {
        return 0;
    }
    let level = (count * 4 + max_count - 1) / max_count;
    level.min(4) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, EventPayload};
    use chrono::{NaiveDate, TimeZone, Weekday};

    fn event(kind: &str, created_at: DateTime<Utc>) -> Event {
        Event {
            id: "0".to_string(),
            kind: EventKind::from(kind),
            created_at,
            payload: EventPayload::Untyped,
        }
    }

    fn now() -> DateTime<Utc> {
        // Tuesday; the window runs from 2025-03-01 (a Saturday)
        Utc.with_ymd_and_hms(2025, 8, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_grid_starts_on_a_sunday_and_ends_today() {
        let heatmap = contribution_heatmap(&[], now());
        let first = heatmap.weeks[0][0].date;
        assert_eq!(first.weekday(), Weekday::Sun);
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 2, 23).unwrap());

        let last_week = heatmap.weeks.last().unwrap();
        let last = last_week.last().unwrap().date;
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 8, 5).unwrap());
    }

    #[test]
    fn test_all_weeks_are_full_except_possibly_the_last() {
        let heatmap = contribution_heatmap(&[], now());
        let (last, full) = heatmap.weeks.split_last().unwrap();
        assert!(full.iter().all(|w| w.len() == 7));
        assert!(last.len() <= 7);
        assert!(!last.is_empty());
    }

    #[test]
    fn test_padding_days_before_the_window_carry_zero() {
        // Activity on every day of the window would still leave the
        // padding days (Feb 23..=28) at zero.
        let events = vec![event(
            "PushEvent",
            Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
        )];
        let heatmap = contribution_heatmap(&events, now());
        let first_week = &heatmap.weeks[0];
        for day in first_week.iter().take(6) {
            assert_eq!(day.count, 0);
            assert_eq!(day.level, 0);
        }
        assert_eq!(first_week[6].count, 1);
    }

    #[test]
    fn test_level_is_zero_only_for_idle_days() {
        let events = vec![
            event("PushEvent", Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap()),
            event("PushEvent", Utc.with_ymd_and_hms(2025, 7, 2, 8, 0, 0).unwrap()),
            event("IssuesEvent", Utc.with_ymd_and_hms(2025, 7, 2, 9, 0, 0).unwrap()),
        ];
        let heatmap = contribution_heatmap(&events, now());
        for week in &heatmap.weeks {
            for day in week {
                assert_eq!(day.level == 0, day.count == 0, "day {}", day.date);
            }
        }
    }

    #[test]
    fn test_levels_normalize_against_the_window_maximum() {
        let mut events = Vec::new();
        for _ in 0..8 {
            events.push(event("PushEvent", Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap()));
        }
        for _ in 0..3 {
            events.push(event("PushEvent", Utc.with_ymd_and_hms(2025, 6, 11, 8, 0, 0).unwrap()));
        }
        events.push(event("PushEvent", Utc.with_ymd_and_hms(2025, 6, 12, 8, 0, 0).unwrap()));

        let heatmap = contribution_heatmap(&events, now());
        let day_level = |d: u32| {
            heatmap
                .weeks
                .iter()
                .flatten()
                .find(|day| day.date == NaiveDate::from_ymd_opt(2025, 6, d).unwrap())
                .map(|day| day.level)
                .unwrap()
        };
        assert_eq!(day_level(10), 4); // 8/8 -> ceil(4.0)
        assert_eq!(day_level(11), 2); // 3/8 -> ceil(1.5)
        assert_eq!(day_level(12), 1); // 1/8 -> ceil(0.5)
    }

    #[test]
    fn test_single_event_maxes_its_day() {
        let events = vec![event(
            "CreateEvent",
            Utc.with_ymd_and_hms(2025, 5, 20, 8, 0, 0).unwrap(),
        )];
        let heatmap = contribution_heatmap(&events, now());
        let day = heatmap
            .weeks
            .iter()
            .flatten()
            .find(|d| d.count > 0)
            .unwrap();
        assert_eq!(day.level, 4);
    }

    #[test]
    fn test_non_contribution_and_out_of_window_events_are_ignored() {
        let events = vec![
            event("WatchEvent", Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap()),
            event("PushEvent", Utc.with_ymd_and_hms(2025, 2, 28, 8, 0, 0).unwrap()),
            event("PushEvent", Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap()),
        ];
        let heatmap = contribution_heatmap(&events, now());
        assert!(heatmap.weeks.iter().flatten().all(|d| d.count == 0));
    }

    #[test]
    fn test_permuting_events_does_not_change_day_counts() {
        let mut events = vec![
            event("PushEvent", Utc.with_ymd_and_hms(2025, 4, 3, 8, 0, 0).unwrap()),
            event("IssuesEvent", Utc.with_ymd_and_hms(2025, 4, 3, 9, 0, 0).unwrap()),
            event("CreateEvent", Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap()),
        ];
        let forward = contribution_heatmap(&events, now());
        events.reverse();
        let backward = contribution_heatmap(&events, now());

        let flatten = |h: &Heatmap| -> Vec<(NaiveDate, u32)> {
            h.weeks.iter().flatten().map(|d| (d.date, d.count)).collect()
        };
        assert_eq!(flatten(&forward), flatten(&backward));
    }

    #[test]
    fn test_month_labels_mark_each_month_once_in_order() {
        let heatmap = contribution_heatmap(&[], now());
        let labels: Vec<&str> = heatmap.month_labels.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug"]);
        assert_eq!(heatmap.month_labels[0].week, 0);
        let weeks: Vec<usize> = heatmap.month_labels.iter().map(|l| l.week).collect();
        assert!(weeks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_palette_is_the_level_palette() {
        let heatmap = contribution_heatmap(&[], now());
        assert_eq!(heatmap.palette, ACTIVITY_LEVEL_COLORS);
    }
}
