use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use crate::models::{ActivityBin, Event};

/// Contribution counts bucketed into `months` trailing calendar months, the
/// month of `now` last. Bins are zero-initialized, so the result always has
/// exactly `months` entries (floored at 1) in chronological order.
///
/// Only events whose kind is in the contribution set count, and only inside
/// `[start of the first bin month, now]`. Counting is a single indexed pass,
/// so any permutation of the input produces identical bins.
pub fn contribution_activity(events: &[Event], months: u32, now: DateTime<Utc>) -> Vec<ActivityBin> {
    let months = months.max(1);
    let current_month = month_start(now.date_naive());
    let window_start = current_month
        .checked_sub_months(Months::new(months - 1))
        .unwrap_or(current_month);

    let mut bins: Vec<ActivityBin> = (0..months)
        .map(|offset| {
            let month = window_start
                .checked_add_months(Months::new(offset))
                .unwrap_or(window_start);
            ActivityBin {
                label: month.format("%b %y").to_string(),
                count: 0,
            }
        })
        .collect();

    for event in events.iter().filter(|e| e.kind.is_contribution()) {
        if event.created_at > now {
            continue;
        }
        let date = event.created_at.date_naive();
        if date < window_start {
            continue;
        }
        let index = month_ordinal(date) - month_ordinal(window_start);
        if let Some(bin) = bins.get_mut(index as usize) {
            bin.count += 1;
        }
    }

    bins
}

/// First day of the month `date` falls in.
pub(crate) fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

fn month_ordinal(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, EventPayload};
    use chrono::TimeZone;

    fn event(kind: &str, created_at: DateTime<Utc>) -> Event {
        Event {
            id: "0".to_string(),
            kind: EventKind::from(kind),
            created_at,
            payload: EventPayload::Untyped,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_events_yield_all_zero_bins() {
        let bins = contribution_activity(&[], 6, now());
        assert_eq!(bins.len(), 6);
        assert!(bins.iter().all(|b| b.count == 0));
        let labels: Vec<&str> = bins.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Mar 25", "Apr 25", "May 25", "Jun 25", "Jul 25", "Aug 25"]);
    }

    #[test]
    fn test_labels_cross_year_boundaries() {
        let january = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        let bins = contribution_activity(&[], 3, january);
        let labels: Vec<&str> = bins.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov 24", "Dec 24", "Jan 25"]);
    }

    #[test]
    fn test_counts_land_in_their_calendar_month() {
        let events = vec![
            event("PushEvent", Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap()),
            event("IssuesEvent", Utc.with_ymd_and_hms(2025, 8, 2, 9, 0, 0).unwrap()),
            event("CreateEvent", Utc.with_ymd_and_hms(2025, 6, 20, 9, 0, 0).unwrap()),
        ];
        let bins = contribution_activity(&events, 6, now());
        assert_eq!(bins[5].count, 2); // Aug 25
        assert_eq!(bins[3].count, 1); // Jun 25
        assert_eq!(bins[4].count, 0); // Jul 25
    }

    #[test]
    fn test_non_contribution_kinds_are_excluded() {
        let events = vec![
            event("PushEvent", Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap()),
            event("WatchEvent", Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap()),
            event("ForkEvent", Utc.with_ymd_and_hms(2025, 8, 2, 9, 0, 0).unwrap()),
        ];
        let bins = contribution_activity(&events, 6, now());
        assert_eq!(bins[5].count, 1);
    }

    #[test]
    fn test_events_outside_the_window_are_excluded() {
        let events = vec![
            // before the first bin month
            event("PushEvent", Utc.with_ymd_and_hms(2025, 2, 28, 23, 0, 0).unwrap()),
            // first instant of the window
            event("PushEvent", Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
            // after now
            event("PushEvent", Utc.with_ymd_and_hms(2025, 8, 5, 13, 0, 0).unwrap()),
        ];
        let bins = contribution_activity(&events, 6, now());
        let total: u32 = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 1);
        assert_eq!(bins[0].count, 1); // Mar 25
    }

    #[test]
    fn test_permuting_events_does_not_change_bins() {
        let mut events = vec![
            event("PushEvent", Utc.with_ymd_and_hms(2025, 4, 3, 8, 0, 0).unwrap()),
            event("IssuesEvent", Utc.with_ymd_and_hms(2025, 5, 9, 8, 0, 0).unwrap()),
            event("CreateEvent", Utc.with_ymd_and_hms(2025, 5, 10, 8, 0, 0).unwrap()),
            event("PullRequestEvent", Utc.with_ymd_and_hms(2025, 8, 4, 8, 0, 0).unwrap()),
        ];
        let forward = contribution_activity(&events, 6, now());
        events.reverse();
        let backward = contribution_activity(&events, 6, now());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_months_is_floored_at_one() {
        let bins = contribution_activity(&[], 0, now());
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].label, "Aug 25");
    }
}
