#[cfg(test)]
mod tests {
    use crate::calendar::{check_date, DateWindow};
    use crate::error::WizardError;
    use crate::wizard::Loadable;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    // Day sets drawn from a range wider than the window on both sides.
    fn day_set(offsets: Vec<i64>) -> BTreeSet<NaiveDate> {
        offsets
            .into_iter()
            .map(|offset| base_date() + Duration::days(offset))
            .collect()
    }

    proptest! {
        // Test that dates outside the window are refused whatever the day set says
        #[test]
        fn test_outside_window_never_selectable(
            today_offset in 0..365i64,
            horizon in 1..60i64,
            offsets in prop::collection::vec(-30..450i64, 0..40),
            probe in -30..450i64,
        ) {
            let today = base_date() + Duration::days(today_offset);
            let window = DateWindow::starting_after(today, horizon);
            let date = base_date() + Duration::days(probe);
            let days = Loadable::Loaded(day_set(offsets));

            if !window.contains(date) {
                prop_assert_eq!(
                    check_date(&window, &days, date),
                    Err(WizardError::DateOutsideWindow(date))
                );
            }
        }

        // Test that the window starts tomorrow and spans horizon + 1 dates
        #[test]
        fn test_window_bounds(today_offset in 0..365i64, horizon in 0..60i64) {
            let today = base_date() + Duration::days(today_offset);
            let window = DateWindow::starting_after(today, horizon);

            prop_assert!(!window.contains(today));
            prop_assert_eq!(window.start, today + Duration::days(1));
            prop_assert_eq!(window.dates().count() as i64, horizon + 1);
        }

        // Test that a failed or empty day fetch leaves every window date selectable
        #[test]
        fn test_degrade_open(today_offset in 0..365i64, horizon in 1..60i64, failed in any::<bool>()) {
            let today = base_date() + Duration::days(today_offset);
            let window = DateWindow::starting_after(today, horizon);
            let days = if failed {
                Loadable::Failed("boom".to_string())
            } else {
                Loadable::Loaded(BTreeSet::new())
            };

            for date in window.dates() {
                prop_assert!(check_date(&window, &days, date).is_ok());
            }
        }

        // Test that a non-empty day set restricts the window to its own dates
        #[test]
        fn test_loaded_days_restrict(
            today_offset in 0..365i64,
            offsets in prop::collection::vec(0..400i64, 1..40),
        ) {
            let today = base_date() + Duration::days(today_offset);
            let window = DateWindow::starting_after(today, 30);
            let set = day_set(offsets);
            let days = Loadable::Loaded(set.clone());

            for date in window.dates() {
                let selectable = check_date(&window, &days, date).is_ok();
                prop_assert_eq!(selectable, set.contains(&date));
            }
        }
    }
}
