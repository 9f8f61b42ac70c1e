#[cfg(test)]
mod tests {
    use crate::availability::{AvailabilityContext, AvailabilityState, CellState};
    use crate::grid::{build_grid, MonthOffset};
    use crate::month::{days_in_month, weekday_index, DateKey, YearMonth};
    use chrono::{Datelike, Days, NaiveDate};
    use proptest::prelude::*;

    fn any_month() -> impl Strategy<Value = YearMonth> {
        (1900i32..2200, 1u32..=12).prop_map(|(y, m)| YearMonth::new(y, m).expect("valid month"))
    }

    proptest! {
        // Complete weeks only
        #[test]
        fn test_grid_length_is_multiple_of_seven(month in any_month()) {
            let grid = build_grid(month);
            prop_assert_eq!(grid.len() % 7, 0);
            prop_assert!(grid.len() >= 28 && grid.len() <= 42);
        }

        #[test]
        fn test_current_cells_are_exactly_the_month(month in any_month()) {
            let current: Vec<u32> = build_grid(month)
                .iter()
                .filter(|c| c.month_offset() == MonthOffset::Current)
                .map(|c| c.day_number())
                .collect();
            let expected: Vec<u32> = (1..=days_in_month(month.year(), month.month())).collect();
            prop_assert_eq!(current, expected);
        }

        #[test]
        fn test_first_cell_in_sunday_column(month in any_month()) {
            let grid = build_grid(month);
            prop_assert_eq!(weekday_index(grid[0].date()), 0);
            // Padding never reaches a full week
            let leading = grid.iter().filter(|c| c.month_offset() == MonthOffset::Previous).count();
            let trailing = grid.iter().filter(|c| c.month_offset() == MonthOffset::Next).count();
            prop_assert!(leading < 7);
            prop_assert!(trailing < 7);
        }

        #[test]
        fn test_adjacent_cells_belong_to_adjacent_months(month in any_month()) {
            for cell in build_grid(month) {
                let cell_month = YearMonth::of(cell.date());
                let expected = match cell.month_offset() {
                    MonthOffset::Previous => month.previous(),
                    MonthOffset::Current => month,
                    MonthOffset::Next => month.next(),
                };
                prop_assert_eq!(cell_month, expected);
                prop_assert_eq!(cell.day_number(), cell.date().day());
            }
        }

        // Anything before min_date is out of range, whatever else applies to it
        #[test]
        fn test_before_min_is_always_out_of_range(
            month in any_month(),
            day_offset in 0u64..27,
            gap in 1u64..40,
            disabled in any::<bool>(),
            booked in any::<bool>(),
            selected in any::<bool>(),
            is_today in any::<bool>(),
        ) {
            let date = month.first_day().checked_add_days(Days::new(day_offset)).expect("in month");
            let min = date.checked_add_days(Days::new(gap)).expect("min date");
            let today = if is_today { date } else { NaiveDate::from_ymd_opt(1800, 1, 1).expect("date") };
            let key = DateKey::from(date);
            let context = AvailabilityContext::new(today)
                .with_bounds(Some(min), None)
                .expect("open-ended range")
                .with_disabled_dates(disabled.then_some(key))
                .with_booked_dates(booked.then_some(key))
                .with_selected_date(selected.then_some(date));

            prop_assert_eq!(
                context.classify(date, month),
                CellState::Active(AvailabilityState::DisabledOutOfRange)
            );
        }
    }
}
