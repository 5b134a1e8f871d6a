/// Unit tests for the solar Hijri calendar and month layout
use shamsi_habits::*;

#[cfg(test)]
mod calendar_unit_tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> DateDay {
        DateDay::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_known_conversions() {
        assert_eq!(
            to_solar_hijri(day(2026, 10, 19)).unwrap(),
            SolarHijriDate { year: 1405, month: 7, day: 27 }
        );
        assert_eq!(
            to_solar_hijri(day(2024, 3, 20)).unwrap(),
            SolarHijriDate { year: 1403, month: 1, day: 1 }
        );
        assert_eq!(
            to_solar_hijri(day(2025, 3, 20)).unwrap(),
            SolarHijriDate { year: 1403, month: 12, day: 30 }
        );
    }

    #[test]
    fn test_conversion_round_trips_through_a_year() {
        let mut current = day(2024, 1, 1);
        for _ in 0..366 {
            let shamsi = to_solar_hijri(current).unwrap();
            let back = solar_hijri_to_gregorian(shamsi.year, shamsi.month, shamsi.day).unwrap();
            assert_eq!(back, current);
            current = current.succ();
        }
    }

    #[test]
    fn test_leap_years_and_month_lengths() {
        assert!(is_solar_hijri_leap_year(1403).unwrap());
        assert!(!is_solar_hijri_leap_year(1404).unwrap());

        assert_eq!(solar_hijri_month_length(1404, 1).unwrap(), 31);
        assert_eq!(solar_hijri_month_length(1404, 7).unwrap(), 30);
        assert_eq!(solar_hijri_month_length(1403, 12).unwrap(), 30);
        assert_eq!(solar_hijri_month_length(1404, 12).unwrap(), 29);
    }

    #[test]
    fn test_out_of_range_years_are_errors() {
        assert!(is_solar_hijri_leap_year(MAX_SOLAR_HIJRI_YEAR + 1).is_err());
        assert!(solar_hijri_to_gregorian(MIN_SOLAR_HIJRI_YEAR - 1, 1, 1).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(month_year_label(day(2026, 10, 19)).unwrap(), "مهر ۱۴۰۵");
        assert_eq!(to_persian_digits("1405/7"), "۱۴۰۵/۷");
        assert_eq!(solar_hijri_month_name(1), Some("فروردین"));
        assert_eq!(solar_hijri_month_name(13), None);
        assert_eq!(format_solar_hijri(day(2026, 10, 19), "yyyy/m/d").unwrap(), "1405/7/27");
    }

    #[test]
    fn test_saturday_first_weeks() {
        // 2024-06-01 was a Saturday
        assert_eq!(weekday_index(day(2024, 6, 1)), 0);
        assert_eq!(weekday_index(day(2024, 6, 7)), 6);

        // May 2024 starts on a Wednesday: four leading blanks
        let days = days_of_month(day(2024, 5, 15));
        assert_eq!(days.len(), 31);
        let grid = month_grid(days[0], &days);
        assert!(grid[0][..4].iter().all(Option::is_none));
        assert_eq!(grid[0][4], Some(day(2024, 5, 1)));
        let filled: usize = grid.iter().flatten().filter(|cell| cell.is_some()).count();
        assert_eq!(filled, 31);
    }
}
