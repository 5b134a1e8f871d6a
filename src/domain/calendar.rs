/// Calendar arithmetic for the month views
///
/// Gregorian month enumeration, the Saturday-first week used by the heatmap,
/// and conversion to the solar Hijri (Jalaali) calendar used for every label
/// shown to the user. The conversion follows the published Jalaali algorithm
/// (Borkowski's 33-year break table), so results agree day-for-day with the
/// reference implementation across its supported range.

use serde::{Deserialize, Serialize};

use crate::domain::{DateDay, DomainError};

/// Solar Hijri month names, Farvardin first
pub const SOLAR_HIJRI_MONTHS: [&str; 12] = [
    "فروردین", "اردیبهشت", "خرداد", "تیر", "مرداد", "شهریور",
    "مهر", "آبان", "آذر", "دی", "بهمن", "اسفند",
];

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Years (solar Hijri) at which the leap pattern of the 33-year cycle shifts
const BREAKS: [i64; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262,
    2324, 2394, 2456, 3178,
];

/// Smallest solar Hijri year the break table covers
pub const MIN_SOLAR_HIJRI_YEAR: i32 = -61;
/// Largest solar Hijri year the break table covers
pub const MAX_SOLAR_HIJRI_YEAR: i32 = 3177;

/// A date in the solar Hijri calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SolarHijriDate {
    pub year: i32,
    /// 1 = Farvardin ... 12 = Esfand
    pub month: u32,
    pub day: u32,
}

/// Every day of the month containing `reference`, ascending
pub fn days_of_month(reference: DateDay) -> Vec<DateDay> {
    let mut days = Vec::with_capacity(31);
    let mut day = reference.first_of_month();
    while day.same_month(reference) {
        days.push(day);
        day = day.succ();
    }
    days
}

/// Position of a day in a Saturday-first week: 0 = Saturday ... 6 = Friday
pub fn weekday_index(day: DateDay) -> u8 {
    use chrono::Datelike;
    ((day.date().weekday().num_days_from_sunday() + 1) % 7) as u8
}

/// Lay month cells out in Saturday-first weeks
///
/// The first row is padded with `weekday_index(first_day)` empty cells and the
/// last row is padded at the end, so every row has exactly seven slots.
pub fn month_grid<T: Clone>(first_day: DateDay, cells: &[T]) -> Vec<[Option<T>; 7]> {
    let offset = weekday_index(first_day) as usize;
    let slots: Vec<Option<T>> = std::iter::repeat(None)
        .take(offset)
        .chain(cells.iter().cloned().map(Some))
        .collect();

    slots
        .chunks(7)
        .map(|chunk| {
            let mut week: [Option<T>; 7] = Default::default();
            for (slot, cell) in week.iter_mut().zip(chunk.iter()) {
                *slot = cell.clone();
            }
            week
        })
        .collect()
}

/// Convert a Gregorian day to the solar Hijri calendar
pub fn to_solar_hijri(day: DateDay) -> Result<SolarHijriDate, DomainError> {
    let gy = day.year() as i64;
    let jdn = gregorian_to_jdn(gy, day.month() as i64, day.day() as i64);

    let mut jy = gy - 621;
    let cal = jal_cal(jy)?;
    let mut k = jdn - gregorian_to_jdn(gy, 3, cal.march);

    if k >= 0 {
        if k <= 185 {
            return Ok(SolarHijriDate {
                year: jy as i32,
                month: (1 + k / 31) as u32,
                day: (k % 31 + 1) as u32,
            });
        }
        k -= 186;
    } else {
        // Before Nowruz: still in the last months of the previous year
        jy -= 1;
        k += 179;
        if cal.leap == 1 {
            k += 1;
        }
    }

    Ok(SolarHijriDate {
        year: jy as i32,
        month: (7 + k / 30) as u32,
        day: (k % 30 + 1) as u32,
    })
}

/// Convert a solar Hijri date back to a Gregorian day
pub fn solar_hijri_to_gregorian(year: i32, month: u32, day: u32) -> Result<DateDay, DomainError> {
    if !(1..=12).contains(&month) || day < 1 || day > solar_hijri_month_length(year, month)? {
        return Err(DomainError::InvalidDate(format!(
            "{}/{}/{} is not a valid solar Hijri date",
            year, month, day
        )));
    }

    let cal = jal_cal(year as i64)?;
    let jm = month as i64;
    let jdn = gregorian_to_jdn(cal.gy, 3, cal.march) + (jm - 1) * 31 - (jm / 7) * (jm - 7)
        + day as i64
        - 1;
    let (gy, gm, gd) = jdn_to_gregorian(jdn);

    DateDay::from_ymd(gy as i32, gm as u32, gd as u32).ok_or_else(|| {
        DomainError::InvalidDate(format!("{}-{}-{} is outside the supported range", gy, gm, gd))
    })
}

/// Whether a solar Hijri year has 366 days
pub fn is_solar_hijri_leap_year(year: i32) -> Result<bool, DomainError> {
    Ok(jal_cal(year as i64)?.leap == 0)
}

/// Number of days in a solar Hijri month
pub fn solar_hijri_month_length(year: i32, month: u32) -> Result<u32, DomainError> {
    match month {
        1..=6 => Ok(31),
        7..=11 => Ok(30),
        12 => Ok(if is_solar_hijri_leap_year(year)? { 30 } else { 29 }),
        _ => Err(DomainError::InvalidDate(format!("month {} does not exist", month))),
    }
}

/// Name of a solar Hijri month (1-based); out-of-range months yield `None`
pub fn solar_hijri_month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|index| SOLAR_HIJRI_MONTHS.get(index as usize))
        .copied()
}

/// Replace ASCII digits with Persian digits
pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => PERSIAN_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Month name and year of a day, e.g. "مهر ۱۴۰۵"
pub fn month_year_label(day: DateDay) -> Result<String, DomainError> {
    let date = to_solar_hijri(day)?;
    let name = solar_hijri_month_name(date.month).unwrap_or_default();
    Ok(format!("{} {}", name, to_persian_digits(&date.year.to_string())))
}

/// Render a day with a small pattern language
///
/// Tokens are replaced once each, in order: `yyyy` (year), `yy` (last two
/// digits of the year), `M` (month name), `m` (month number), `d` (day).
pub fn format_solar_hijri(day: DateDay, pattern: &str) -> Result<String, DomainError> {
    let date = to_solar_hijri(day)?;
    let year = date.year.to_string();
    let short_year = &year[year.len().saturating_sub(2)..];
    let name = solar_hijri_month_name(date.month).unwrap_or_default();

    Ok(pattern
        .replacen("yyyy", &year, 1)
        .replacen("yy", short_year, 1)
        .replacen('M', name, 1)
        .replacen('m', &date.month.to_string(), 1)
        .replacen('d', &date.day.to_string(), 1))
}

/// Leap status and Nowruz placement for one solar Hijri year
struct JalCal {
    /// 0 for a leap year, otherwise years since the last leap year
    leap: i64,
    /// Gregorian year in which this solar Hijri year starts
    gy: i64,
    /// Day of March on which Nowruz falls
    march: i64,
}

fn jal_cal(jy: i64) -> Result<JalCal, DomainError> {
    let last = BREAKS[BREAKS.len() - 1];
    if jy < BREAKS[0] || jy >= last {
        return Err(DomainError::InvalidDate(format!(
            "solar Hijri year {} is outside the supported range {}..={}",
            jy, MIN_SOLAR_HIJRI_YEAR, MAX_SOLAR_HIJRI_YEAR
        )));
    }

    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(JalCal { leap, gy, march })
}

/// Julian day number of a Gregorian date (integer division truncates toward zero)
fn gregorian_to_jdn(gy: i64, gm: i64, gd: i64) -> i64 {
    let d = (gy + (gm - 8) / 6 + 100100) * 1461 / 4 + (153 * ((gm + 9) % 12) + 2) / 5 + gd
        - 34840408;
    d - (gy + 100100 + (gm - 8) / 6) / 100 * 3 / 4 + 752
}

fn jdn_to_gregorian(jdn: i64) -> (i64, i64, i64) {
    let mut j = 4 * jdn + 139361631;
    j += (4 * jdn + 183187720) / 146097 * 3 / 4 * 4 - 3908;
    let i = (j % 1461) / 4 * 5 + 308;
    let gd = (i % 153) / 5 + 1;
    let gm = (i / 153) % 12 + 1;
    let gy = j / 1461 - 100100 + (8 - gm) / 6;
    (gy, gm, gd)
}
