use chrono::{Datelike, NaiveDate};

/// Outcome of reading the date-of-birth field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BirthDateInput {
    /// Anything other than `YYYY-MM-DD`, including a half-typed value.
    NotEntered,
    /// Right shape, but no such calendar day (e.g. `2021-02-30`).
    Invalid,
    Date(NaiveDate),
}

pub(crate) fn read_birth_date(text: &str) -> BirthDateInput {
    if !has_iso_date_shape(text) {
        return BirthDateInput::NotEntered;
    }

    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => BirthDateInput::Date(date),
        Err(_) => BirthDateInput::Invalid,
    }
}

fn has_iso_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Whole years elapsed on the civil calendar: the year difference, less one until the
/// birthday has been reached in `today`'s year. Negative for birth dates after `today`.
pub fn civil_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn shape_check_rejects_other_separators_and_padding() {
        assert_eq!(read_birth_date("2022/06/15"), BirthDateInput::NotEntered);
        assert_eq!(read_birth_date(" 2022-06-15"), BirthDateInput::NotEntered);
        assert_eq!(read_birth_date("2022-6-15"), BirthDateInput::NotEntered);
        assert_eq!(read_birth_date("２０２２-06-15"), BirthDateInput::NotEntered);
        assert_eq!(read_birth_date(""), BirthDateInput::NotEntered);
    }

    #[test]
    fn impossible_days_are_invalid_rather_than_missing() {
        assert_eq!(read_birth_date("2021-02-30"), BirthDateInput::Invalid);
        assert_eq!(read_birth_date("2021-13-01"), BirthDateInput::Invalid);
    }

    #[test]
    fn age_drops_by_one_until_the_anniversary() {
        let birth = date(2021, 6, 15);
        assert_eq!(civil_age(birth, date(2025, 6, 14)), 3);
        assert_eq!(civil_age(birth, date(2025, 6, 15)), 4);
        assert_eq!(civil_age(birth, date(2025, 12, 31)), 4);
    }

    #[test]
    fn leap_day_birthdays_turn_over_on_march_first() {
        let birth = date(2020, 2, 29);
        assert_eq!(civil_age(birth, date(2023, 2, 28)), 2);
        assert_eq!(civil_age(birth, date(2023, 3, 1)), 3);
    }

    #[test]
    fn future_birth_dates_yield_negative_ages() {
        assert_eq!(civil_age(date(2027, 1, 1), date(2025, 6, 1)), -2);
    }
}
